//! 文件选择框旁的文字回显。

/// 根据选择的文件生成回显文字。
///
/// - 多于一个文件：`"<N> files selected"`
/// - 恰好一个文件：文件名（反斜杠统一为 `/` 后取最后一段，兼容 `C:\fakepath\a.txt`）
/// - 未选择：空字符串
pub fn file_label<S: AsRef<str>>(selected: &[S]) -> String {
    match selected {
        [] => String::new(),
        [only] => base_name(only.as_ref()).to_string(),
        many => format!("{} files selected", many.len()),
    }
}

fn base_name(path: &str) -> &str {
    // 反斜杠和斜杠都视为分隔符，取最后一个之后的部分
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
