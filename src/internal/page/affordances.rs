//! 页面上的两个小交互：删除确认、文件选择回显。

use url::Url;

use crate::internal::form::file_label;

use super::upload_view::UploadView;

/// 删除链接：先弹确认框，同意才跳转到链接地址。返回是否跳转。
pub fn confirm_delete<V: UploadView + ?Sized>(view: &mut V, prompt: &str, target: &Url) -> bool {
    if !view.confirm(prompt) {
        return false;
    }
    view.navigate(target);
    true
}

/// 文件选择变化：回显文件名或文件个数。
///
/// 页面没有文字框时，非空的回显改用提示框。返回回显文字。
pub fn echo_file_label<V, S>(view: &mut V, selected: &[S]) -> String
where
    V: UploadView + ?Sized,
    S: AsRef<str>,
{
    let label = file_label(selected);
    if !view.set_file_label(&label) && !label.is_empty() {
        view.alert(&label);
    }
    label
}
