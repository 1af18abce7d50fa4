/// 一次进度事件的采样：已发送字节数与总字节数。
///
/// 总大小未知（`None`）或为 0 时进度不可计算，调用方应直接丢弃该采样。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSample {
    /// 已发送的字节数
    pub bytes_loaded: u64,
    /// 总字节数，未知时为 `None`
    pub bytes_total: Option<u64>,
}

impl ProgressSample {
    pub fn new(bytes_loaded: u64, bytes_total: Option<u64>) -> Self {
        Self {
            bytes_loaded,
            bytes_total,
        }
    }

    /// 总大小是否可用于计算百分比
    pub fn is_length_computable(&self) -> bool {
        matches!(self.bytes_total, Some(total) if total > 0)
    }

    /// 整数百分比 `round(loaded / total * 100)`，四舍五入（.5 进位），上限 100。
    ///
    /// 进度不可计算时返回 `None`。
    pub fn percent(&self) -> Option<u8> {
        let total = self.bytes_total.filter(|&t| t > 0)? as u128;
        let loaded = self.bytes_loaded as u128;
        // (loaded * 100 / total) 四舍五入 = floor((loaded * 200 + total) / (2 * total))
        let rounded = (loaded * 200 + total) / (total * 2);
        Some(rounded.min(100) as u8)
    }
}
