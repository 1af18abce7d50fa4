use crate::internal::transfer::ProgressSample;

use super::upload_view::{ProgressBar, UploadView};

/// 上传中的窗口标题，如 `"42% upload complete"`
pub fn progress_title(percent: u8) -> String {
    format!("{percent}% upload complete")
}

/// 把一次进度采样写到进度条和标题，返回写入的百分比。
///
/// 总大小不可计算时什么也不做。不做平滑，也不保证单调。
pub fn report_progress<V: UploadView + ?Sized>(
    view: &mut V,
    sample: &ProgressSample,
) -> Option<u8> {
    let Some(percent) = sample.percent() else {
        log::debug!("进度不可计算，忽略: {sample:?}");
        return None;
    };

    view.set_title(&progress_title(percent));
    view.set_progress(ProgressBar::new(percent));
    Some(percent)
}
