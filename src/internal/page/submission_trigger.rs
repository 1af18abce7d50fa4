//! 提交触发：复位会话和界面，进入上传中状态，登记请求句柄。

use crate::internal::transfer::TransferHandle;

use super::page_error::PageError;
use super::upload_session::{UploadSession, UploadState};
use super::upload_view::{ProgressBar, UploadView};

/// 界面复位：恢复原标题、进度归零、去掉进行中样式、隐藏转圈。
///
/// 失败处理和新提交都走这里，两者复位效果完全一致。
pub fn reset_view<V: UploadView + ?Sized>(session: &UploadSession, view: &mut V) {
    view.set_title(session.original_title());
    view.set_progress(ProgressBar::new(0));
    view.set_progress_active(false);
    view.set_spinner_visible(false);
}

/// 开始一次提交。已有上传进行中时拒绝，会话和界面都不动。
pub fn begin_submission<V: UploadView + ?Sized>(
    session: &mut UploadSession,
    view: &mut V,
) -> Result<(), PageError> {
    if session.is_in_flight() {
        return Err(PageError::AlreadyInFlight);
    }

    session.cancel_requested = false;
    session.transfer_handle = None;
    reset_view(session, view);

    view.set_progress_active(true);
    view.set_spinner_visible(true);
    session.state = UploadState::InFlight;
    Ok(())
}

/// 请求发出后登记句柄，供之后的取消使用
pub fn attach_transfer(session: &mut UploadSession, handle: TransferHandle) {
    session.transfer_handle = Some(handle);
}
