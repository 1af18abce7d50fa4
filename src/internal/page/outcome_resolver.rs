//! 结果判定：取消请求、成功处理、失败处理。
//!
//! 中止请求同样会以失败事件结束，所以失败处理必须先看会话的取消标志，
//! 而不是根据传输层的错误文字判断是不是用户取消。

use url::Url;

use crate::internal::transfer::TransportFailure;

use super::outcome::Outcome;
use super::submission_trigger::reset_view;
use super::upload_session::UploadSession;
use super::upload_view::UploadView;

/// 用户取消：置位取消标志，请求仍可中止时中止它。
///
/// 没有进行中的上传、或已经取消过时什么也不做。返回是否真的发出了中止。
pub fn request_cancel(session: &mut UploadSession) -> bool {
    if !session.is_in_flight() || session.cancel_requested {
        return false;
    }

    session.cancel_requested = true;
    match session.transfer_handle() {
        Some(handle) if handle.can_abort() => handle.abort(),
        _ => false,
    }
}

/// 请求成功：释放句柄、去掉进行中样式、跳转到首页。标题保留最后的进度。
pub fn resolve_success<V: UploadView + ?Sized>(
    session: &mut UploadSession,
    view: &mut V,
    home: &Url,
) -> Outcome {
    session.terminate();
    view.set_progress_active(false);
    view.navigate(home);
    Outcome::Success
}

/// 请求失败：无条件复位界面并释放句柄；用户取消时静默，否则弹出一次提示。
pub fn resolve_failure<V: UploadView + ?Sized>(
    session: &mut UploadSession,
    view: &mut V,
    failure: TransportFailure,
    alert_prefix: &str,
) -> Outcome {
    reset_view(session, view);
    session.terminate();

    if session.cancel_requested() {
        return Outcome::Cancelled;
    }

    view.alert(&alert_message(alert_prefix, &failure));
    Outcome::Error(failure)
}

/// 提示框文字：前缀 + 状态文字 + 错误描述
pub fn alert_message(prefix: &str, failure: &TransportFailure) -> String {
    format!("{prefix} {failure}")
}
