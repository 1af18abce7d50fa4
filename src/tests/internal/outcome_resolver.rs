//! 状态机测试：直接调用提交触发、取消、成功 / 失败处理，不经过事件循环。

use std::time::Duration;

use url::Url;

use crate::page::{
    Outcome, PageError, ProgressBar, ReactiveView, UploadSession, UploadState, UploadView,
    attach_transfer, begin_submission, request_cancel, resolve_failure, resolve_success,
};
use crate::page::upload_config::DEFAULT_ALERT_PREFIX;
use crate::transfer::{FailureKind, TransferChannel, TransferSink, TransportFailure};

const TITLE: &str = "Shared files";

fn home() -> Url {
    Url::parse("http://files.local/").unwrap()
}

/// 开始一次提交并登记一个真实句柄，返回传输端
fn submit(session: &mut UploadSession, view: &mut ReactiveView) -> (TransferChannel, TransferSink) {
    begin_submission(session, view).unwrap();
    let (channel, sink) = TransferChannel::open();
    attach_transfer(session, channel.handle());
    (channel, sink)
}

#[test]
fn submission_enters_in_flight_state() {
    let mut view = ReactiveView::new(TITLE);
    let mut session = UploadSession::new(view.title());

    let _pair = submit(&mut session, &mut view);

    assert_eq!(session.state(), UploadState::InFlight);
    assert!(!session.cancel_requested());
    assert!(session.transfer_handle().is_some());
    let state = view.snapshot();
    assert!(state.progress_active);
    assert!(state.spinner_visible);
    assert_eq!(state.progress, ProgressBar::new(0));
    assert_eq!(state.title, TITLE);
}

#[test]
fn overlapping_submission_is_rejected() {
    let mut view = ReactiveView::new(TITLE);
    let mut session = UploadSession::new(view.title());
    let _pair = submit(&mut session, &mut view);
    view.set_progress(ProgressBar::new(40));
    let before = view.snapshot();

    assert_eq!(
        begin_submission(&mut session, &mut view),
        Err(PageError::AlreadyInFlight)
    );
    assert_eq!(view.snapshot(), before);
    assert!(session.transfer_handle().is_some());
}

#[test]
fn cancel_without_submission_is_noop() {
    let mut view = ReactiveView::new(TITLE);
    let mut session = UploadSession::new(view.title());
    let before = view.snapshot();

    assert!(!request_cancel(&mut session));

    assert!(!session.cancel_requested());
    assert_eq!(session.state(), UploadState::Idle);
    assert_eq!(view.snapshot(), before);
}

#[tokio::test]
async fn cancel_twice_aborts_once() {
    let mut view = ReactiveView::new(TITLE);
    let mut session = UploadSession::new(view.title());
    let (_channel, mut sink) = submit(&mut session, &mut view);

    assert!(request_cancel(&mut session));
    assert!(!request_cancel(&mut session));
    assert!(session.cancel_requested());

    // 第一条中止命令能收到
    tokio::time::timeout(Duration::from_secs(1), sink.abort_requested())
        .await
        .expect("应收到中止命令");
    // 不会有第二条
    let second = tokio::time::timeout(Duration::from_millis(100), sink.abort_requested()).await;
    assert!(second.is_err(), "第二次取消不应再次中止");
}

#[test]
fn handle_abort_after_finish_is_noop() {
    let (channel, sink) = TransferChannel::open();
    let handle = channel.handle();
    sink.succeed(200);

    assert!(handle.is_finished());
    assert!(!handle.can_abort());
    assert!(!handle.abort());
}

#[test]
fn success_clears_active_style_and_navigates_home() {
    let mut view = ReactiveView::new(TITLE);
    let mut session = UploadSession::new(view.title());
    let _pair = submit(&mut session, &mut view);
    view.set_title("50% upload complete");
    view.set_progress(ProgressBar::new(50));

    let outcome = resolve_success(&mut session, &mut view, &home());

    assert_eq!(outcome, Outcome::Success);
    assert_eq!(session.state(), UploadState::Idle);
    assert!(session.transfer_handle().is_none());
    let state = view.snapshot();
    assert!(!state.progress_active);
    assert_eq!(state.location, Some(home()));
    // 标题保留最后的进度
    assert_eq!(state.title, "50% upload complete");
    assert!(state.alerts.is_empty());
}

#[test]
fn cancelled_failure_resets_silently() {
    let mut view = ReactiveView::new(TITLE);
    let mut session = UploadSession::new(view.title());
    let _pair = submit(&mut session, &mut view);
    view.set_title("70% upload complete");
    view.set_progress(ProgressBar::new(70));

    request_cancel(&mut session);
    let outcome = resolve_failure(
        &mut session,
        &mut view,
        TransportFailure::aborted(),
        DEFAULT_ALERT_PREFIX,
    );

    assert_eq!(outcome, Outcome::Cancelled);
    let state = view.snapshot();
    assert_eq!(state.title, TITLE);
    assert_eq!(state.progress, ProgressBar::new(0));
    assert!(!state.progress_active);
    assert!(!state.spinner_visible);
    assert!(state.alerts.is_empty());
    assert!(session.transfer_handle().is_none());
    // 取消标志保留到下次提交
    assert!(session.cancel_requested());
}

#[test]
fn genuine_failure_resets_and_alerts_once() {
    let mut view = ReactiveView::new(TITLE);
    let mut session = UploadSession::new(view.title());
    let _pair = submit(&mut session, &mut view);
    view.set_progress(ProgressBar::new(30));

    let failure = TransportFailure::status(500, Some("Internal Server Error"));
    let outcome = resolve_failure(&mut session, &mut view, failure.clone(), DEFAULT_ALERT_PREFIX);

    assert_eq!(outcome, Outcome::Error(failure));
    let state = view.snapshot();
    assert_eq!(state.title, TITLE);
    assert_eq!(state.progress, ProgressBar::new(0));
    assert!(!state.spinner_visible);
    assert_eq!(state.alerts.len(), 1);
    assert!(state.alerts[0].starts_with(DEFAULT_ALERT_PREFIX));
    assert!(state.alerts[0].contains("error"));
    assert!(state.alerts[0].contains("500 Internal Server Error"));
}

#[test]
fn abort_without_cancel_flag_is_reported_as_error() {
    let mut view = ReactiveView::new(TITLE);
    let mut session = UploadSession::new(view.title());
    let _pair = submit(&mut session, &mut view);

    let outcome = resolve_failure(
        &mut session,
        &mut view,
        TransportFailure::aborted(),
        DEFAULT_ALERT_PREFIX,
    );

    match outcome {
        Outcome::Error(failure) => assert_eq!(failure.kind, FailureKind::Aborted),
        other => panic!("预期 Error，得到 {other:?}"),
    }
    assert_eq!(view.snapshot().alerts.len(), 1);
}

#[test]
fn new_submission_resets_cancel_flag() {
    let mut view = ReactiveView::new(TITLE);
    let mut session = UploadSession::new(view.title());
    let _first = submit(&mut session, &mut view);
    request_cancel(&mut session);
    resolve_failure(&mut session, &mut view, TransportFailure::aborted(), DEFAULT_ALERT_PREFIX);
    assert!(session.cancel_requested());

    let _second = submit(&mut session, &mut view);

    assert!(!session.cancel_requested());
    let outcome = resolve_failure(
        &mut session,
        &mut view,
        TransportFailure::network("connection reset"),
        DEFAULT_ALERT_PREFIX,
    );
    assert!(matches!(outcome, Outcome::Error(_)));
}

#[test]
fn reset_by_error_equals_reset_by_new_submission() {
    // 出错后复位
    let mut errored = ReactiveView::new(TITLE);
    let mut session_a = UploadSession::new(errored.title());
    let _a = submit(&mut session_a, &mut errored);
    errored.set_title("64% upload complete");
    errored.set_progress(ProgressBar::new(64));
    resolve_failure(
        &mut session_a,
        &mut errored,
        TransportFailure::network("boom"),
        DEFAULT_ALERT_PREFIX,
    );

    // 同样的脏状态直接开始新提交
    let mut resubmitted = ReactiveView::new(TITLE);
    let mut session_b = UploadSession::new(resubmitted.title());
    resubmitted.set_title("64% upload complete");
    resubmitted.set_progress(ProgressBar::new(64));
    let _b = submit(&mut session_b, &mut resubmitted);

    let a = errored.snapshot();
    let b = resubmitted.snapshot();
    assert_eq!(a.title, b.title);
    assert_eq!(a.progress, b.progress);
    assert_eq!(a.title, TITLE);
    assert_eq!(a.progress, ProgressBar::new(0));
}
