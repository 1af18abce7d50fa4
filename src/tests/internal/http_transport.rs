//! reqwest 传输实现测试：对本机一次性 HTTP 服务发真实的 multipart 请求。

use std::io::{Cursor, Write};

use tempfile::NamedTempFile;

use url::Url;

use crate::auth::{AuthError, UploadAuth};
use crate::form::{FileField, FormError, UploadForm};
use crate::page::{Outcome, ReactiveView, UploadPage};
use crate::tests::{ServerReply, WAIT, find, spawn_http_server, wait_property};
use crate::transfer::{
    FailureKind, HttpTransport, ProgressSample, TransferChannel, TransferError, TransferEvent,
    Transport,
};

/// 读完一个请求的全部事件，返回 (进度采样, 终止事件)
async fn drain(mut channel: TransferChannel) -> (Vec<ProgressSample>, TransferEvent) {
    let mut samples = Vec::new();
    loop {
        let event = tokio::time::timeout(WAIT, channel.next_event())
            .await
            .expect("等待传输事件超时");
        match event {
            TransferEvent::Progress(sample) => samples.push(sample),
            terminal => return (samples, terminal),
        }
    }
}

fn transport_for(base: &Url) -> HttpTransport {
    let auth = UploadAuth::anonymous(base.as_str()).unwrap();
    HttpTransport::new(auth).chunk_size(4)
}

#[tokio::test]
async fn successful_upload_reports_progress_then_status() {
    let (base, server) = spawn_http_server(ServerReply::Status(200, "OK")).await;
    let transport = transport_for(&base);

    let form = UploadForm::new("upload")
        .text("comment", "weekly")
        .file("f", FileField::from_bytes("report.txt", "hello world").mime("text/plain"));
    let channel = transport.start(form).await.unwrap();
    let (samples, terminal) = drain(channel).await;

    assert_eq!(terminal, TransferEvent::Succeeded { status: 200 });
    // 11 字节按 4 字节一块：4, 8, 11
    let loaded: Vec<u64> = samples.iter().map(|s| s.bytes_loaded).collect();
    assert_eq!(loaded, vec![4, 8, 11]);
    assert!(samples.iter().all(|s| s.bytes_total == Some(11)));
    assert_eq!(samples.last().and_then(|s| s.percent()), Some(100));

    let request = server.await.unwrap();
    let text = String::from_utf8_lossy(&request);
    assert!(text.starts_with("POST /upload HTTP/1.1"));
    assert!(text.contains("multipart/form-data; boundary="));
    assert!(text.contains(r#"name="comment""#));
    assert!(text.contains(r#"name="f"; filename="report.txt""#));
    assert!(text.to_ascii_lowercase().contains("content-type: text/plain"));
    assert!(find(&request, b"hello world").is_some());
}

#[tokio::test]
async fn basic_auth_header_is_sent() {
    let (base, server) = spawn_http_server(ServerReply::Status(204, "No Content")).await;
    let auth = UploadAuth::basic(base.as_str(), "rw", "secret").unwrap();
    let transport = HttpTransport::new(auth);

    let form = UploadForm::new("").file("f", FileField::from_bytes("a.txt", "a"));
    let (_, terminal) = drain(transport.start(form).await.unwrap()).await;
    assert_eq!(terminal, TransferEvent::Succeeded { status: 204 });

    let request = server.await.unwrap();
    let text = String::from_utf8_lossy(&request).to_ascii_lowercase();
    // base64("rw:secret")
    assert!(text.contains("authorization: basic cnc6c2vjcmv0"));
}

#[tokio::test]
async fn server_error_status_is_reported_as_failure() {
    let (base, server) =
        spawn_http_server(ServerReply::Status(500, "Internal Server Error")).await;
    let transport = transport_for(&base);

    let form = UploadForm::new("upload").file("f", FileField::from_bytes("a.txt", "abc"));
    let (_, terminal) = drain(transport.start(form).await.unwrap()).await;

    match terminal {
        TransferEvent::Failed(failure) => {
            assert_eq!(failure.kind, FailureKind::Status(500));
            assert_eq!(failure.status_text, "error");
            assert_eq!(failure.description, "500 Internal Server Error");
        }
        other => panic!("预期失败，得到 {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn abort_ends_stalled_request() {
    let (base, server) = spawn_http_server(ServerReply::Stall).await;
    let transport = transport_for(&base);

    let form = UploadForm::new("upload").file("f", FileField::from_bytes("a.txt", "abc"));
    let channel = transport.start(form).await.unwrap();
    let handle = channel.handle();

    assert!(handle.can_abort());
    assert!(handle.abort());
    assert!(!handle.abort());

    let (_, terminal) = drain(channel).await;
    match terminal {
        TransferEvent::Failed(failure) => assert_eq!(failure.kind, FailureKind::Aborted),
        other => panic!("预期中止，得到 {other:?}"),
    }
    assert!(handle.is_finished());
    assert!(!handle.abort());
    server.abort();
}

#[tokio::test]
async fn reader_source_has_unknown_total_and_chunked_body() {
    let (base, server) = spawn_http_server(ServerReply::Status(200, "OK")).await;
    let transport = transport_for(&base);

    let reader = Cursor::new(vec![b'x'; 10]);
    let form = UploadForm::new("upload").file("f", FileField::from_reader("stream.bin", reader));
    let (samples, terminal) = drain(transport.start(form).await.unwrap()).await;

    assert_eq!(terminal, TransferEvent::Succeeded { status: 200 });
    assert!(!samples.is_empty());
    assert!(samples.iter().all(|s| s.bytes_total.is_none() && s.percent().is_none()));
    assert_eq!(samples.last().map(|s| s.bytes_loaded), Some(10));

    let request = server.await.unwrap();
    let text = String::from_utf8_lossy(&request).to_ascii_lowercase();
    assert!(text.contains("transfer-encoding: chunked"));
    assert!(text.contains(r#"filename="stream.bin""#));
}

#[tokio::test]
async fn path_source_is_read_from_disk() {
    let (base, server) = spawn_http_server(ServerReply::Status(200, "OK")).await;
    let transport = transport_for(&base);

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"from disk").unwrap();
    file.flush().unwrap();

    let form = UploadForm::new("upload").file("f", FileField::from_path(file.path()));
    let (samples, terminal) = drain(transport.start(form).await.unwrap()).await;

    assert_eq!(terminal, TransferEvent::Succeeded { status: 200 });
    assert_eq!(samples.last().copied(), Some(ProgressSample::new(9, Some(9))));

    let request = server.await.unwrap();
    assert!(find(&request, b"from disk").is_some());
}

#[tokio::test]
async fn action_outside_site_is_rejected_before_sending() {
    let auth = UploadAuth::anonymous("http://127.0.0.1:9/share").unwrap();
    let transport = HttpTransport::new(auth);

    for action in ["http://elsewhere.example/upload", "../upload", "https://127.0.0.1:9/share/x"] {
        let form = UploadForm::new(action).file("f", FileField::from_bytes("a.txt", "a"));
        match transport.start(form).await {
            Err(TransferError::Action(AuthError::ActionOutsideSite(_))) => {}
            other => panic!("{action} 应被拒绝，得到 {other:?}"),
        }
    }
}

#[tokio::test]
async fn missing_file_is_a_form_error() {
    let auth = UploadAuth::anonymous("http://127.0.0.1:9/").unwrap();
    let transport = HttpTransport::new(auth);

    let form = UploadForm::new("upload").file("f", FileField::from_path("/no/such/file.bin"));
    match transport.start(form).await {
        Err(TransferError::Form(FormError::OpenFile { path, .. })) => {
            assert!(path.ends_with("file.bin"));
        }
        other => panic!("预期文件打开失败，得到 {other:?}"),
    }
}

#[tokio::test]
async fn page_with_http_transport_navigates_home_on_success() {
    let (base, server) = spawn_http_server(ServerReply::Status(200, "OK")).await;
    let view = ReactiveView::new("Files");
    let (page, handle) = UploadPage::new(view.clone(), transport_for(&base), base.clone());
    tokio::spawn(page.run());

    let form = UploadForm::new("upload").file("f", FileField::from_bytes("a.txt", "0123456789"));
    handle.submit(form).unwrap();

    let status = wait_property(&handle.status(), |s| s.finished_sessions == 1).await;
    assert_eq!(status.last_outcome, Some(Outcome::Success));

    let state = view.snapshot();
    assert_eq!(state.location, Some(base.join("/").unwrap()));
    assert_eq!(state.title, "100% upload complete");
    assert_eq!(state.progress.percent(), 100);
    assert!(state.alerts.is_empty());
    server.await.unwrap();
}

#[tokio::test]
async fn page_with_http_transport_alerts_on_server_error() {
    let (base, server) = spawn_http_server(ServerReply::Status(503, "Service Unavailable")).await;
    let view = ReactiveView::new("Files");
    let (page, handle) = UploadPage::new(view.clone(), transport_for(&base), base.clone());
    tokio::spawn(page.run());

    handle
        .submit(UploadForm::new("upload").file("f", FileField::from_bytes("a.txt", "abc")))
        .unwrap();

    let status = wait_property(&handle.status(), |s| s.finished_sessions == 1).await;
    assert!(matches!(status.last_outcome, Some(Outcome::Error(_))));

    let state = view.snapshot();
    assert_eq!(state.title, "Files");
    assert_eq!(state.progress.percent(), 0);
    assert_eq!(state.alerts.len(), 1);
    assert!(state.alerts[0].ends_with("error: 503 Service Unavailable"));
    server.await.unwrap();
}
