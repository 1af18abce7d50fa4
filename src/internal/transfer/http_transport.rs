//! 基于 reqwest 的传输实现：multipart/form-data 流式请求体，按块读取时累计进度。
//!
//! 进度口径为文件内容字节数（不含 multipart 边界与文本字段），
//! 所有文件长度已知时总大小可计算；含长度未知的读取流时进度不可计算。

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, BoxStream, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, RequestBuilder};
use tokio::io::AsyncReadExt;

use crate::internal::auth::structs::upload_auth::UploadAuth;
use crate::internal::form::{OpenedContent, OpenedFile, OpenedValue, UploadForm};

use super::transfer_channel::{ProgressEmitter, TransferChannel, TransferSink};
use super::transfer_error::TransferError;
use super::transfer_event::TransportFailure;
use super::transport::Transport;

/// 默认每块读取大小：64KB，也是进度上报的粒度
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    auth: UploadAuth,
    chunk_size: usize,
}

impl HttpTransport {
    pub fn new(auth: UploadAuth) -> Self {
        Self {
            auth,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// 设置每块读取大小（字节），最小为 1
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn start(&self, form: UploadForm) -> Result<TransferChannel, TransferError> {
        let url = self.auth.resolve(&form.action)?;
        let opened = form.open().await?;

        let (channel, sink) = TransferChannel::open();
        let emitter = sink.progress_emitter(opened.total);
        let multipart = build_multipart(opened.fields, emitter, self.chunk_size)?;

        log::debug!("POST {url}，文件总字节数 {:?}", opened.total);
        let request = self.auth.client.post(url).multipart(multipart);
        tokio::spawn(run_transfer(request, sink));

        Ok(channel)
    }
}

/// 后台执行请求：中止命令优先于请求结果。
async fn run_transfer(request: RequestBuilder, mut sink: TransferSink) {
    let result = tokio::select! {
        biased;

        _ = sink.abort_requested() => Err(TransportFailure::aborted()),

        response = request.send() => match response {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    Ok(status.as_u16())
                } else {
                    Err(TransportFailure::status(status.as_u16(), status.canonical_reason()))
                }
            }
            Err(e) => Err(TransportFailure::network(e.to_string())),
        },
    };

    match result {
        Ok(status) => sink.succeed(status),
        Err(failure) => {
            log::debug!("上传请求失败: {failure}");
            sink.fail(failure)
        }
    }
}

fn build_multipart(
    fields: Vec<(String, OpenedValue)>,
    emitter: ProgressEmitter,
    chunk_size: usize,
) -> Result<Form, reqwest::Error> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = match value {
            OpenedValue::Text(text) => form.text(name, text),
            OpenedValue::File(file) => {
                form.part(name, file_part(file, emitter.clone(), chunk_size)?)
            }
        };
    }
    Ok(form)
}

fn file_part(
    file: OpenedFile,
    emitter: ProgressEmitter,
    chunk_size: usize,
) -> Result<Part, reqwest::Error> {
    let body = Body::wrap_stream(counted_stream(file.content, emitter, chunk_size));
    let part = match file.len {
        Some(len) => Part::stream_with_length(body, len),
        None => Part::stream(body),
    }
    .file_name(file.file_name);

    match file.mime {
        Some(mime) => part.mime_str(&mime),
        None => Ok(part),
    }
}

/// 把文件内容切成块，每块被读取时累计进度
fn counted_stream(
    content: OpenedContent,
    emitter: ProgressEmitter,
    chunk_size: usize,
) -> BoxStream<'static, std::io::Result<Bytes>> {
    match content {
        OpenedContent::Bytes(bytes) => {
            let chunks: Vec<Bytes> = (0..bytes.len())
                .step_by(chunk_size)
                .map(|start| bytes.slice(start..(start + chunk_size).min(bytes.len())))
                .collect();
            stream::iter(chunks)
                .map(move |chunk| {
                    emitter.advance(chunk.len() as u64);
                    Ok(chunk)
                })
                .boxed()
        }
        OpenedContent::Reader(reader) => stream::try_unfold(reader, move |mut reader| {
            let emitter = emitter.clone();
            async move {
                let mut buf = vec![0u8; chunk_size];
                let n = reader.read(&mut buf).await?;
                if n == 0 {
                    return Ok(None);
                }
                buf.truncate(n);
                emitter.advance(n as u64);
                Ok::<_, std::io::Error>(Some((Bytes::from(buf), reader)))
            }
        })
        .boxed(),
    }
}
