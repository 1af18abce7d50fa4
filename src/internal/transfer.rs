//! 传输领域模块：请求句柄、进度采样、终止事件，以及基于 reqwest 的实现。
//!
//! 页面通过 [`Transport`] 发起请求，拿到 [`TransferChannel`] 后只读事件、必要时中止。

pub mod http_transport;
pub mod progress_sample;
pub mod transfer_channel;
pub mod transfer_error;
pub mod transfer_event;
pub mod transport;

pub use http_transport::{DEFAULT_CHUNK_SIZE, HttpTransport};
pub use progress_sample::ProgressSample;
pub use transfer_channel::{
    ProgressEmitter, TransferChannel, TransferCommand, TransferHandle, TransferSink,
};
pub use transfer_error::TransferError;
pub use transfer_event::{FailureKind, TransferEvent, TransportFailure};
pub use transport::Transport;
