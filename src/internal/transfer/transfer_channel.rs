//! 传输通道：一次请求的控制端与传输端。
//!
//! - [`TransferChannel`]（控制端）：持有 [`TransferHandle`] 用于中止，按顺序读取 [`TransferEvent`]；
//! - [`TransferSink`]（传输端）：上报进度、等待中止命令、提交唯一的终止事件。
//!
//! 事件与命令都走 [`CommandQueue`]，FIFO 保证进度一定先于终止事件。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::internal::states::command_queue::{CommandConsumer, CommandQueue};

use super::progress_sample::ProgressSample;
use super::transfer_event::{TransferEvent, TransportFailure};

/// 控制端发往传输端的命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferCommand {
    Abort,
}

/// 请求句柄：会话保存它，之后的取消操作通过它中止请求。
#[derive(Debug, Clone)]
pub struct TransferHandle {
    commands: CommandQueue<TransferCommand>,
    abort_sent: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

impl TransferHandle {
    /// 请求仍在进行且尚未发出过中止
    pub fn can_abort(&self) -> bool {
        !self.finished.load(Ordering::SeqCst) && !self.abort_sent.load(Ordering::SeqCst)
    }

    /// 中止请求。只有真正发出中止命令的那一次调用返回 `true`；
    /// 请求已结束或已中止过时什么也不做。
    pub fn abort(&self) -> bool {
        if self.finished.load(Ordering::SeqCst) {
            return false;
        }
        if self.abort_sent.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.commands.send(TransferCommand::Abort).is_ok()
    }

    /// 传输端是否已提交终止事件
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

/// 控制端
#[derive(Debug)]
pub struct TransferChannel {
    handle: TransferHandle,
    events: CommandConsumer<TransferEvent>,
}

impl TransferChannel {
    /// 创建一对 (控制端, 传输端)
    pub fn open() -> (TransferChannel, TransferSink) {
        let (commands, command_consumer) = CommandQueue::new();
        let (events, event_consumer) = CommandQueue::new();
        let finished = Arc::new(AtomicBool::new(false));

        let channel = TransferChannel {
            handle: TransferHandle {
                commands,
                abort_sent: Arc::new(AtomicBool::new(false)),
                finished: Arc::clone(&finished),
            },
            events: event_consumer,
        };
        let sink = TransferSink {
            events,
            commands: command_consumer,
            finished,
        };

        (channel, sink)
    }

    pub fn handle(&self) -> TransferHandle {
        self.handle.clone()
    }

    /// 读取下一条事件。
    ///
    /// 传输端未提交终止事件就被销毁时，返回一个网络失败作为终止事件。
    /// 拿到终止事件后应丢弃本通道。
    pub async fn next_event(&mut self) -> TransferEvent {
        match self.events.recv().await {
            Some(event) => event,
            None => TransferEvent::Failed(TransportFailure::network("传输通道已关闭")),
        }
    }
}

/// 传输端
#[derive(Debug)]
pub struct TransferSink {
    events: CommandQueue<TransferEvent>,
    commands: CommandConsumer<TransferCommand>,
    finished: Arc<AtomicBool>,
}

impl TransferSink {
    /// 上报一次进度；控制端已关闭时静默丢弃。
    pub fn progress(&self, sample: ProgressSample) {
        if self.finished.load(Ordering::SeqCst) {
            return;
        }
        let _ = self.events.send(TransferEvent::Progress(sample));
    }

    /// 生成一个累计字节计数器，供请求体流在被读取时上报进度。
    pub fn progress_emitter(&self, total: Option<u64>) -> ProgressEmitter {
        ProgressEmitter {
            events: self.events.clone(),
            loaded: Arc::new(AtomicU64::new(0)),
            total,
            finished: Arc::clone(&self.finished),
        }
    }

    /// 等待中止命令。控制端全部销毁后永不返回。
    pub async fn abort_requested(&mut self) {
        match self.commands.recv().await {
            Some(TransferCommand::Abort) => {}
            None => std::future::pending::<()>().await,
        }
    }

    pub fn succeed(self, status: u16) {
        self.finish(TransferEvent::Succeeded { status });
    }

    pub fn fail(self, failure: TransportFailure) {
        self.finish(TransferEvent::Failed(failure));
    }

    // 消耗 self，保证每个请求最多一个终止事件
    fn finish(self, event: TransferEvent) {
        self.finished.store(true, Ordering::SeqCst);
        let _ = self.events.send(event);
    }
}

/// 请求体字节计数器，可 Clone 到多个文件分段的流中共享同一个累计值。
#[derive(Debug, Clone)]
pub struct ProgressEmitter {
    events: CommandQueue<TransferEvent>,
    loaded: Arc<AtomicU64>,
    total: Option<u64>,
    finished: Arc<AtomicBool>,
}

impl ProgressEmitter {
    /// 累加已发送字节并上报最新进度
    pub fn advance(&self, bytes: u64) {
        let loaded = self.loaded.fetch_add(bytes, Ordering::SeqCst) + bytes;
        if self.finished.load(Ordering::SeqCst) {
            return;
        }
        let _ = self
            .events
            .send(TransferEvent::Progress(ProgressSample::new(loaded, self.total)));
    }
}
