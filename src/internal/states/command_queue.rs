//! # CommandQueue：单向 FIFO 命令队列
//!
//! 基于 `tokio::sync::mpsc::unbounded_channel`：
//! - 生产者可 Clone，多处同时发送；
//! - 消费者唯一，按发送顺序消费；
//! - 发送不阻塞，接收端关闭时把命令原样退回给调用方。
//!
//! 用于两处：页面命令（提交 / 取消 / 删除 …）和传输通道（进度、终止事件、中止命令）。
//! 同一队列内的顺序即事件顺序，进度事件因此一定先于终止事件到达。

use tokio::sync::mpsc;

/// 命令队列生产者端
#[derive(Debug)]
pub struct CommandQueue<T> {
    sender: mpsc::UnboundedSender<T>,
}

impl<T> Clone for CommandQueue<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// 命令队列消费者端，不可 Clone
#[derive(Debug)]
pub struct CommandConsumer<T> {
    receiver: mpsc::UnboundedReceiver<T>,
}

impl<T> CommandQueue<T> {
    /// 创建队列，返回 (生产者, 消费者)。
    pub fn new() -> (Self, CommandConsumer<T>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, CommandConsumer { receiver })
    }

    /// 发送命令；消费者已销毁时返回 `Err(命令)`。
    pub fn send(&self, value: T) -> Result<(), T> {
        self.sender.send(value).map_err(|e| e.0)
    }

    /// 消费者是否已销毁
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<T> CommandConsumer<T> {
    /// 等待下一条命令；所有生产者都销毁后返回 `None`。
    pub async fn recv(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// 非阻塞读取，队列为空时返回 `None`。
    pub fn try_recv(&mut self) -> Option<T> {
        self.receiver.try_recv().ok()
    }
}
