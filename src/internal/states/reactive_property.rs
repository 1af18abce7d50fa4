//! # ReactiveProperty：可监听的页面状态
//!
//! 基于 [`tokio::sync::watch`] 的响应式属性：写入方 `update` / `update_field`，
//! 任意数量的读取方通过 [`ReactiveProperty::watch`] 异步等待变化。
//!
//! 页面的可见状态（标题、进度条、转圈）和最近一次上传结果都存放在这里，
//! 前端只需订阅即可刷新界面。

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tokio::sync::watch::error::RecvError;

/// 响应式属性错误
#[derive(Debug, Error)]
pub enum ReactivePropertyError {
    /// 所有属性句柄都已销毁，不会再有新值
    #[error("属性已被销毁")]
    Destroyed,

    /// watch 通道接收失败
    #[error("接收失败: {0}")]
    Recv(#[from] RecvError),
}

/// 响应式属性：可 Clone，所有克隆共享同一个值。
#[derive(Clone, Debug)]
pub struct ReactiveProperty<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// 整体替换当前值，所有监听者都会收到通知。
    pub fn update(&self, new_value: T) {
        self.sender.send_replace(new_value);
    }

    /// 用闭包就地修改部分字段，返回闭包的结果。
    ///
    /// 在 watch 的写锁内执行，多个写入方并发修改不会互相覆盖。
    /// 无论是否有监听者都会写入，监听者会收到一次通知。
    pub fn update_field<F, R>(&self, updater: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut result = None;
        self.sender.send_modify(|value| result = Some(updater(value)));
        // send_modify 同步调用闭包恰好一次
        match result {
            Some(result) => result,
            None => unreachable!("send_modify 未调用修改闭包"),
        }
    }

    /// 当前值的快照（clone）。
    pub fn get_current(&self) -> T {
        self.sender.borrow().clone()
    }

    /// 对当前值做只读映射，避免整体 clone。
    pub fn map<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.sender.borrow())
    }

    /// 创建一个监听器。监听器只会看到创建之后的变化。
    pub fn watch(&self) -> PropertyWatcher<T> {
        let mut receiver = self.sender.subscribe();
        receiver.mark_unchanged();
        PropertyWatcher { receiver }
    }
}

/// 属性监听器
#[derive(Debug)]
pub struct PropertyWatcher<T> {
    receiver: watch::Receiver<T>,
}

impl<T> PropertyWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 等待下一次变化并返回新值。
    ///
    /// 多次快速更新可能被合并，只保证拿到最新值。
    pub async fn changed(&mut self) -> Result<T, ReactivePropertyError> {
        self.receiver.changed().await?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// 等待直到当前值满足条件，返回满足条件的值。
    pub async fn wait_until<F>(&mut self, mut predicate: F) -> Result<T, ReactivePropertyError>
    where
        F: FnMut(&T) -> bool,
    {
        let value = self
            .receiver
            .wait_for(|v| predicate(v))
            .await
            .map_err(|_| ReactivePropertyError::Destroyed)?;
        Ok(value.clone())
    }

    /// 同步读取当前值。
    pub fn borrow(&self) -> T {
        self.receiver.borrow().clone()
    }
}
