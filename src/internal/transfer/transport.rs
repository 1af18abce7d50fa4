//! 传输层 trait：页面只依赖它来发起请求。

use async_trait::async_trait;

use crate::internal::form::UploadForm;

use super::transfer_channel::TransferChannel;
use super::transfer_error::TransferError;

/// 发起一次表单上传。
///
/// 实现方负责：打开表单的文件来源、安装进度计数、在后台发出 POST，
/// 并通过返回的 [`TransferChannel`] 上报进度与唯一的终止事件。
/// 请求发出前的失败以 `Err` 返回，由页面当作本地失败处理。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn start(&self, form: UploadForm) -> Result<TransferChannel, TransferError>;
}
