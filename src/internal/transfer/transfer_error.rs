//! 请求发出之前的错误。请求发出之后的失败一律走 [`TransportFailure`](super::TransportFailure)。

use thiserror::Error;

use crate::internal::auth::structs::upload_auth::AuthError;
use crate::internal::form::FormError;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("表单地址无效: {0}")]
    Action(#[from] AuthError),

    #[error("表单准备失败: {0}")]
    Form(#[from] FormError),

    #[error("构建请求失败: {0}")]
    Request(#[from] reqwest::Error),
}
