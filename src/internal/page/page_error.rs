use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("已有上传进行中，拒绝重复提交")]
    AlreadyInFlight,
}
