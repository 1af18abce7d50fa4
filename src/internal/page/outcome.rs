use crate::internal::transfer::TransportFailure;

/// 一次上传的最终结果，每个会话恰好一个。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// 用户取消，不提示
    Cancelled,
    Error(TransportFailure),
}
