//! 传输通道上流动的事件。

use std::fmt;

use super::progress_sample::ProgressSample;

/// 传输事件：任意多个 `Progress`，之后恰好一个终止事件（`Succeeded` 或 `Failed`）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEvent {
    Progress(ProgressSample),
    /// 服务端返回 2xx
    Succeeded { status: u16 },
    Failed(TransportFailure),
}

/// 失败类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 请求被中止（取消）
    Aborted,
    /// 网络层失败：连接、发送或通道意外关闭
    Network,
    /// 服务端返回非 2xx 状态码
    Status(u16),
    /// 请求发出之前的本地失败：地址非法、文件无法打开等
    Local,
}

/// 传输层报告的失败，包含状态文字和错误描述。
///
/// 中止也以失败的形式上报，是否属于用户取消由会话的取消标志决定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub kind: FailureKind,
    pub status_text: String,
    pub description: String,
}

impl TransportFailure {
    pub fn aborted() -> Self {
        Self {
            kind: FailureKind::Aborted,
            status_text: "abort".to_string(),
            description: "请求已中止".to_string(),
        }
    }

    pub fn network(description: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Network,
            status_text: "error".to_string(),
            description: description.into(),
        }
    }

    /// 由 HTTP 状态码构造，描述取标准原因短语（如 `Internal Server Error`）
    pub fn status(code: u16, reason: Option<&str>) -> Self {
        Self {
            kind: FailureKind::Status(code),
            status_text: "error".to_string(),
            description: match reason {
                Some(reason) => format!("{code} {reason}"),
                None => code.to_string(),
            },
        }
    }

    pub fn local(description: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Local,
            status_text: "error".to_string(),
            description: description.into(),
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status_text, self.description)
    }
}
