use crate::internal::transfer::TransferHandle;

/// 上传状态：`Idle → InFlight → (终止) → Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    InFlight,
}

/// 一次上传尝试的会话数据，由页面独占，按引用传给各处理函数。
#[derive(Debug)]
pub struct UploadSession {
    pub(crate) state: UploadState,
    /// 进行中请求的句柄，终止时清空
    pub(crate) transfer_handle: Option<TransferHandle>,
    /// 仅由取消操作置位，仅由失败处理读取；下次提交时复位
    pub(crate) cancel_requested: bool,
    /// 页面加载时的标题，会话期间不变
    original_title: String,
}

impl UploadSession {
    pub fn new(original_title: impl Into<String>) -> Self {
        Self {
            state: UploadState::Idle,
            transfer_handle: None,
            cancel_requested: false,
            original_title: original_title.into(),
        }
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.state == UploadState::InFlight
    }

    pub fn cancel_requested(&self) -> bool {
        self.cancel_requested
    }

    pub fn transfer_handle(&self) -> Option<&TransferHandle> {
        self.transfer_handle.as_ref()
    }

    pub fn original_title(&self) -> &str {
        &self.original_title
    }

    // 终止：释放句柄，回到 Idle。取消标志保留到下次提交
    pub(crate) fn terminate(&mut self) {
        self.transfer_handle = None;
        self.state = UploadState::Idle;
    }
}
