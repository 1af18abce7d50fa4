/// 内部实现模块
mod internal;


pub mod auth {
    use crate::internal;
    pub use internal::auth::structs::upload_auth::{AuthError, UploadAuth};
}

/// 表单模型：字段、文件来源、文件选择回显
pub mod form {
    use crate::internal;
    pub use internal::form::*;
}

/// 传输层：请求句柄、进度采样、终止事件与 reqwest 实现。
/// 自定义传输（如 wasm 里的 XHR）实现 [`transfer::Transport`] 即可接入页面。
pub mod transfer {
    use crate::internal;
    pub use internal::transfer::*;
}

/// 上传生命周期状态机与页面事件循环
pub mod page {
    use crate::internal;
    pub use internal::page::*;
    pub use internal::page::affordances::{confirm_delete, echo_file_label};
    pub use internal::page::outcome_resolver::{
        alert_message, request_cancel, resolve_failure, resolve_success,
    };
    pub use internal::page::progress_reporter::{progress_title, report_progress};
    pub use internal::page::submission_trigger::{
        attach_transfer, begin_submission, reset_view,
    };
}

pub mod states {
    pub mod reactive_property {
        use crate::internal;
        pub use internal::states::reactive_property::*;
    }

    pub mod command_queue {
        use crate::internal;
        pub use internal::states::command_queue::*;
    }
}
