//! 页面领域模块：上传生命周期状态机及其界面。
//!
//! - [`submission_trigger`]：提交触发
//! - [`progress_reporter`]：进度换算与显示
//! - [`outcome_resolver`]：成功 / 取消 / 失败的判定与界面收尾
//! - [`upload_page`]：把上面几部分串起来的事件循环

pub mod affordances;
pub mod outcome;
pub mod outcome_resolver;
pub mod page_error;
pub mod progress_reporter;
pub mod reactive_view;
pub mod submission_trigger;
pub mod upload_config;
pub mod upload_page;
pub mod upload_session;
pub mod upload_view;

pub use outcome::Outcome;
pub use page_error::PageError;
pub use reactive_view::{ReactiveView, ViewState};
pub use upload_config::UploadConfig;
pub use upload_page::{PageCommand, PageHandle, PageStatus, UploadPage};
pub use upload_session::{UploadSession, UploadState};
pub use upload_view::{ProgressBar, UploadView};
