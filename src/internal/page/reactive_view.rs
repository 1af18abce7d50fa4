//! 无界面实现：所有可见元素保存在一个响应式状态里，前端订阅后自行渲染。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use url::Url;

use crate::internal::states::reactive_property::ReactiveProperty;

use super::upload_view::{ProgressBar, UploadView};

/// 页面可见状态快照
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub title: String,
    pub progress: ProgressBar,
    pub progress_active: bool,
    pub spinner_visible: bool,
    /// 按顺序记录的提示框内容
    pub alerts: Vec<String>,
    /// 最近一次跳转目标
    pub location: Option<Url>,
    /// 文件选择回显文字
    pub file_label: Option<String>,
}

/// 基于 [`ReactiveProperty`] 的 [`UploadView`]。Clone 后共享同一份状态。
#[derive(Debug, Clone)]
pub struct ReactiveView {
    state: ReactiveProperty<ViewState>,
    confirm_answer: Arc<AtomicBool>,
    has_label_display: bool,
}

impl ReactiveView {
    /// 以页面初始标题创建；确认框默认回答「是」，默认带文件名文字框。
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            state: ReactiveProperty::new(ViewState {
                title: title.into(),
                ..Default::default()
            }),
            confirm_answer: Arc::new(AtomicBool::new(true)),
            has_label_display: true,
        }
    }

    /// 页面上没有文件名文字框，回显改走提示框
    pub fn without_label_display(mut self) -> Self {
        self.has_label_display = false;
        self
    }

    /// 设置之后确认框的回答
    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    /// 可监听的状态句柄
    pub fn state(&self) -> ReactiveProperty<ViewState> {
        self.state.clone()
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.get_current()
    }
}

impl UploadView for ReactiveView {
    fn title(&self) -> String {
        self.state.map(|s| s.title.clone())
    }

    fn set_title(&mut self, title: &str) {
        self.state.update_field(|s| s.title = title.to_string());
    }

    fn set_progress(&mut self, bar: ProgressBar) {
        self.state.update_field(|s| s.progress = bar);
    }

    fn set_progress_active(&mut self, active: bool) {
        self.state.update_field(|s| s.progress_active = active);
    }

    fn set_spinner_visible(&mut self, visible: bool) {
        self.state.update_field(|s| s.spinner_visible = visible);
    }

    fn alert(&mut self, message: &str) {
        self.state.update_field(|s| s.alerts.push(message.to_string()));
    }

    fn navigate(&mut self, location: &Url) {
        self.state.update_field(|s| s.location = Some(location.clone()));
    }

    fn confirm(&mut self, _message: &str) -> bool {
        self.confirm_answer.load(Ordering::SeqCst)
    }

    fn set_file_label(&mut self, label: &str) -> bool {
        if !self.has_label_display {
            return false;
        }
        self.state.update_field(|s| s.file_label = Some(label.to_string()));
        true
    }
}
