//! 页面可见元素的抽象。
//!
//! 核心逻辑只通过本 trait 写界面：标题、进度条、转圈、提示框、跳转，
//! 以及删除确认框和文件选择回显。嵌入方（终端界面、wasm 绑定、测试替身）各自实现。

use url::Url;

/// 进度条：宽度、aria 值、文字都由同一个百分比生成，三者始终一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressBar {
    percent: u8,
}

impl ProgressBar {
    /// 超过 100 按 100 处理
    pub fn new(percent: u8) -> Self {
        Self {
            percent: percent.min(100),
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// CSS 宽度，如 `"50%"`
    pub fn width(&self) -> String {
        format!("{}%", self.percent)
    }

    /// `aria-valuenow`
    pub fn aria_value_now(&self) -> u8 {
        self.percent
    }

    /// 进度条内的文字，与宽度相同
    pub fn label(&self) -> String {
        self.width()
    }
}

pub trait UploadView: Send {
    /// 当前窗口标题
    fn title(&self) -> String;

    fn set_title(&mut self, title: &str);

    fn set_progress(&mut self, bar: ProgressBar);

    /// 进度条「进行中」样式
    fn set_progress_active(&mut self, active: bool);

    fn set_spinner_visible(&mut self, visible: bool);

    /// 阻塞式提示框
    fn alert(&mut self, message: &str);

    /// 浏览器跳转
    fn navigate(&mut self, location: &Url);

    /// 阻塞式确认框，返回用户是否同意
    fn confirm(&mut self, message: &str) -> bool;

    /// 写入文件选择框旁的文字；没有这样的文字框时返回 `false`。
    fn set_file_label(&mut self, _label: &str) -> bool {
        false
    }
}
