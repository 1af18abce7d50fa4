//! 上传页面
//!
//! 一个 tokio 任务独占界面、传输层和会话，循环处理两类输入：
//!
//! - **页面命令**：经 [`PageHandle`] 发送（提交、取消、删除、文件选择、关闭）；
//! - **传输事件**：来自当前请求的 [`TransferChannel`]（进度、终止事件）。
//!
//! 两者同时就绪时优先处理页面命令，取消因此不会排在进度事件后面。
//! 收到终止事件后立即丢弃通道，之后传输端再发什么都不会到达结果判定。
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use form_uploader::auth::UploadAuth;
//! # use form_uploader::form::{FileField, UploadForm};
//! # use form_uploader::page::{ReactiveView, UploadPage};
//! # use form_uploader::transfer::HttpTransport;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = UploadAuth::basic("http://localhost:8080/", "rw", "secret")?;
//! let view = ReactiveView::new("Files");
//! let (page, handle) = UploadPage::new(
//!     view.clone(),
//!     HttpTransport::new(auth.clone()),
//!     (*auth.base_url).clone(),
//! );
//! tokio::spawn(page.run());
//!
//! let form = UploadForm::new("upload").file("f", FileField::from_path("report.pdf"));
//! handle.submit(form).ok();
//! // 用户点击取消
//! handle.cancel().ok();
//! # Ok(())
//! # }
//! ```

use std::ops::ControlFlow;

use url::Url;

use crate::internal::form::UploadForm;
use crate::internal::states::command_queue::{CommandConsumer, CommandQueue};
use crate::internal::states::reactive_property::ReactiveProperty;
use crate::internal::transfer::{TransferChannel, TransferEvent, Transport, TransportFailure};

use super::affordances::{confirm_delete, echo_file_label};
use super::outcome::Outcome;
use super::outcome_resolver::{request_cancel, resolve_failure, resolve_success};
use super::page_error::PageError;
use super::progress_reporter::report_progress;
use super::submission_trigger::{attach_transfer, begin_submission};
use super::upload_config::UploadConfig;
use super::upload_session::{UploadSession, UploadState};
use super::upload_view::UploadView;

/// 页面命令（通过 CommandQueue 传递，FIFO 保证顺序）
#[derive(Debug)]
pub enum PageCommand {
    Submit(UploadForm),
    Cancel,
    /// 点击删除链接，参数为链接地址
    Delete(Url),
    /// 文件选择框变化，参数为选中文件的路径
    SelectFiles(Vec<String>),
    Close,
}

/// 页面对外可观察的状态
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageStatus {
    pub state: UploadState,
    /// 已结束的会话数
    pub finished_sessions: u64,
    pub last_outcome: Option<Outcome>,
    /// 因已有上传进行中而被拒绝的提交数
    pub rejected_submissions: u64,
}

/// 页面句柄：可 Clone，随处发送命令、订阅状态。
#[derive(Debug, Clone)]
pub struct PageHandle {
    commands: CommandQueue<PageCommand>,
    status: ReactiveProperty<PageStatus>,
}

impl PageHandle {
    /// 提交表单（页面已关闭时退回命令）
    pub fn submit(&self, form: UploadForm) -> Result<(), PageCommand> {
        self.commands.send(PageCommand::Submit(form))
    }

    pub fn cancel(&self) -> Result<(), PageCommand> {
        self.commands.send(PageCommand::Cancel)
    }

    pub fn delete(&self, target: Url) -> Result<(), PageCommand> {
        self.commands.send(PageCommand::Delete(target))
    }

    pub fn select_files(&self, paths: Vec<String>) -> Result<(), PageCommand> {
        self.commands.send(PageCommand::SelectFiles(paths))
    }

    pub fn close(&self) -> Result<(), PageCommand> {
        self.commands.send(PageCommand::Close)
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    pub fn status(&self) -> ReactiveProperty<PageStatus> {
        self.status.clone()
    }
}

pub struct UploadPage<V, T> {
    view: V,
    transport: T,
    session: UploadSession,
    config: UploadConfig,
    site_root: Url,
    commands: CommandConsumer<PageCommand>,
    channel: Option<TransferChannel>,
    status: ReactiveProperty<PageStatus>,
}

enum Step {
    Command(Option<PageCommand>),
    Transfer(TransferEvent),
}

/// 内部实现
impl<V, T> UploadPage<V, T>
where
    V: UploadView + 'static,
    T: Transport + 'static,
{
    /// 创建页面。原始标题在此时从界面读取，之后不再变化。
    ///
    /// `site_root` 是站点基础地址，成功后的跳转目标相对它解析。
    pub fn new(view: V, transport: T, site_root: Url) -> (Self, PageHandle) {
        let (commands, consumer) = CommandQueue::new();
        let status = ReactiveProperty::new(PageStatus::default());
        let session = UploadSession::new(view.title());

        let page = Self {
            view,
            transport,
            session,
            config: UploadConfig::default(),
            site_root,
            commands: consumer,
            channel: None,
            status: status.clone(),
        };

        (page, PageHandle { commands, status })
    }

    pub fn with_config(mut self, config: UploadConfig) -> Self {
        self.config = config;
        self
    }

    /// 运行事件循环，直到收到关闭命令或所有句柄都被销毁；返回界面。
    pub async fn run(mut self) -> V {
        loop {
            let step = tokio::select! {
                biased;

                command = self.commands.recv() => Step::Command(command),
                event = next_event(&mut self.channel) => Step::Transfer(event),
            };

            match step {
                Step::Command(None) => break,
                Step::Command(Some(command)) => {
                    if self.on_command(command).await.is_break() {
                        break;
                    }
                }
                Step::Transfer(event) => self.on_transfer_event(event),
            }
        }

        if let Some(handle) = self.session.transfer_handle() {
            handle.abort();
        }
        self.view
    }

    /// 处理一条页面命令；关闭命令返回 `Break`，其余返回 `Continue`。
    async fn on_command(&mut self, command: PageCommand) -> ControlFlow<()> {
        match command {
            PageCommand::Submit(form) => {
                if let Err(e) = self.submit(form).await {
                    log::warn!("{e}");
                    self.status.update_field(|s| s.rejected_submissions += 1);
                }
            }
            PageCommand::Cancel => {
                if request_cancel(&mut self.session) {
                    log::info!("用户取消上传，已中止请求");
                }
            }
            PageCommand::Delete(target) => {
                if confirm_delete(&mut self.view, &self.config.delete_prompt, &target) {
                    log::info!("确认删除: {target}");
                }
            }
            PageCommand::SelectFiles(paths) => {
                echo_file_label(&mut self.view, &paths);
            }
            PageCommand::Close => {
                log::info!("页面关闭");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    async fn submit(&mut self, form: UploadForm) -> Result<(), PageError> {
        begin_submission(&mut self.session, &mut self.view)?;
        self.status.update_field(|s| s.state = UploadState::InFlight);
        log::info!("开始上传: action = {:?}", form.action);

        match self.transport.start(form).await {
            Ok(channel) => {
                attach_transfer(&mut self.session, channel.handle());
                self.channel = Some(channel);
            }
            Err(e) => {
                let failure = TransportFailure::local(e.to_string());
                self.on_failure(failure);
            }
        }
        Ok(())
    }

    fn on_transfer_event(&mut self, event: TransferEvent) {
        match event {
            TransferEvent::Progress(sample) => {
                if let Some(percent) = report_progress(&mut self.view, &sample) {
                    log::debug!("上传进度 {percent}%");
                }
            }
            TransferEvent::Succeeded { status } => {
                self.channel = None;
                log::info!("上传成功，HTTP {status}");
                let home = self.home();
                let outcome = resolve_success(&mut self.session, &mut self.view, &home);
                self.publish(outcome);
            }
            TransferEvent::Failed(failure) => {
                self.channel = None;
                self.on_failure(failure);
            }
        }
    }

    fn on_failure(&mut self, failure: TransportFailure) {
        if self.session.cancel_requested() {
            log::info!("上传已取消（{failure}）");
        } else {
            log::warn!("上传失败: {failure}");
        }
        let outcome = resolve_failure(
            &mut self.session,
            &mut self.view,
            failure,
            &self.config.alert_prefix,
        );
        self.publish(outcome);
    }

    fn home(&self) -> Url {
        match self.site_root.join(&self.config.home_location) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("首页地址无效 {:?}: {e}，改用站点根地址", self.config.home_location);
                self.site_root.clone()
            }
        }
    }

    fn publish(&self, outcome: Outcome) {
        self.status.update_field(|s| {
            s.state = UploadState::Idle;
            s.finished_sessions += 1;
            s.last_outcome = Some(outcome);
        });
    }
}

/// 没有进行中的请求时永远挂起，让 select! 只等页面命令
async fn next_event(channel: &mut Option<TransferChannel>) -> TransferEvent {
    match channel {
        Some(channel) => channel.next_event().await,
        None => std::future::pending().await,
    }
}
