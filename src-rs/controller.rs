use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::backend::{ExecuteTaskRequest, TaskBackend};
use crate::config::ConsoleConfig;
use crate::console::{ConsoleLog, LogLevel};
use crate::error::ConsoleError;
use crate::helpers::log_file_name;
use crate::task::{TaskHistory, TaskRecord, TaskStatus};
use crate::view::{render_history, TemplateKind, Theme, Viewport, DEFAULT_URL};

const WELCOME_LINES: [&str; 3] = [
    "Welcome to the browser automation console",
    "Describe a task on the left, then press \"Run task\"",
    "Try \"在百度搜索人工智能\" (search Baidu for AI) or \"登录GitHub\" (sign in to GitHub)",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TaskOptions {
    pub headless: bool,
    pub slow_mo: bool,
}

/// A submitted task whose backend call has not resolved yet.
#[derive(Clone, Debug)]
pub struct PendingTask {
    pub record: TaskRecord,
    pub request: ExecuteTaskRequest,
    generation: u64,
}

/// Handed out when a delayed viewport action starts; stale once another action replaces the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportTicket {
    generation: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogExport {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug)]
pub struct ViewState {
    pub input: String,
    pub options: TaskOptions,
    pub history: TaskHistory,
    pub console: ConsoleLog,
    pub theme: Theme,
    pub viewport: Viewport,
    pub url: String,
    pub help_open: bool,
    /// Bumped whenever the server rewrites `input` on its own (history pick, reset).
    pub input_revision: u64,
    retry_task: Option<String>,
    generation: u64,
    pending: usize,
}

impl ViewState {
    fn new(options: TaskOptions) -> Self {
        let mut console = ConsoleLog::new();
        for line in WELCOME_LINES {
            console.push(LogLevel::Info, line);
        }
        Self {
            input: String::new(),
            options,
            history: TaskHistory::new(),
            console,
            theme: Theme::default(),
            viewport: Viewport::Idle,
            url: DEFAULT_URL.to_string(),
            help_open: false,
            input_revision: 0,
            retry_task: None,
            generation: 0,
            pending: 0,
        }
    }

    fn replace_viewport(&mut self, viewport: Viewport) -> u64 {
        self.generation += 1;
        self.viewport = viewport;
        self.generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    fn rewrite_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.input_revision += 1;
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ViewSnapshot {
    pub input: String,
    pub input_revision: u64,
    pub headless: bool,
    pub slow_mo: bool,
    pub url: String,
    pub viewport: &'static str,
    pub viewport_html: String,
    pub retry_available: bool,
    pub history: Vec<TaskRecord>,
    pub history_html: String,
    pub console_html: String,
    pub console_lines: usize,
    pub theme: Theme,
    pub theme_icon: &'static str,
    pub body_classes: Vec<&'static str>,
    pub replaced_classes: Vec<&'static str>,
    pub help_open: bool,
    pub pending: usize,
}

pub struct ViewController {
    pub config: ConsoleConfig,
    backend: Arc<dyn TaskBackend>,
    state: Mutex<ViewState>,
}

impl ViewController {
    pub fn new(config: ConsoleConfig, backend: Arc<dyn TaskBackend>) -> Self {
        let options = TaskOptions {
            headless: config.headless,
            slow_mo: config.slow_mo,
        };
        Self {
            config,
            backend,
            state: Mutex::new(ViewState::new(options)),
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the locked state. Used by surfaces for read-only views.
    pub fn with_state<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        f(&self.state())
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.state();
        ViewSnapshot {
            input: state.input.clone(),
            input_revision: state.input_revision,
            headless: state.options.headless,
            slow_mo: state.options.slow_mo,
            url: state.url.clone(),
            viewport: state.viewport.kind(),
            viewport_html: state.viewport.render(),
            retry_available: state.viewport.is_retryable(),
            history: state.history.iter().cloned().collect(),
            history_html: render_history(state.history.iter()),
            console_html: state.console.render(),
            console_lines: state.console.len(),
            theme: state.theme,
            theme_icon: state.theme.icon_class(),
            body_classes: state.theme.body_classes().to_vec(),
            replaced_classes: state.theme.replaced_classes().to_vec(),
            help_open: state.help_open,
            pending: state.pending,
        }
    }

    pub fn set_input(&self, text: &str) {
        self.state().input = text.to_string();
    }

    pub fn set_options(&self, options: TaskOptions) {
        self.state().options = options;
    }

    pub fn options(&self) -> TaskOptions {
        self.state().options
    }

    /// Validates the task, records it as running and shows the loading card.
    /// An empty task only produces a console error.
    pub fn begin_submit(&self, task: &str) -> Result<PendingTask, ConsoleError> {
        let mut state = self.state();
        Self::start_task(&mut state, task)
    }

    /// Submission from the page form: the typed text plus optional option overrides.
    /// Input and options are only stored once the task passes validation, and the
    /// request is built under the same lock that stores them.
    pub fn begin_submit_form(
        &self,
        task: &str,
        headless: Option<bool>,
        slow_mo: Option<bool>,
    ) -> Result<PendingTask, ConsoleError> {
        let mut state = self.state();
        if task.trim().is_empty() {
            return Self::start_task(&mut state, task);
        }
        state.input = task.to_string();
        if let Some(headless) = headless {
            state.options.headless = headless;
        }
        if let Some(slow_mo) = slow_mo {
            state.options.slow_mo = slow_mo;
        }
        Self::start_task(&mut state, task)
    }

    fn start_task(state: &mut ViewState, task: &str) -> Result<PendingTask, ConsoleError> {
        let task = task.trim();
        if task.is_empty() {
            state.console.push(LogLevel::Error, ConsoleError::EmptyTask.to_string());
            return Err(ConsoleError::EmptyTask);
        }

        let record = state.history.start(task);
        state.console.push(LogLevel::Info, format!("Starting task: {}", task));
        let generation = state.replace_viewport(Viewport::loading("Analysing the task and driving the browser..."));
        state.pending += 1;

        info!(task_id = %record.id, task = %task, "task submitted");
        let request = ExecuteTaskRequest {
            task: task.to_string(),
            headless: state.options.headless,
            slow_mo: state.options.slow_mo,
        };
        Ok(PendingTask {
            record,
            request,
            generation,
        })
    }

    /// Applies the backend outcome for `pending`. Logs and the history record are
    /// always updated; the viewport only if nothing replaced it meanwhile.
    pub async fn finish_submit(&self, pending: PendingTask) -> Result<TemplateKind, ConsoleError> {
        let outcome = self.backend.execute(&pending.request).await;

        let mut state = self.state();
        state.pending = state.pending.saturating_sub(1);

        let result = match outcome {
            Ok(resp) => {
                for entry in &resp.logs {
                    state.console.push(entry.level, entry.message.clone());
                }
                if resp.success {
                    let kind = TemplateKind::select(&pending.request.task, resp.content().unwrap_or_default());
                    if state.is_current(pending.generation) {
                        state.url = resp.url().unwrap_or(DEFAULT_URL).to_string();
                        state.viewport = Viewport::from_response(kind, &pending.request.task, &resp);
                    } else {
                        debug!(task_id = %pending.record.id, "viewport moved on, keeping newer content");
                    }
                    Ok(kind)
                } else {
                    Err(ConsoleError::TaskFailed)
                }
            }
            Err(err) => Err(ConsoleError::from(err)),
        };

        match &result {
            Ok(kind) => {
                state.history.finish(&pending.record.id, TaskStatus::Completed)?;
                info!(task_id = %pending.record.id, template = ?kind, "task completed");
            }
            Err(err) => {
                let message = err.to_string();
                state.console.push(LogLevel::Error, format!("Error: {}", message));
                state.history.finish(&pending.record.id, TaskStatus::Failed)?;
                warn!(task_id = %pending.record.id, error = %message, "task failed");
                if state.is_current(pending.generation) {
                    state.viewport = Viewport::Failed { message };
                    state.retry_task = Some(pending.request.task.clone());
                }
            }
        }
        result
    }

    pub async fn submit(&self, task: &str) -> Result<TemplateKind, ConsoleError> {
        let pending = self.begin_submit(task)?;
        self.finish_submit(pending).await
    }

    pub fn spawn_finish_submit(self: &Arc<Self>, pending: PendingTask) -> JoinHandle<Result<TemplateKind, ConsoleError>> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.finish_submit(pending).await })
    }

    /// Starts the failed task over as a new submission.
    pub fn begin_retry(&self) -> Result<PendingTask, ConsoleError> {
        let task = {
            let state = self.state();
            match (&state.viewport, &state.retry_task) {
                (Viewport::Failed { .. }, Some(task)) => task.clone(),
                _ => return Err(ConsoleError::NothingToRetry),
            }
        };
        self.begin_submit(&task)
    }

    pub async fn retry(&self) -> Result<TemplateKind, ConsoleError> {
        let pending = self.begin_retry()?;
        self.finish_submit(pending).await
    }

    /// Copies the task text of the history entry at `index` (newest first) into the input box.
    pub fn select_history(&self, index: usize) -> Result<String, ConsoleError> {
        let mut state = self.state();
        let name = state
            .history
            .get(index)
            .map(|record| record.name.clone())
            .ok_or(ConsoleError::HistoryIndex(index))?;
        state.rewrite_input(&name);
        Ok(name)
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        self.state().console.push(level, message);
    }

    pub fn clear_log(&self) {
        self.state().console.clear();
    }

    pub fn export_log(&self) -> LogExport {
        let content = self.state().console.export_text();
        LogExport {
            file_name: log_file_name(Utc::now()),
            content,
        }
    }

    pub fn begin_refresh(&self) -> ViewportTicket {
        let mut state = self.state();
        let url = state.url.clone();
        state.console.push(LogLevel::Info, format!("Refreshing page: {}", url));
        let generation = state.replace_viewport(Viewport::loading("Refreshing..."));
        state.pending += 1;
        ViewportTicket { generation }
    }

    /// Returns false when a newer action already replaced the placeholder.
    pub fn finish_refresh(&self, ticket: ViewportTicket) -> bool {
        let mut state = self.state();
        state.pending = state.pending.saturating_sub(1);
        if !state.is_current(ticket.generation) {
            debug!(generation = ticket.generation, "dropping stale refresh");
            return false;
        }
        state.console.push(LogLevel::Info, "Page refreshed");
        let url = state.url.clone();
        state.viewport = Viewport::Refreshed { url, at: Utc::now() };
        true
    }

    pub async fn refresh(&self) -> bool {
        let ticket = self.begin_refresh();
        tokio::time::sleep(self.config.refresh_delay).await;
        self.finish_refresh(ticket)
    }

    pub fn spawn_finish_refresh(self: &Arc<Self>, ticket: ViewportTicket) -> JoinHandle<bool> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(controller.config.refresh_delay).await;
            controller.finish_refresh(ticket)
        })
    }

    pub fn begin_screenshot(&self) -> ViewportTicket {
        let mut state = self.state();
        state.console.push(LogLevel::Info, "Capturing the current page...");
        let generation = state.replace_viewport(Viewport::loading("Capturing screenshot..."));
        state.pending += 1;
        ViewportTicket { generation }
    }

    pub fn finish_screenshot(&self, ticket: ViewportTicket) -> bool {
        let mut state = self.state();
        state.pending = state.pending.saturating_sub(1);
        if !state.is_current(ticket.generation) {
            debug!(generation = ticket.generation, "dropping stale screenshot");
            return false;
        }
        state.console.push(LogLevel::Success, "Screenshot captured");
        let image_url = format!(
            "https://picsum.photos/800/400?random={}{}",
            Utc::now().timestamp_millis(),
            ticket.generation
        );
        state.viewport = Viewport::Screenshot { image_url };
        true
    }

    pub async fn screenshot(&self) -> bool {
        let ticket = self.begin_screenshot();
        tokio::time::sleep(self.config.screenshot_delay).await;
        self.finish_screenshot(ticket)
    }

    pub fn spawn_finish_screenshot(self: &Arc<Self>, ticket: ViewportTicket) -> JoinHandle<bool> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(controller.config.screenshot_delay).await;
            controller.finish_screenshot(ticket)
        })
    }

    pub fn toggle_theme(&self) -> Theme {
        let mut state = self.state();
        state.theme = state.theme.toggled();
        let theme = state.theme;
        state.console.push(LogLevel::Info, theme.transition_message());
        theme
    }

    pub fn open_help(&self) {
        self.state().help_open = true;
    }

    pub fn close_help(&self) {
        self.state().help_open = false;
    }

    /// Clears input and console and returns the viewport to idle. History and theme stay.
    pub fn reset_all(&self) {
        let mut state = self.state();
        state.rewrite_input("");
        state.console.clear();
        state.replace_viewport(Viewport::Idle);
        state.url = DEFAULT_URL.to_string();
        state.retry_task = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::backend::{BackendLogEntry, ExecuteTaskResponse};
    use crate::console::{ConsoleLine, CONSOLE_HEADER};
    use crate::error::BackendError;

    #[derive(Default)]
    struct ScriptedBackend {
        replies: Mutex<VecDeque<Result<ExecuteTaskResponse, BackendError>>>,
        calls: Mutex<Vec<ExecuteTaskRequest>>,
    }

    impl ScriptedBackend {
        fn with(replies: Vec<Result<ExecuteTaskResponse, BackendError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<ExecuteTaskRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TaskBackend for ScriptedBackend {
        async fn execute(&self, request: &ExecuteTaskRequest) -> Result<ExecuteTaskResponse, BackendError> {
            self.calls.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(BackendError::Request("no scripted reply".to_string())))
        }
    }

    fn ok_reply(content: &str) -> Result<ExecuteTaskResponse, BackendError> {
        Ok(ExecuteTaskResponse {
            success: true,
            logs: vec![
                BackendLogEntry {
                    message: "model produced 5 steps".to_string(),
                    level: LogLevel::Info,
                },
                BackendLogEntry {
                    message: "task finished".to_string(),
                    level: LogLevel::Success,
                },
            ],
            url: Some("https://www.baidu.com".to_string()),
            title: Some("百度一下".to_string()),
            content: Some(content.to_string()),
        })
    }

    fn failed_reply() -> Result<ExecuteTaskResponse, BackendError> {
        Ok(ExecuteTaskResponse {
            success: false,
            logs: vec![BackendLogEntry {
                message: "execution failed: model unavailable".to_string(),
                level: LogLevel::Error,
            }],
            ..ExecuteTaskResponse::default()
        })
    }

    fn controller(backend: Arc<ScriptedBackend>) -> ViewController {
        let config = ConsoleConfig {
            refresh_delay: Duration::from_millis(0),
            screenshot_delay: Duration::from_millis(0),
            ..ConsoleConfig::default()
        };
        ViewController::new(config, backend)
    }

    fn console_messages(ctl: &ViewController) -> Vec<(LogLevel, String)> {
        ctl.with_state(|state| {
            state
                .console
                .entries()
                .map(|entry| (entry.level, entry.message.clone()))
                .collect()
        })
    }

    #[tokio::test]
    async fn empty_task_logs_error_without_calling_backend() {
        let backend = ScriptedBackend::with(vec![]);
        let ctl = controller(backend.clone());
        let before = ctl.snapshot().console_lines;

        let err = ctl.submit("   \t ").await.unwrap_err();

        assert_eq!(err, ConsoleError::EmptyTask);
        assert!(backend.calls().is_empty());
        let snap = ctl.snapshot();
        assert!(snap.history.is_empty());
        assert_eq!(snap.console_lines, before + 1);
        assert_eq!(snap.viewport, "idle");
        let last = console_messages(&ctl).pop().unwrap();
        assert_eq!(last, (LogLevel::Error, "Please enter a task description".to_string()));
    }

    #[tokio::test]
    async fn empty_form_submission_keeps_input_and_options() {
        let backend = ScriptedBackend::with(vec![]);
        let ctl = controller(backend.clone());
        ctl.set_input("draft");
        let before = ctl.options();

        let err = ctl.begin_submit_form("  ", Some(!before.headless), Some(!before.slow_mo)).unwrap_err();

        assert_eq!(err, ConsoleError::EmptyTask);
        assert_eq!(ctl.options(), before);
        assert_eq!(ctl.snapshot().input, "draft");
        assert!(ctl.snapshot().history.is_empty());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn form_submission_stores_input_and_carries_overrides() {
        let backend = ScriptedBackend::with(vec![ok_reply("")]);
        let ctl = controller(backend.clone());

        let pending = ctl.begin_submit_form("open example.com ", Some(false), None).unwrap();
        assert_eq!(
            pending.request,
            ExecuteTaskRequest {
                task: "open example.com".to_string(),
                headless: false,
                slow_mo: false,
            }
        );
        assert_eq!(ctl.snapshot().input, "open example.com ");
        assert_eq!(
            ctl.options(),
            TaskOptions {
                headless: false,
                slow_mo: false,
            }
        );

        ctl.finish_submit(pending).await.unwrap();
        assert!(!backend.calls()[0].headless);
    }

    #[tokio::test]
    async fn submission_records_running_task_before_resolution() {
        let backend = ScriptedBackend::with(vec![ok_reply("")]);
        let ctl = controller(backend.clone());
        ctl.set_options(TaskOptions {
            headless: false,
            slow_mo: true,
        });

        let pending = ctl.begin_submit("  open example.com ").unwrap();
        let snap = ctl.snapshot();
        assert_eq!(snap.history.len(), 1);
        assert_eq!(snap.history[0].status, TaskStatus::Running);
        assert_eq!(snap.history[0].name, "open example.com");
        assert_eq!(snap.viewport, "loading");
        assert_eq!(snap.pending, 1);
        assert!(backend.calls().is_empty());

        ctl.finish_submit(pending).await.unwrap();
        assert_eq!(
            backend.calls(),
            vec![ExecuteTaskRequest {
                task: "open example.com".to_string(),
                headless: false,
                slow_mo: true,
            }]
        );
        assert_eq!(ctl.snapshot().pending, 0);
    }

    #[tokio::test]
    async fn success_completes_task_and_picks_search_template() {
        let backend = ScriptedBackend::with(vec![ok_reply("百炼大模型 - 百度搜索结果")]);
        let ctl = controller(backend);

        let kind = ctl.submit("在百度搜索百炼大模型").await.unwrap();

        assert_eq!(kind, TemplateKind::Search);
        let snap = ctl.snapshot();
        assert_eq!(snap.history[0].status, TaskStatus::Completed);
        assert_eq!(snap.viewport, "search");
        assert_eq!(snap.url, "https://www.baidu.com");
        assert!(snap.viewport_html.contains("Search results: 百炼大模型"));

        let messages: Vec<String> = console_messages(&ctl).into_iter().map(|(_, m)| m).collect();
        let steps = messages.iter().position(|m| m == "model produced 5 steps").unwrap();
        let done = messages.iter().position(|m| m == "task finished").unwrap();
        assert!(steps < done);
    }

    #[tokio::test]
    async fn success_without_markers_uses_generic_template_and_default_url() {
        let backend = ScriptedBackend::with(vec![Ok(ExecuteTaskResponse {
            success: true,
            ..ExecuteTaskResponse::default()
        })]);
        let ctl = controller(backend);

        assert_eq!(ctl.submit("open the docs").await.unwrap(), TemplateKind::Generic);
        let snap = ctl.snapshot();
        assert_eq!(snap.url, DEFAULT_URL);
        assert!(snap.viewport_html.contains("Page content loaded"));
    }

    #[tokio::test]
    async fn unsuccessful_response_fails_task_and_offers_retry() {
        let backend = ScriptedBackend::with(vec![failed_reply()]);
        let ctl = controller(backend);

        let err = ctl.submit("登录GitHub").await.unwrap_err();

        assert_eq!(err, ConsoleError::TaskFailed);
        let snap = ctl.snapshot();
        assert_eq!(snap.history[0].status, TaskStatus::Failed);
        assert!(snap.retry_available);
        assert!(snap.viewport_html.contains("retry-task"));
        let messages = console_messages(&ctl);
        assert!(messages.contains(&(LogLevel::Error, "execution failed: model unavailable".to_string())));
        assert_eq!(
            messages.last().unwrap(),
            &(
                LogLevel::Error,
                "Error: Task execution failed, check the log for details".to_string()
            )
        );
    }

    #[tokio::test]
    async fn network_error_fails_task() {
        let backend = ScriptedBackend::with(vec![Err(BackendError::Request("connection refused".to_string()))]);
        let ctl = controller(backend);

        let err = ctl.submit("open example.com").await.unwrap_err();

        assert!(matches!(err, ConsoleError::Backend(_)));
        let snap = ctl.snapshot();
        assert_eq!(snap.history[0].status, TaskStatus::Failed);
        assert!(snap.retry_available);
        assert!(snap.viewport_html.contains("connection refused"));
    }

    #[tokio::test]
    async fn retry_resubmits_the_failed_task() {
        let backend = ScriptedBackend::with(vec![failed_reply(), ok_reply("")]);
        let ctl = controller(backend.clone());

        ctl.submit("登录GitHub").await.unwrap_err();
        ctl.set_input("something else");
        let kind = ctl.retry().await.unwrap();

        assert_eq!(kind, TemplateKind::Login);
        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].task, "登录GitHub");
        let snap = ctl.snapshot();
        assert_eq!(snap.history.len(), 2);
        assert_eq!(snap.history[0].status, TaskStatus::Completed);
        assert_eq!(snap.history[1].status, TaskStatus::Failed);
        assert!(!snap.retry_available);
        assert_eq!(ctl.retry().await.unwrap_err(), ConsoleError::NothingToRetry);
    }

    #[tokio::test]
    async fn overlapping_submissions_update_their_own_records() {
        let backend = ScriptedBackend::with(vec![ok_reply(""), ok_reply("")]);
        let ctl = controller(backend);

        let first = ctl.begin_submit("登录GitHub").unwrap();
        let second = ctl.begin_submit("open example.com").unwrap();

        ctl.finish_submit(first).await.unwrap();
        let snap = ctl.snapshot();
        assert_eq!(snap.history[0].status, TaskStatus::Running);
        assert_eq!(snap.history[1].status, TaskStatus::Completed);
        assert_eq!(snap.viewport, "loading");

        ctl.finish_submit(second).await.unwrap();
        let snap = ctl.snapshot();
        assert_eq!(snap.history[0].status, TaskStatus::Completed);
        assert_eq!(snap.viewport, "generic");
    }

    #[tokio::test]
    async fn stale_refresh_does_not_overwrite_newer_viewport() {
        let ctl = controller(ScriptedBackend::with(vec![]));

        let refresh = ctl.begin_refresh();
        let shot = ctl.begin_screenshot();
        assert_eq!(ctl.snapshot().pending, 2);

        assert!(ctl.finish_screenshot(shot));
        assert!(!ctl.finish_refresh(refresh));

        let snap = ctl.snapshot();
        assert_eq!(snap.viewport, "screenshot");
        assert_eq!(snap.pending, 0);
        let messages = console_messages(&ctl);
        assert!(!messages.iter().any(|(_, m)| m == "Page refreshed"));
        assert!(messages.contains(&(LogLevel::Success, "Screenshot captured".to_string())));
    }

    #[tokio::test]
    async fn refresh_swaps_in_refreshed_page_after_delay() {
        let ctl = controller(ScriptedBackend::with(vec![]));
        assert!(ctl.refresh().await);
        let snap = ctl.snapshot();
        assert_eq!(snap.viewport, "refreshed");
        assert!(snap.viewport_html.contains(DEFAULT_URL));

        assert!(ctl.screenshot().await);
        assert!(ctl.snapshot().viewport_html.contains("picsum.photos"));
    }

    #[tokio::test]
    async fn selecting_history_copies_task_text() {
        let backend = ScriptedBackend::with(vec![ok_reply(""), ok_reply("")]);
        let ctl = controller(backend);
        ctl.submit("first task").await.unwrap();
        ctl.submit("second task").await.unwrap();

        let revision = ctl.snapshot().input_revision;
        assert_eq!(ctl.select_history(1).unwrap(), "first task");
        let snap = ctl.snapshot();
        assert_eq!(snap.input, "first task");
        assert_eq!(snap.input_revision, revision + 1);
        assert_eq!(ctl.select_history(5).unwrap_err(), ConsoleError::HistoryIndex(5));
        assert_eq!(ctl.snapshot().input_revision, revision + 1);
    }

    #[tokio::test]
    async fn only_history_pick_and_reset_rewrite_input() {
        let backend = ScriptedBackend::with(vec![ok_reply("")]);
        let ctl = controller(backend);
        let start = ctl.snapshot().input_revision;

        ctl.set_input("typed by hand");
        ctl.toggle_theme();
        ctl.clear_log();
        ctl.refresh().await;
        ctl.open_help();
        ctl.begin_submit_form("open example.com", None, None).unwrap();
        assert_eq!(ctl.snapshot().input_revision, start);

        ctl.reset_all();
        let snap = ctl.snapshot();
        assert_eq!(snap.input, "");
        assert_eq!(snap.input_revision, start + 1);
    }

    #[test]
    fn export_after_clear_contains_only_header() {
        let ctl = controller(ScriptedBackend::with(vec![]));
        ctl.log(LogLevel::Warning, "noise");
        ctl.clear_log();

        let export = ctl.export_log();
        assert_eq!(export.content, CONSOLE_HEADER);
        assert!(export.file_name.starts_with("browser-use-log-"));
        assert!(export.file_name.ends_with(".txt"));
        assert!(!export.file_name.contains(':'));
    }

    #[test]
    fn theme_toggle_twice_restores_classes_and_logs_each_switch() {
        let ctl = controller(ScriptedBackend::with(vec![]));
        let before = ctl.snapshot();

        assert_eq!(ctl.toggle_theme(), Theme::Dark);
        assert_eq!(ctl.snapshot().theme_icon, "fa-sun-o");
        assert_eq!(ctl.toggle_theme(), Theme::Light);

        let after = ctl.snapshot();
        assert_eq!(after.theme_icon, before.theme_icon);
        assert_eq!(after.body_classes, before.body_classes);
        let messages = console_messages(&ctl);
        let tail: Vec<&str> = messages[messages.len() - 2..].iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(tail, vec!["Switched to dark mode", "Switched to light mode"]);
    }

    #[tokio::test]
    async fn reset_all_keeps_history_and_theme() {
        let backend = ScriptedBackend::with(vec![ok_reply("")]);
        let ctl = controller(backend);
        ctl.set_input("search rust");
        ctl.submit("search rust").await.unwrap();
        ctl.toggle_theme();

        ctl.reset_all();

        let snap = ctl.snapshot();
        assert_eq!(snap.input, "");
        assert_eq!(snap.viewport, "idle");
        assert_eq!(snap.url, DEFAULT_URL);
        assert_eq!(snap.history.len(), 1);
        assert_eq!(snap.theme, Theme::Dark);
        ctl.with_state(|state| {
            assert_eq!(state.console.len(), 1);
            assert!(matches!(state.console.lines()[0], ConsoleLine::Header));
        });
    }

    #[test]
    fn help_modal_open_and_close_are_idempotent() {
        let ctl = controller(ScriptedBackend::with(vec![]));
        ctl.open_help();
        ctl.open_help();
        assert!(ctl.snapshot().help_open);
        ctl.close_help();
        ctl.close_help();
        assert!(!ctl.snapshot().help_open);
    }
}
