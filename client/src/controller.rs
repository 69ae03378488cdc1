/// Task-flow state machine.
///
/// Two states: `Idle` (no active task) and `Polling` (one active task).
/// Every external event — submit, poll tick, poll response, reset — is one
/// transition on this machine, so two concurrent tasks or poll drivers are
/// unrepresentable.
use std::time::Duration;

use tracing::{debug, info, warn};

use reelay_shared::errors::{ReelayResult, ValidationError};
use reelay_shared::models::{DownloadRequest, ProcessRequest, TaskSnapshot, TaskStatus};

use crate::api::TaskBackend;
use crate::render::{ProgressView, ResultsView};
use crate::validate::{self, PlatformSelection};
use crate::view::{FlowView, Notice};

/// Fixed polling period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Form contents for a `process` submission.
#[derive(Debug, Clone, Default)]
pub struct ProcessForm {
    pub url: String,
    pub platforms: PlatformSelection,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FlowState {
    Idle,
    Polling { task_id: String },
}

/// Owns the whole client-visible workflow for one in-flight task.
pub struct TaskFlowController<B> {
    backend: B,
    state: FlowState,
    /// Set while a submission round-trip is in flight; a second submission
    /// during that window is ignored.
    submitting: bool,
    poll_interval: Duration,
    /// Last phase label shown, kept across statuses that define none.
    last_phase: Option<&'static str>,
}

impl<B: TaskBackend> TaskFlowController<B> {
    pub fn new(backend: B) -> Self {
        TaskFlowController {
            backend,
            state: FlowState::Idle,
            submitting: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
            last_phase: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn is_idle(&self) -> bool {
        self.state == FlowState::Idle
    }

    /// Id of the task currently being polled, if any.
    pub fn active_task_id(&self) -> Option<&str> {
        match &self.state {
            FlowState::Polling { task_id } => Some(task_id),
            FlowState::Idle => None,
        }
    }

    /// Submit a `process` job (download + upload to the selected platforms).
    ///
    /// Validation is re-asserted here even though the submit button is
    /// normally disabled for invalid input: button state and click-time
    /// state can diverge under rapid toggling. Returns whether polling
    /// started.
    pub async fn submit_process(&mut self, form: &ProcessForm, view: &mut impl FlowView) -> bool {
        if !self.submission_allowed(view) {
            return false;
        }
        if !validate::validate_source_url(&form.url).is_valid() {
            view.notify(Notice::error(ValidationError::InvalidUrl.to_string()));
            return false;
        }
        if !form.platforms.any() {
            view.notify(Notice::error(ValidationError::NoPlatformSelected.to_string()));
            return false;
        }

        let request = ProcessRequest {
            url: form.url.trim().to_string(),
            platforms: form.platforms.selected(),
            title: form.title.trim().to_string(),
            description: form.description.trim().to_string(),
        };

        self.submitting = true;
        let result = self.backend.submit_process(&request).await;
        self.submitting = false;

        self.begin_polling(result, "Processing started", view)
    }

    /// Submit a `download` job (fetch the source video, no uploads).
    pub async fn submit_download(&mut self, url: &str, view: &mut impl FlowView) -> bool {
        if !self.submission_allowed(view) {
            return false;
        }
        if !validate::validate_source_url(url).is_valid() {
            view.notify(Notice::error(ValidationError::InvalidUrl.to_string()));
            return false;
        }

        let request = DownloadRequest { url: url.trim().to_string() };

        self.submitting = true;
        let result = self.backend.submit_download(&request).await;
        self.submitting = false;

        self.begin_polling(result, "Download started", view)
    }

    /// Re-entrancy guard: one task, one submission at a time.
    fn submission_allowed(&self, view: &mut impl FlowView) -> bool {
        if self.submitting || !self.is_idle() {
            warn!("submission ignored: a task is already in progress");
            view.notify(Notice::warning("A task is already in progress"));
            return false;
        }
        true
    }

    fn begin_polling(
        &mut self,
        result: ReelayResult<String>,
        started_notice: &str,
        view: &mut impl FlowView,
    ) -> bool {
        match result {
            Ok(task_id) => {
                info!("task {} accepted, polling begins", task_id);
                self.state = FlowState::Polling { task_id };
                self.last_phase = None;
                view.show_progress(&ProgressView::initial());
                view.notify(Notice::success(started_notice));
                true
            }
            Err(err) => {
                warn!("submission failed: {}", err);
                view.notify(Notice::error(format!("Error: {}", err)));
                false
            }
        }
    }

    /// Perform one status fetch for the active task. No-op while idle.
    pub async fn poll_tick(&mut self, view: &mut impl FlowView) {
        let task_id = match &self.state {
            FlowState::Polling { task_id } => task_id.clone(),
            FlowState::Idle => return,
        };
        let result = self.backend.fetch_task(&task_id).await;
        self.apply_poll_response(&task_id, result, view);
    }

    /// Apply a poll response for `task_id`.
    ///
    /// A response for a task other than the active one — reset or a new
    /// submission happened while the fetch was in flight — is discarded.
    pub fn apply_poll_response(
        &mut self,
        task_id: &str,
        result: ReelayResult<TaskSnapshot>,
        view: &mut impl FlowView,
    ) {
        match &self.state {
            FlowState::Polling { task_id: active } if active == task_id => {}
            _ => {
                debug!("discarding stale poll response for task {}", task_id);
                return;
            }
        }

        match result {
            // Fail fast: no retry, no backoff.
            Err(err) => {
                warn!("poll for task {} failed: {}", task_id, err);
                self.to_idle();
                view.notify(Notice::error("Error fetching task status"));
                view.hide_progress();
            }
            Ok(snapshot) => match &snapshot.status {
                TaskStatus::Completed => {
                    info!("task {} completed", task_id);
                    self.to_idle();
                    view.hide_progress();
                    view.show_results(&ResultsView::from_snapshot(&snapshot));
                    view.notify(Notice::success("Processing completed!"));
                }
                TaskStatus::Error => {
                    let message = snapshot
                        .message
                        .clone()
                        .unwrap_or_else(|| "Unknown error".to_string());
                    warn!("task {} failed: {}", task_id, message);
                    self.to_idle();
                    view.notify(Notice::error(format!("Error: {}", message)));
                    view.hide_progress();
                }
                _ => {
                    let progress = ProgressView::from_snapshot(&snapshot, self.last_phase);
                    self.last_phase = progress.phase;
                    view.show_progress(&progress);
                }
            },
        }
    }

    /// Drive the polling loop on the fixed period until the task reaches a
    /// terminal state or a transport failure ends it.
    ///
    /// This loop is the only recurring timer; it exists exactly while the
    /// controller is in the polling state.
    pub async fn run_to_completion(&mut self, view: &mut impl FlowView) {
        while !self.is_idle() {
            tokio::time::sleep(self.poll_interval).await;
            self.poll_tick(view).await;
        }
    }

    /// Return to the initial idle state. Idempotent: resetting while idle
    /// only re-clears the display.
    pub fn reset(&mut self, view: &mut impl FlowView) {
        if !self.is_idle() {
            info!("reset: dropping active task {:?}", self.active_task_id());
        }
        self.to_idle();
        self.submitting = false;
        view.reset_form();
    }

    fn to_idle(&mut self) {
        self.state = FlowState::Idle;
        self.last_phase = None;
    }
}
