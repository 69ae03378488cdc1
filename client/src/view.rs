/// Presentation seam for the task workflow.
///
/// The controller never renders anything itself; it pushes display models
/// and notices through this trait. The terminal binary implements it for
/// stdout, tests implement it with a recorder.
use crate::render::{ProgressView, ResultsView};

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// One transient notification (the web front-end's toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Error, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Info, message: message.into() }
    }
}

/// Side-effecting render surface driven by the controller.
pub trait FlowView {
    /// Show or update the progress display.
    fn show_progress(&mut self, progress: &ProgressView);

    /// Show the terminal-success results.
    fn show_results(&mut self, results: &ResultsView);

    /// Hide the progress display.
    fn hide_progress(&mut self);

    /// Return the form to its initial state: URL and description cleared,
    /// validation indicator cleared, both platforms re-selected, progress
    /// and results hidden, viewport scrolled to top.
    fn reset_form(&mut self);

    /// Surface a transient notification.
    fn notify(&mut self, notice: Notice);
}
