/// Pure mapping from task payloads to display models.
///
/// Nothing here touches the presentation surface; the side-effecting
/// render step lives behind the [`crate::view::FlowView`] trait so these
/// mappings stay unit-testable.
use chrono::{DateTime, NaiveDateTime};

use reelay_shared::models::{Platform, TaskSnapshot, UploadOutcome, VideoInfo};

/// Placeholder shown when a poll response carries no message.
pub const DEFAULT_PROGRESS_MESSAGE: &str = "Processing...";

/// Fallback shown when an upload failed without an error message.
pub const DEFAULT_UPLOAD_ERROR: &str = "Unknown error";

/// Progress display state while a task is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    /// Clamped into [0, 100].
    pub percent: u8,
    pub message: String,
    /// Human-readable phase label, if one is known yet.
    pub phase: Option<&'static str>,
}

impl ProgressView {
    /// Initial state shown right after a submission is acknowledged.
    pub fn initial() -> Self {
        ProgressView {
            percent: 0,
            message: DEFAULT_PROGRESS_MESSAGE.to_string(),
            phase: None,
        }
    }

    /// Build from a poll snapshot.
    ///
    /// Statuses without a phase of their own keep `previous_phase`, so the
    /// label never regresses to a generic one mid-task.
    pub fn from_snapshot(snapshot: &TaskSnapshot, previous_phase: Option<&'static str>) -> Self {
        ProgressView {
            percent: snapshot.clamped_percent(),
            message: snapshot
                .message
                .clone()
                .unwrap_or_else(|| DEFAULT_PROGRESS_MESSAGE.to_string()),
            phase: snapshot.status.phase_label().or(previous_phase),
        }
    }
}

/// Rendered summary of the source video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSummary {
    pub title: String,
    pub creator: String,
    pub duration: String,
    pub resolution: String,
    pub description: Option<String>,
}

impl VideoSummary {
    pub fn from_info(info: &VideoInfo) -> Self {
        let meta = &info.metadata;
        VideoSummary {
            title: meta.title.clone().unwrap_or_else(|| "No title".to_string()),
            creator: meta.creator.clone().unwrap_or_else(|| "Unknown".to_string()),
            duration: format_duration(meta.duration.unwrap_or(0.0)),
            resolution: format!("{}x{}", meta.width.unwrap_or(0), meta.height.unwrap_or(0)),
            description: meta.description.clone(),
        }
    }
}

/// Success/error badge on an upload card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadBadge {
    Success,
    Error,
}

/// Rendered per-platform upload outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCard {
    pub platform_name: String,
    pub icon: &'static str,
    pub badge: UploadBadge,
    pub url: Option<String>,
    /// Formatted publish date; empty when absent or unparseable.
    pub published_at: String,
    pub title: Option<String>,
    pub error: Option<String>,
}

impl UploadCard {
    pub fn from_entry(key: &str, outcome: &UploadOutcome) -> Self {
        let (platform_name, icon) = match Platform::from_key(key) {
            Some(platform) => (platform.display_name().to_string(), platform.icon()),
            // Unknown platform keys still render, with the raw key.
            None => (key.to_string(), "globe"),
        };

        if outcome.success {
            UploadCard {
                platform_name,
                icon,
                badge: UploadBadge::Success,
                url: outcome.published_url().map(str::to_string),
                published_at: outcome
                    .upload_date
                    .as_deref()
                    .map(format_upload_date)
                    .unwrap_or_default(),
                title: outcome.title.clone(),
                error: None,
            }
        } else {
            UploadCard {
                platform_name,
                icon,
                badge: UploadBadge::Error,
                url: None,
                published_at: String::new(),
                title: None,
                error: Some(
                    outcome
                        .error
                        .clone()
                        .unwrap_or_else(|| DEFAULT_UPLOAD_ERROR.to_string()),
                ),
            }
        }
    }
}

/// Rendered terminal-success view: video summary plus upload cards, in
/// backend insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub video: Option<VideoSummary>,
    pub uploads: Vec<UploadCard>,
}

impl ResultsView {
    pub fn from_snapshot(snapshot: &TaskSnapshot) -> Self {
        ResultsView {
            video: snapshot.video_info.as_ref().map(VideoSummary::from_info),
            uploads: snapshot
                .uploads
                .as_ref()
                .map(|uploads| {
                    uploads
                        .iter()
                        .map(|(key, outcome)| UploadCard::from_entry(key, outcome))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// Format a duration in seconds as `minutes:seconds`, seconds zero-padded.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a backend publish date for display. Returns an empty string when
/// the value cannot be parsed.
pub fn format_upload_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d %b %Y, %H:%M").to_string();
    }
    // Python isoformat() without a timezone offset.
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d %b %Y, %H:%M").to_string();
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelay_shared::models::{TaskStatus, UploadMap, VideoMetadata};

    fn snapshot(status: TaskStatus, progress: Option<f64>, message: Option<&str>) -> TaskSnapshot {
        TaskSnapshot {
            status,
            progress,
            message: message.map(str::to_string),
            video_info: None,
            uploads: None,
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(65.0), "1:05");
        assert_eq!(format_duration(599.0), "9:59");
        assert_eq!(format_duration(600.0), "10:00");
        assert_eq!(format_duration(-5.0), "0:00");
    }

    #[test]
    fn test_progress_view_clamps_and_defaults() {
        let view = ProgressView::from_snapshot(
            &snapshot(TaskStatus::Processing, Some(150.0), None),
            None,
        );
        assert_eq!(view.percent, 100);
        assert_eq!(view.message, DEFAULT_PROGRESS_MESSAGE);

        let view = ProgressView::from_snapshot(
            &snapshot(TaskStatus::Processing, Some(-20.0), Some("working")),
            None,
        );
        assert_eq!(view.percent, 0);
        assert_eq!(view.message, "working");

        let view = ProgressView::from_snapshot(&snapshot(TaskStatus::Queued, None, None), None);
        assert_eq!(view.percent, 0);
    }

    #[test]
    fn test_phase_is_retained_for_unknown_statuses() {
        let view = ProgressView::from_snapshot(
            &snapshot(TaskStatus::Downloading, Some(10.0), None),
            None,
        );
        assert_eq!(view.phase, Some("Downloading video..."));

        // An unrecognized status keeps the previous label.
        let view = ProgressView::from_snapshot(
            &snapshot(TaskStatus::Other("muxing".into()), Some(40.0), None),
            view.phase,
        );
        assert_eq!(view.phase, Some("Downloading video..."));

        let view = ProgressView::from_snapshot(
            &snapshot(TaskStatus::Uploading, Some(80.0), None),
            view.phase,
        );
        assert_eq!(view.phase, Some("Uploading to platforms..."));
    }

    #[test]
    fn test_video_summary_defaults() {
        let summary = VideoSummary::from_info(&VideoInfo::default());
        assert_eq!(summary.title, "No title");
        assert_eq!(summary.creator, "Unknown");
        assert_eq!(summary.duration, "0:00");
        assert_eq!(summary.resolution, "0x0");
        assert!(summary.description.is_none());
    }

    #[test]
    fn test_video_summary_fields() {
        let info = VideoInfo {
            metadata: VideoMetadata {
                title: Some("clip".into()),
                creator: Some("user".into()),
                duration: Some(65.0),
                width: Some(1080),
                height: Some(1920),
                description: Some("desc".into()),
            },
        };
        let summary = VideoSummary::from_info(&info);
        assert_eq!(summary.duration, "1:05");
        assert_eq!(summary.resolution, "1080x1920");
        assert_eq!(summary.description.as_deref(), Some("desc"));
    }

    #[test]
    fn test_successful_upload_card() {
        let outcome = UploadOutcome {
            success: true,
            video_url: Some("https://youtu.be/x".into()),
            upload_date: Some("2026-08-23T10:30:00".into()),
            title: Some("clip".into()),
            ..Default::default()
        };
        let card = UploadCard::from_entry("youtube", &outcome);
        assert_eq!(card.platform_name, "YouTube Shorts");
        assert_eq!(card.icon, "youtube");
        assert_eq!(card.badge, UploadBadge::Success);
        assert_eq!(card.url.as_deref(), Some("https://youtu.be/x"));
        assert_eq!(card.published_at, "23 Aug 2026, 10:30");
    }

    #[test]
    fn test_failed_upload_card() {
        let outcome = UploadOutcome {
            success: false,
            error: None,
            ..Default::default()
        };
        let card = UploadCard::from_entry("instagram", &outcome);
        assert_eq!(card.platform_name, "Instagram Reels");
        assert_eq!(card.badge, UploadBadge::Error);
        assert!(card.url.is_none());
        assert_eq!(card.error.as_deref(), Some(DEFAULT_UPLOAD_ERROR));
    }

    #[test]
    fn test_unknown_platform_key_renders_raw() {
        let card = UploadCard::from_entry("vimeo", &UploadOutcome::default());
        assert_eq!(card.platform_name, "vimeo");
        assert_eq!(card.icon, "globe");
    }

    #[test]
    fn test_upload_date_blank_when_missing_or_garbage() {
        assert_eq!(format_upload_date("not a date"), "");
        let outcome = UploadOutcome {
            success: true,
            reel_url: Some("https://instagram.com/reel/y".into()),
            ..Default::default()
        };
        let card = UploadCard::from_entry("instagram", &outcome);
        assert_eq!(card.published_at, "");
        assert_eq!(card.url.as_deref(), Some("https://instagram.com/reel/y"));
    }

    #[test]
    fn test_results_preserve_upload_order() {
        let uploads = UploadMap(vec![
            ("instagram".to_string(), UploadOutcome { success: true, ..Default::default() }),
            ("youtube".to_string(), UploadOutcome { success: true, ..Default::default() }),
        ]);
        let snap = TaskSnapshot {
            status: TaskStatus::Completed,
            progress: Some(100.0),
            message: None,
            video_info: None,
            uploads: Some(uploads),
        };
        let results = ResultsView::from_snapshot(&snap);
        let names: Vec<&str> = results.uploads.iter().map(|c| c.platform_name.as_str()).collect();
        assert_eq!(names, vec!["Instagram Reels", "YouTube Shorts"]);
    }
}
