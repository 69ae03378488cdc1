/// Wire models for the reupload backend API.
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Publishing target supported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Youtube,
    Instagram,
}

impl Platform {
    /// Parse a backend platform key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "youtube" => Some(Platform::Youtube),
            "instagram" => Some(Platform::Instagram),
            _ => None,
        }
    }

    /// Wire key sent to and received from the backend.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
        }
    }

    /// Human-readable name shown in upload result cards.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Youtube => "YouTube Shorts",
            Platform::Instagram => "Instagram Reels",
        }
    }

    /// Icon identifier for the platform badge.
    pub fn icon(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Task status as reported by the backend.
///
/// The backend sends free-form strings; they are normalized into this
/// closed set at the boundary. Unrecognized values land in `Other` instead
/// of being silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TaskStatus {
    Queued,
    Downloading,
    Processing,
    Uploading,
    Completed,
    Error,
    Other(String),
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "queued" => TaskStatus::Queued,
            "downloading" => TaskStatus::Downloading,
            "processing" => TaskStatus::Processing,
            "uploading" => TaskStatus::Uploading,
            "completed" => TaskStatus::Completed,
            "error" => TaskStatus::Error,
            _ => TaskStatus::Other(raw),
        }
    }
}

impl TaskStatus {
    /// Whether this status ends the polling loop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Error)
    }

    /// Progress-view phase label for in-flight statuses.
    ///
    /// Returns `None` for statuses without a defined phase; callers keep
    /// the previously displayed label in that case.
    pub fn phase_label(&self) -> Option<&'static str> {
        match self {
            TaskStatus::Downloading => Some("Downloading video..."),
            TaskStatus::Processing => Some("Processing video..."),
            TaskStatus::Uploading => Some("Uploading to platforms..."),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Queued => write!(f, "queued"),
            TaskStatus::Downloading => write!(f, "downloading"),
            TaskStatus::Processing => write!(f, "processing"),
            TaskStatus::Uploading => write!(f, "uploading"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Error => write!(f, "error"),
            TaskStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Response to `GET /api/task/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSnapshot {
    pub status: TaskStatus,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub video_info: Option<VideoInfo>,
    #[serde(default)]
    pub uploads: Option<UploadMap>,
}

impl TaskSnapshot {
    /// Progress clamped into [0, 100]; a missing value counts as 0.
    pub fn clamped_percent(&self) -> u8 {
        let raw = self.progress.unwrap_or(0.0);
        raw.clamp(0.0, 100.0).round() as u8
    }
}

/// Video payload attached to a completed task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub metadata: VideoMetadata,
}

/// Source video metadata. Every field is individually optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoMetadata {
    pub title: Option<String>,
    pub creator: Option<String>,
    pub duration: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub description: Option<String>,
}

/// Per-platform upload result attached to a completed task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadOutcome {
    #[serde(default)]
    pub success: bool,
    pub video_url: Option<String>,
    pub reel_url: Option<String>,
    pub upload_date: Option<String>,
    pub title: Option<String>,
    pub error: Option<String>,
}

impl UploadOutcome {
    /// Published URL, whichever field name the platform uses.
    pub fn published_url(&self) -> Option<&str> {
        self.video_url.as_deref().or(self.reel_url.as_deref())
    }
}

/// Uploads mapping keyed by platform, in backend insertion order.
///
/// A plain JSON map would lose ordering through a `HashMap`, so entries
/// are kept as a vector of pairs.
#[derive(Debug, Clone, Default)]
pub struct UploadMap(pub Vec<(String, UploadOutcome)>);

impl UploadMap {
    pub fn iter(&self) -> impl Iterator<Item = &(String, UploadOutcome)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for UploadMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UploadMapVisitor;

        impl<'de> Visitor<'de> for UploadMapVisitor {
            type Value = UploadMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of platform keys to upload outcomes")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(2));
                while let Some((key, outcome)) = access.next_entry::<String, UploadOutcome>()? {
                    entries.push((key, outcome));
                }
                Ok(UploadMap(entries))
            }
        }

        deserializer.deserialize_map(UploadMapVisitor)
    }
}

/// Body of `POST /api/process`.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessRequest {
    pub url: String,
    pub platforms: Vec<Platform>,
    pub title: String,
    pub description: String,
}

/// Body of `POST /api/download`.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub url: String,
}

/// Acknowledgement returned by both submission endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAck {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_normalization() {
        assert_eq!(TaskStatus::from("downloading".to_string()), TaskStatus::Downloading);
        assert_eq!(TaskStatus::from("completed".to_string()), TaskStatus::Completed);
        assert_eq!(TaskStatus::from("error".to_string()), TaskStatus::Error);
        assert_eq!(
            TaskStatus::from("muxing".to_string()),
            TaskStatus::Other("muxing".to_string())
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Error.is_terminal());
        assert!(!TaskStatus::Uploading.is_terminal());
        assert!(!TaskStatus::Other("muxing".into()).is_terminal());
    }

    #[test]
    fn test_phase_label_only_for_known_phases() {
        assert_eq!(TaskStatus::Downloading.phase_label(), Some("Downloading video..."));
        assert_eq!(TaskStatus::Uploading.phase_label(), Some("Uploading to platforms..."));
        assert_eq!(TaskStatus::Queued.phase_label(), None);
        assert_eq!(TaskStatus::Other("muxing".into()).phase_label(), None);
    }

    #[test]
    fn test_progress_clamping() {
        let snapshot = |progress| TaskSnapshot {
            status: TaskStatus::Processing,
            progress,
            message: None,
            video_info: None,
            uploads: None,
        };
        assert_eq!(snapshot(Some(150.0)).clamped_percent(), 100);
        assert_eq!(snapshot(Some(-20.0)).clamped_percent(), 0);
        assert_eq!(snapshot(None).clamped_percent(), 0);
        assert_eq!(snapshot(Some(42.4)).clamped_percent(), 42);
    }

    #[test]
    fn test_snapshot_parsing() {
        let json = r#"{
            "status": "completed",
            "progress": 100,
            "message": "done",
            "video_info": {"metadata": {"title": "clip", "duration": 65}},
            "uploads": {
                "youtube": {"success": true, "video_url": "https://youtu.be/x"},
                "instagram": {"success": false, "error": "quota"}
            }
        }"#;
        let snap: TaskSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.status, TaskStatus::Completed);
        assert_eq!(snap.clamped_percent(), 100);

        let uploads = snap.uploads.unwrap();
        let keys: Vec<&str> = uploads.iter().map(|(k, _)| k.as_str()).collect();
        // Insertion order as received from the backend.
        assert_eq!(keys, vec!["youtube", "instagram"]);
        assert_eq!(uploads.0[0].1.published_url(), Some("https://youtu.be/x"));
        assert_eq!(uploads.0[1].1.error.as_deref(), Some("quota"));
    }

    #[test]
    fn test_published_url_accepts_either_field() {
        let yt = UploadOutcome {
            video_url: Some("https://youtu.be/x".into()),
            ..Default::default()
        };
        let ig = UploadOutcome {
            reel_url: Some("https://instagram.com/reel/y".into()),
            ..Default::default()
        };
        assert_eq!(yt.published_url(), Some("https://youtu.be/x"));
        assert_eq!(ig.published_url(), Some("https://instagram.com/reel/y"));
        assert_eq!(UploadOutcome::default().published_url(), None);
    }

    #[test]
    fn test_process_request_platform_keys() {
        let req = ProcessRequest {
            url: "https://www.tiktok.com/@user/video/12345".into(),
            platforms: vec![Platform::Youtube],
            title: String::new(),
            description: String::new(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["platforms"][0], "youtube");
    }

    #[test]
    fn test_missing_metadata_defaults() {
        let info: VideoInfo = serde_json::from_str("{}").unwrap();
        assert!(info.metadata.title.is_none());
        assert!(info.metadata.duration.is_none());
    }
}
