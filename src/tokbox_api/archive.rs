use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Archive lifecycle as reported by the platform
///
/// Transitions are server-authoritative (`starting -> started -> stopped ->
/// available | failed`); the client only observes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveStatus {
    Starting,
    Started,
    Stopped,
    Available,
    Failed,
    Uploaded,
    Paused,
    Expired,
    Deleted,
    /// Any status this library does not know about yet
    Unknown(String),
}

impl ArchiveStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "starting" => ArchiveStatus::Starting,
            "started" => ArchiveStatus::Started,
            "stopped" => ArchiveStatus::Stopped,
            "available" => ArchiveStatus::Available,
            "failed" => ArchiveStatus::Failed,
            "uploaded" => ArchiveStatus::Uploaded,
            "paused" => ArchiveStatus::Paused,
            "expired" => ArchiveStatus::Expired,
            "deleted" => ArchiveStatus::Deleted,
            other => ArchiveStatus::Unknown(other.to_string()),
        }
    }

    /// Whether the archive will not change state again on its own
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ArchiveStatus::Available
                | ArchiveStatus::Failed
                | ArchiveStatus::Uploaded
                | ArchiveStatus::Expired
                | ArchiveStatus::Deleted
        )
    }
}

impl fmt::Display for ArchiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArchiveStatus::Starting => "starting",
            ArchiveStatus::Started => "started",
            ArchiveStatus::Stopped => "stopped",
            ArchiveStatus::Available => "available",
            ArchiveStatus::Failed => "failed",
            ArchiveStatus::Uploaded => "uploaded",
            ArchiveStatus::Paused => "paused",
            ArchiveStatus::Expired => "expired",
            ArchiveStatus::Deleted => "deleted",
            ArchiveStatus::Unknown(other) => other.as_str(),
        };
        f.write_str(s)
    }
}

/// Convert a millisecond unix timestamp as sent by the platform
pub(crate) fn millis_to_utc(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Snapshot of an archive as returned by the archive endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArchiveMetadata {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Creation time in milliseconds since the epoch
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: i64,
    /// Duration in seconds
    #[serde(deserialize_with = "null_as_default")]
    pub duration: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub event: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_audio: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_video: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub output_mode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub partner_id: i64,
    pub password: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resolution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub session_id: String,
    #[serde(rename = "sha256sum", deserialize_with = "null_as_default")]
    pub checksum: String,
    /// Size in bytes
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: i64,
    pub url: Option<String>,
}

impl ArchiveMetadata {
    pub fn lifecycle(&self) -> ArchiveStatus {
        ArchiveStatus::parse(&self.status)
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.created_at)
    }

    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.updated_at)
    }
}

/// Archive collection response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveList {
    #[serde(deserialize_with = "null_as_default")]
    pub count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<ArchiveMetadata>,
}

/// How the recorded streams are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// All streams mixed into a single file
    Composed,
    /// One file per stream
    Individual,
}

/// Resolution of a composed archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    #[serde(rename = "1280x720")]
    Hd,
    #[serde(rename = "640x480")]
    Sd,
}

/// Options for starting an archive
///
/// The default records audio and video, composed at 1280x720 with the
/// `bestFit` layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub has_audio: bool,
    pub has_video: bool,
    /// Layout type for composed archives, e.g. `bestFit` or `pip`
    pub layout: String,
    pub output_mode: OutputMode,
    pub resolution: Resolution,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            has_audio: true,
            has_video: true,
            layout: "bestFit".to_string(),
            output_mode: OutputMode::Composed,
            resolution: Resolution::Hd,
        }
    }
}

impl ArchiveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_audio(mut self, has_audio: bool) -> Self {
        self.has_audio = has_audio;
        self
    }

    pub fn with_video(mut self, has_video: bool) -> Self {
        self.has_video = has_video;
        self
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }
}

/// Request payload for starting an archive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StartArchiveRequest {
    pub session_id: String,
    pub has_audio: bool,
    pub has_video: bool,
    pub layout: HashMap<String, String>,
    pub name: String,
    pub output_mode: OutputMode,
    pub resolution: Resolution,
}

impl StartArchiveRequest {
    pub fn new(session_id: &str, name: &str, options: &ArchiveOptions) -> Self {
        let mut layout = HashMap::new();
        layout.insert("type".to_string(), options.layout.clone());

        Self {
            session_id: session_id.to_string(),
            has_audio: options.has_audio,
            has_video: options.has_video,
            layout,
            name: name.to_string(),
            output_mode: options.output_mode,
            resolution: options.resolution,
        }
    }
}
