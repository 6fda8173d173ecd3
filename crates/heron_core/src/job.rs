use crate::constants::{defaults, mime, status};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A generation request to submit to the remote job service.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpec {
    /// Text prompt describing what to generate.
    pub prompt: String,
    /// Model identifier, e.g. "sora-2".
    pub model: String,
    /// Output size, e.g. "1280x720" or "720x1280".
    pub size: String,
    /// Duration in seconds, sent as text.
    pub seconds: String,
    /// Reference image for image-conditioned generation.
    ///
    /// [`None`] submits a text-only job.
    pub attachment: Option<Attachment>,
}

impl JobSpec {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: defaults::MODEL.to_string(),
            size: defaults::SIZE.to_string(),
            seconds: defaults::SECONDS.to_string(),
            attachment: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Accepts either text ("15") or an integer (15).
    pub fn with_seconds(mut self, seconds: impl ToString) -> Self {
        self.seconds = seconds.to_string();
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// Where the bytes of an [`Attachment`] come from.
#[derive(Debug, Clone, PartialEq)]
pub enum AttachmentSource {
    Path(PathBuf),
    Bytes(Bytes),
}

/// A reference file sent alongside the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub source: AttachmentSource,
    /// File name sent with the multipart part.
    pub filename: String,
}

impl Attachment {
    /// Uses the final path component as the file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "reference".to_string());
        Self {
            source: AttachmentSource::Path(path),
            filename,
        }
    }

    pub fn from_bytes(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            source: AttachmentSource::Bytes(data.into()),
            filename: filename.into(),
        }
    }

    /// Advisory content type inferred from the file extension.
    pub fn content_type(&self) -> &'static str {
        let ext = Path::new(&self.filename)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());

        match ext.as_deref() {
            Some("png") => mime::PNG,
            Some("jpg" | "jpeg") => mime::JPEG,
            _ => mime::FALLBACK,
        }
    }
}

/// Generation mode, selected only by the presence of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionMode {
    Text,
    Reference,
}

impl fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionMode::Text => f.write_str("text"),
            SubmissionMode::Reference => f.write_str("image"),
        }
    }
}

/// Status reported by the remote service.
///
/// Only [`JobStatus::Completed`] and [`JobStatus::Failed`] are terminal. Every other value,
/// including ones the service may introduce later, means the job is still running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Queued,
    Submitted,
    InProgress,
    Completed,
    Failed,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Queued => status::QUEUED,
            JobStatus::Submitted => status::SUBMITTED,
            JobStatus::InProgress => status::IN_PROGRESS,
            JobStatus::Completed => status::COMPLETED,
            JobStatus::Failed => status::FAILED,
            JobStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// `true` for intermediate values the service is known to send.
    pub fn is_known(&self) -> bool {
        !matches!(self, JobStatus::Other(_))
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            status::QUEUED => JobStatus::Queued,
            status::SUBMITTED => JobStatus::Submitted,
            status::IN_PROGRESS => JobStatus::InProgress,
            status::COMPLETED => JobStatus::Completed,
            status::FAILED => JobStatus::Failed,
            _ => JobStatus::Other(value),
        }
    }
}

impl From<JobStatus> for String {
    fn from(value: JobStatus) -> Self {
        match value {
            JobStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The latest known state of a job, as returned by submission and status queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Identifier assigned by the service.
    pub id: String,
    pub status: JobStatus,
    /// Percentage reported by the service. Not guaranteed to be monotonic.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub progress: u32,
    /// Result location, only set once completed.
    #[serde(default)]
    pub url: Option<String>,
    /// Epoch seconds.
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Epoch seconds, only meaningful once completed.
    #[serde(default)]
    pub completed_at: Option<i64>,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

impl JobRecord {
    pub fn from_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(|s| DateTime::from_timestamp(s, 0))
    }

    pub fn completed_at_utc(&self) -> Option<DateTime<Utc>> {
        self.completed_at.and_then(|s| DateTime::from_timestamp(s, 0))
    }
}

/// Timing of the status poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Fixed delay between two status queries.
    pub interval: Duration,
    /// Budget measured from the start of the loop. Checked before every query,
    /// so the actual wait can exceed it by one interval plus one round trip.
    pub max_wait: Duration,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(defaults::POLL_INTERVAL_SECS),
            max_wait: Duration::from_secs(defaults::MAX_WAIT_SECS),
        }
    }
}
