use crate::job::JobRecord;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single HTTP exchange, before any response was received.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, TLS or body read failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The request could not be built (e.g., invalid header value or mime type).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Error, Debug)]
pub enum SinkError {
    /// Low-level I/O error while persisting the artifact.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure.
    #[error("Sink failure: {0}")]
    System(String),
}

/// The pipeline stage an error aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Submit,
    Poll,
    Fetch,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Submit => f.write_str("submit"),
            Stage::Poll => f.write_str("poll"),
            Stage::Fetch => f.write_str("fetch"),
        }
    }
}

#[derive(Error, Debug)]
pub enum HeronError {
    /// The attachment exists but could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No response was received for a submission or content request.
    /// Poll requests never surface this, they are retried until the wait budget runs out.
    #[error("Transport error during {stage}: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: TransportError,
    },

    /// The service rejected the submission, or answered with an unexpected body.
    /// Never retried.
    #[error("Submission failed with status {status}: {message}")]
    Submission { status: u16, message: String },

    /// The service reported the job as failed.
    #[error("Job {} failed", record.id)]
    JobFailed { record: Box<JobRecord> },

    /// The job did not reach a terminal state within the wait budget.
    #[error("Timed out waiting for job {id} after {}s", elapsed.as_secs())]
    Timeout { id: String, elapsed: Duration },

    /// The artifact of a completed job could not be downloaded.
    #[error("Fetching content of job {id} failed with status {status}: {message}")]
    Fetch {
        id: String,
        status: u16,
        message: String,
    },

    /// The artifact was downloaded but could not be stored.
    #[error("Storing artifact failed: {0}")]
    Sink(#[from] SinkError),
}

impl HeronError {
    pub fn stage(&self) -> Stage {
        match self {
            HeronError::Io(_) | HeronError::Submission { .. } => Stage::Submit,
            HeronError::JobFailed { .. } | HeronError::Timeout { .. } => Stage::Poll,
            HeronError::Fetch { .. } | HeronError::Sink(_) => Stage::Fetch,
            HeronError::Transport { stage, .. } => *stage,
        }
    }
}
