use crate::job::{JobRecord, SubmissionMode};
use std::path::PathBuf;
use std::time::Duration;

/// Progress notifications emitted while a job moves through its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    /// A reference path was configured but does not exist; the job is sent text-only.
    AttachmentMissing { path: PathBuf },
    Submitting { mode: SubmissionMode },
    Submitted { record: JobRecord },
    /// A status query is about to be sent.
    Polling {
        id: String,
        attempt: u32,
        elapsed: Duration,
    },
    /// The job is still running.
    Progress { record: JobRecord, elapsed: Duration },
    /// A status query failed and will be retried after the poll interval.
    PollFailed {
        id: String,
        attempt: u32,
        reason: String,
    },
    Completed { record: JobRecord },
    Failed { record: JobRecord },
    TimedOut { id: String, elapsed: Duration },
    Downloading { id: String },
    Stored {
        id: String,
        location: String,
        bytes: usize,
    },
}
