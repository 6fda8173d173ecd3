use heron_core::prelude::*;
use tracing::{debug, error, info, warn};

/// Default [`EventSink`], renders every event as a structured `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEvents;

impl EventSink for TracingEvents {
    fn emit(&self, event: JobEvent) {
        match event {
            JobEvent::AttachmentMissing { path } => {
                warn!(path = %path.display(), "Reference image not found, submitting text-only")
            }
            JobEvent::Submitting { mode } => info!(%mode, "Submitting generation request"),
            JobEvent::Submitted { record } => info!(
                id = %record.id,
                status = %record.status,
                created_at = ?record.created_at_utc(),
                "Job submitted"
            ),
            JobEvent::Polling {
                id,
                attempt,
                elapsed,
            } => debug!(%id, attempt, elapsed_secs = elapsed.as_secs(), "Querying job status"),
            JobEvent::Progress { record, elapsed } => {
                if record.status.is_known() {
                    info!(
                        id = %record.id,
                        status = %record.status,
                        progress = record.progress,
                        elapsed_secs = elapsed.as_secs(),
                        "Job in progress"
                    )
                } else {
                    warn!(
                        id = %record.id,
                        status = %record.status,
                        progress = record.progress,
                        "Unknown job status, still polling"
                    )
                }
            }
            JobEvent::PollFailed {
                id,
                attempt,
                reason,
            } => warn!(%id, attempt, %reason, "Status query failed, retrying"),
            JobEvent::Completed { record } => info!(
                id = %record.id,
                url = ?record.url,
                completed_at = ?record.completed_at_utc(),
                "Job completed"
            ),
            JobEvent::Failed { record } => {
                error!(id = %record.id, progress = record.progress, "Job failed")
            }
            JobEvent::TimedOut { id, elapsed } => {
                error!(%id, elapsed_secs = elapsed.as_secs(), "Gave up waiting for job")
            }
            JobEvent::Downloading { id } => info!(%id, "Downloading artifact"),
            JobEvent::Stored {
                id,
                location,
                bytes,
            } => info!(%id, %location, bytes, "Artifact stored"),
        }
    }
}
