//! # Heron Client
//! [![Crates.io](https://img.shields.io/crates/v/heron_client.svg)](https://crates.io/crates/heron_client)
//! [![Docs](https://docs.rs/heron_client/badge.svg)](https://docs.rs/heron_client/)
//!
//! An async client for "submit → poll → fetch" generation job APIs.
//!
//! Submits a prompt (optionally with a reference image), polls the job under a bounded
//! wait budget and downloads the finished artifact.
//!
//! ## Example: Text to Video
//!
//! ```no_run
//!  use heron_client::{ClientConfig, HeronClient};
//!  use heron_core::prelude::*;
//!
//!  async fn run() -> Result<(), HeronError> {
//!     let config = ClientConfig::new("https://api.apiyi.com/v1/videos", "sk-...");
//!     let client = HeronClient::new(config);
//!
//!     let spec = JobSpec::new("Two cats racing around a garden").with_seconds(10);
//!     let job = client.submit(&spec).await?;
//!     let done = client.await_completion(&job.id, PollPolicy::default()).await?;
//!     let video = client.fetch_artifact(&done.id).await?;
//!     std::fs::write("video.mp4", &video)?;
//!     Ok(())
//! }
//! ```

mod clock;
mod events;
mod payload;
mod transport;

pub use clock::TokioClock;
pub use events::TracingEvents;
pub use payload::PayloadBuilder;
pub use transport::ReqwestTransport;

use bytes::Bytes;
use heron_core::prelude::*;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeronError>;

/// Why a single status query did not yield a record. Never surfaced to callers.
#[derive(Error, Debug)]
enum PollError {
    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("server returned {0}: {1}")]
    Status(u16, String),

    #[error("failed to parse job record: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Job collection endpoint, e.g. `https://api.apiyi.com/v1/videos`.
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header.
    pub credential: String,
    /// Used by [`HeronClient::run`].
    pub poll: PollPolicy,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credential: credential.into(),
            poll: PollPolicy::default(),
        }
    }

    pub fn with_poll(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoredArtifact {
    pub location: String,
    pub bytes: usize,
}

/// Result of a full [`HeronClient::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct JobOutcome {
    /// The completed record.
    pub record: JobRecord,
    pub mode: SubmissionMode,
    pub artifact: StoredArtifact,
}

/// Drives one job at a time through submission, polling and download.
#[derive(Clone)]
pub struct HeronClient<T = ReqwestTransport, C = TokioClock, E = TracingEvents> {
    config: ClientConfig,
    transport: T,
    clock: C,
    events: E,
}

impl HeronClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_parts(config, ReqwestTransport::default(), TokioClock, TracingEvents)
    }
}

impl<T: Transport, C: Clock, E: EventSink> HeronClient<T, C, E> {
    pub fn with_parts(config: ClientConfig, transport: T, clock: C, events: E) -> Self {
        Self {
            config,
            transport,
            clock,
            events,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    fn url(&self, route: &str, id: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{}{}", base, route.replace("{id}", id))
    }

    fn auth_request(&self, request: HttpRequest) -> HttpRequest {
        request.header("Authorization", self.config.credential.clone())
    }

    /// Encodes `spec` and submits it. See [`HeronClient::submit_body`].
    pub async fn submit(&self, spec: &JobSpec) -> Result<JobRecord> {
        let body = PayloadBuilder::new(&self.events).build(spec).await?;
        self.submit_body(body).await
    }

    /// Submits an already encoded body. Only an HTTP 200 with a valid job record succeeds,
    /// nothing is retried.
    pub async fn submit_body(&self, body: EncodedBody) -> Result<JobRecord> {
        self.events.emit(JobEvent::Submitting { mode: body.mode() });

        let request = self
            .auth_request(HttpRequest::post(self.url(routes::JOBS, ""), body))
            .header("Accept", "application/json");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|source| HeronError::Transport {
                stage: Stage::Submit,
                source,
            })?;

        if !response.is_ok() {
            return Err(HeronError::Submission {
                status: response.status,
                message: response.text(),
            });
        }

        let record = JobRecord::from_slice(&response.body).map_err(|e| HeronError::Submission {
            status: response.status,
            message: format!("Failed to parse job record: {e}"),
        })?;

        self.events.emit(JobEvent::Submitted {
            record: record.clone(),
        });

        Ok(record)
    }

    async fn poll_once(&self, id: &str) -> std::result::Result<JobRecord, PollError> {
        let request = self.auth_request(HttpRequest::get(self.url(routes::JOB_BY_ID, id)));
        let response = self.transport.send(request).await?;

        if !response.is_ok() {
            return Err(PollError::Status(response.status, response.text()));
        }

        Ok(JobRecord::from_slice(&response.body)?)
    }

    /// Polls job `id` until it completes, fails, or `policy.max_wait` has elapsed.
    ///
    /// The budget is checked before every query, so the total wait may overrun it by one
    /// interval plus one round trip. Transport errors, non-200 answers and unparseable
    /// bodies are retried after the interval and only consume budget.
    pub async fn await_completion(&self, id: &str, policy: PollPolicy) -> Result<JobRecord> {
        let start = self.clock.now();
        let mut attempt = 0;

        loop {
            let elapsed = self.clock.now().saturating_duration_since(start);
            if elapsed > policy.max_wait {
                self.events.emit(JobEvent::TimedOut {
                    id: id.to_string(),
                    elapsed,
                });
                return Err(HeronError::Timeout {
                    id: id.to_string(),
                    elapsed,
                });
            }

            attempt += 1;
            self.events.emit(JobEvent::Polling {
                id: id.to_string(),
                attempt,
                elapsed,
            });

            match self.poll_once(id).await {
                Ok(record) => match record.status {
                    JobStatus::Completed => {
                        self.events.emit(JobEvent::Completed {
                            record: record.clone(),
                        });
                        return Ok(record);
                    }
                    JobStatus::Failed => {
                        self.events.emit(JobEvent::Failed {
                            record: record.clone(),
                        });
                        return Err(HeronError::JobFailed {
                            record: Box::new(record),
                        });
                    }
                    _ => self.events.emit(JobEvent::Progress { record, elapsed }),
                },
                Err(e) => self.events.emit(JobEvent::PollFailed {
                    id: id.to_string(),
                    attempt,
                    reason: e.to_string(),
                }),
            }

            self.clock.sleep(policy.interval).await;
        }
    }

    /// Downloads the artifact of a completed job. Not retried.
    pub async fn fetch_artifact(&self, id: &str) -> Result<Bytes> {
        self.events.emit(JobEvent::Downloading { id: id.to_string() });

        let request = self.auth_request(HttpRequest::get(self.url(routes::JOB_CONTENT, id)));
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|source| HeronError::Transport {
                stage: Stage::Fetch,
                source,
            })?;

        if !response.is_ok() {
            return Err(HeronError::Fetch {
                id: id.to_string(),
                status: response.status,
                message: response.text(),
            });
        }

        Ok(response.body)
    }

    /// Fetches the artifact and hands it to `sink`. The sink is untouched if the fetch fails.
    pub async fn download<S: ArtifactSink>(&self, id: &str, sink: &S) -> Result<StoredArtifact> {
        let data = self.fetch_artifact(id).await?;
        let bytes = data.len();
        let location = sink.store(id, data).await?;

        self.events.emit(JobEvent::Stored {
            id: id.to_string(),
            location: location.clone(),
            bytes,
        });

        Ok(StoredArtifact { location, bytes })
    }

    /// Submit, wait with the configured [`PollPolicy`], then download into `sink`.
    /// The first failing stage aborts the rest.
    pub async fn run<S: ArtifactSink>(&self, spec: &JobSpec, sink: &S) -> Result<JobOutcome> {
        let body = PayloadBuilder::new(&self.events).build(spec).await?;
        let mode = body.mode();

        let submitted = self.submit_body(body).await?;
        let record = self.await_completion(&submitted.id, self.config.poll).await?;
        let artifact = self.download(&record.id, sink).await?;

        Ok(JobOutcome {
            record,
            mode,
            artifact,
        })
    }
}
