#![allow(dead_code)]

use bytes::Bytes;
use heron_client::{ClientConfig, HeronClient};
use heron_core::prelude::*;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const BASE_URL: &str = "https://api.example.test/v1/videos";
pub const CREDENTIAL: &str = "sk-test";

/// Answers requests from a fixed script and records what was sent.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body.to_string())));
        self
    }

    pub fn respond_bytes(self, status: u16, body: &'static [u8]) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, Bytes::from_static(body))));
        self
    }

    pub fn fail(self, reason: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Network(reason.to_string())));
        self
    }

    /// Queues `times` identical responses.
    pub fn repeat(self, times: usize, status: u16, body: &str) -> Self {
        (0..times).fold(self, |t, _| t.respond(status, body))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("script exhausted".into())))
    }
}

/// Time only moves when the client sleeps.
#[derive(Clone)]
pub struct ManualClock {
    start: Instant,
    offset: Arc<Mutex<Duration>>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        *self.offset.lock().unwrap() += duration;
        self.sleeps.lock().unwrap().push(duration);
        std::future::ready(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingEvents(Arc<Mutex<Vec<JobEvent>>>);

impl RecordingEvents {
    pub fn all(&self) -> Vec<JobEvent> {
        self.0.lock().unwrap().clone()
    }
}

impl EventSink for RecordingEvents {
    fn emit(&self, event: JobEvent) {
        self.0.lock().unwrap().push(event);
    }
}

#[derive(Clone, Default)]
pub struct MemorySink(Arc<Mutex<Vec<(String, Bytes)>>>);

impl MemorySink {
    pub fn stored(&self) -> Vec<(String, Bytes)> {
        self.0.lock().unwrap().clone()
    }
}

impl ArtifactSink for MemorySink {
    async fn store(&self, id: &str, data: Bytes) -> Result<String, SinkError> {
        self.0.lock().unwrap().push((id.to_string(), data));
        Ok(format!("memory://{id}"))
    }
}

pub struct Harness {
    pub client: HeronClient<ScriptedTransport, ManualClock, RecordingEvents>,
    pub transport: ScriptedTransport,
    pub clock: ManualClock,
    pub events: RecordingEvents,
}

pub fn harness(transport: ScriptedTransport) -> Harness {
    harness_with(ClientConfig::new(BASE_URL, CREDENTIAL), transport)
}

pub fn harness_with(config: ClientConfig, transport: ScriptedTransport) -> Harness {
    let clock = ManualClock::new();
    let events = RecordingEvents::default();
    let client = HeronClient::with_parts(config, transport.clone(), clock.clone(), events.clone());
    Harness {
        client,
        transport,
        clock,
        events,
    }
}

pub fn record(id: &str, status: &str, progress: u32) -> String {
    format!(
        r#"{{"id":"{id}","status":"{status}","progress":{progress},"url":null,"created_at":1700000000,"completed_at":null}}"#
    )
}

pub fn completed(id: &str) -> String {
    format!(
        r#"{{"id":"{id}","status":"completed","progress":100,"url":"https://cdn.example.test/{id}.mp4","created_at":1700000000,"completed_at":1700000240}}"#
    )
}

pub fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}
