use crate::error::*;
use crate::event::JobEvent;
use crate::http::{HttpRequest, HttpResponse};

use bytes::Bytes;
use std::time::{Duration, Instant};

/// A trait for injecting the HTTP layer into the client.
pub trait Transport: Send + Sync {
    /// Performs a single round trip. Implementations must not retry and must return the
    /// body for every status code.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// A trait for injecting time into the poll loop.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Receives lifecycle events for presentation or logging.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: JobEvent);
}

/// A trait for persisting downloaded artifacts.
pub trait ArtifactSink: Send + Sync {
    /// Stores the artifact of job `id` and returns a displayable location.
    fn store(&self, id: &str, data: Bytes)
    -> impl Future<Output = Result<String, SinkError>> + Send;
}

