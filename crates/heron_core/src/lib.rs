//! # Heron Core
//! [![Crates.io](https://img.shields.io/crates/v/heron_core.svg)](https://crates.io/crates/heron_core)
//! [![Docs](https://docs.rs/heron_core/badge.svg)](https://docs.rs/heron_core/)
//!
//! Types and traits for the ecosystem.
//!
//! Defines the wire model of the asynchronous generation API and the seams the client is built on.
//!
//! - **[`JobSpec`](job::JobSpec)**: What to generate. An attachment switches the job to reference (image) mode.
//! - **[`JobRecord`](job::JobRecord)**: The latest state of a job as reported by the service.
//! - **[`Transport`](traits::Transport)**: Trait for implementing the HTTP layer.
//! - **[`Clock`](traits::Clock)**: Trait for implementing time, so poll loops can be tested without waiting.
//! - **[`ArtifactSink`](traits::ArtifactSink)**: Trait for persisting downloaded artifacts.

pub mod constants;
pub mod error;
pub mod event;
pub mod http;
pub mod job;
pub mod traits;

pub mod prelude {
    pub use super::constants::*;
    pub use super::error::*;
    pub use super::event::*;
    pub use super::http::*;
    pub use super::job::*;
    pub use super::traits::*;
}
