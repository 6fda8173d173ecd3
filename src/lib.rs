//! # 🪶 Heron
//![![License](https://img.shields.io/badge/license-MIT%2FApache-blue.svg)](https://github.com/NicoZweifel/heron?tab=readme-ov-file#license)
//![![Crates.io](https://img.shields.io/crates/v/heron.svg)](https://crates.io/crates/heron)
//![![Docs](https://docs.rs/heron/badge.svg)](https://docs.rs/heron/)
//!
//!> *Patient, then quick*
//!
//! A client for asynchronous generation job APIs: submit a prompt (optionally with a reference image),
//! poll the job until it finishes and download the artifact.
//!
//! This crate serves as an entry point, re-exporting the core types and
//! optionally including the client and sink implementations via feature flags.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | **`client`** | Includes the HTTP client (`heron_client`). |
//! | **`fs`** | Artifact sink for the local filesystem (`heron_fs`). |
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! heron = { version = "0.1", features = ["client", "fs"] }
//! ```
//!
//! ```rust,ignore
//! use heron::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), HeronError> {
//!     let client = HeronClient::new(ClientConfig::new("https://api.apiyi.com/v1/videos", "sk-..."));
//!     let spec = JobSpec::new("A heron fishing at dawn").with_attachment(Attachment::from_path("heron.png"));
//!
//!     let outcome = client.run(&spec, &FileSystemSink::new("./videos")).await?;
//!     println!("Saved to {}", outcome.artifact.location);
//!     Ok(())
//! }
//! ```

pub use heron_core::*;

#[cfg(feature = "client")]
pub mod client {
    pub use heron_client::*;
}

#[cfg(feature = "fs")]
pub mod fs {
    pub use heron_fs::*;
}

pub mod prelude {
    pub use heron_core::prelude::*;

    #[cfg(feature = "client")]
    pub use heron_client::{ClientConfig, HeronClient, JobOutcome};

    #[cfg(feature = "fs")]
    pub use heron_fs::FileSystemSink;
}
