//! # Text to Video Example
//!
//! Submits a text-only job, waits for it and writes the video to `./videos/<id>.mp4`.
//!
//! ## Usage
//!
//! ```sh
//! HERON_API_KEY=sk-... cargo run --example text_to_video --features "client fs"
//! ```

use heron::prelude::*;
use std::env;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let base_url = env::var("HERON_BASE_URL").unwrap_or_else(|_| defaults::BASE_URL.to_string());
    let api_key = env::var("HERON_API_KEY")?;

    // Poll more often than the default, short clips finish quickly.
    let config = ClientConfig::new(base_url, api_key).with_poll(PollPolicy::new(
        Duration::from_secs(10),
        Duration::from_secs(600),
    ));
    let client = HeronClient::new(config);

    let spec = JobSpec::new("A heron standing still in a misty lake, then striking at a fish")
        .with_size("720x1280")
        .with_seconds(10);

    let outcome = client.run(&spec, &FileSystemSink::new("./videos")).await?;
    println!(
        "Job {} finished, {} bytes saved to {}",
        outcome.record.id, outcome.artifact.bytes, outcome.artifact.location
    );

    Ok(())
}
