use anyhow::Context;
use clap::Parser;
use heron_client::{ClientConfig, HeronClient, PayloadBuilder};
use heron_core::prelude::*;
use heron_fs::FileSystemSink;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Submit a generation job, wait for it and download the result.
#[derive(Parser, Debug)]
#[command(name = "heron", version, about)]
struct Cli {
    /// Job collection endpoint.
    #[arg(long, env = "HERON_BASE_URL", default_value = defaults::BASE_URL)]
    base_url: String,

    /// Sent verbatim as the Authorization header.
    #[arg(long, env = "HERON_API_KEY", hide_env_values = true)]
    api_key: String,

    /// What to generate.
    #[arg(short, long)]
    prompt: String,

    #[arg(long, default_value = defaults::MODEL)]
    model: String,

    /// e.g. 1280x720 or 720x1280
    #[arg(long, default_value = defaults::SIZE)]
    size: String,

    /// Duration of the generated video.
    #[arg(long, default_value = defaults::SECONDS)]
    seconds: String,

    /// Reference image. Falls back to text-only if the file does not exist.
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Seconds between two status queries.
    #[arg(long, default_value_t = defaults::POLL_INTERVAL_SECS)]
    poll_interval: u64,

    /// Seconds to wait for the job before giving up.
    #[arg(long, default_value_t = defaults::MAX_WAIT_SECS)]
    max_wait: u64,

    /// Output file. Defaults to `sora_<mode>_video_<id suffix>.mp4`.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn spec(&self) -> JobSpec {
        let spec = JobSpec::new(&self.prompt)
            .with_model(&self.model)
            .with_size(&self.size)
            .with_seconds(&self.seconds);

        match &self.image {
            Some(path) => spec.with_attachment(Attachment::from_path(path)),
            None => spec,
        }
    }

    fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url, &self.api_key).with_poll(PollPolicy::new(
            Duration::from_secs(self.poll_interval),
            Duration::from_secs(self.max_wait),
        ))
    }
}

/// `sora_<mode>_video_<last 8 chars of id>.mp4`
fn default_output(id: &str, mode: SubmissionMode) -> PathBuf {
    let chars: Vec<char> = id.chars().collect();
    let suffix: String = chars[chars.len().saturating_sub(8)..].iter().collect();
    PathBuf::from(format!("sora_{mode}_video_{suffix}.mp4"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let started = chrono::Local::now();
    let client = HeronClient::new(cli.config());
    let spec = cli.spec();

    let body = PayloadBuilder::new(client.events())
        .build(&spec)
        .await
        .context("Failed to read reference image")?;
    let mode = body.mode();

    let job = client
        .submit_body(body)
        .await
        .context("Failed to submit generation request")?;

    let record = client
        .await_completion(&job.id, client.config().poll)
        .await
        .with_context(|| format!("Job {} did not complete", job.id))?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&record.id, mode));

    let stored = client
        .download(&record.id, &FileSystemSink::to_file(&output))
        .await
        .with_context(|| format!("Failed to download job {}", record.id))?;

    info!(
        took_secs = (chrono::Local::now() - started).num_seconds(),
        "Pipeline finished"
    );
    println!("{} ({} bytes)", stored.location, stored.bytes);

    Ok(())
}
