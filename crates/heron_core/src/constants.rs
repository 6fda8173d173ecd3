pub mod fields {
    pub const PROMPT: &str = "prompt";
    pub const MODEL: &str = "model";
    pub const SIZE: &str = "size";
    pub const SECONDS: &str = "seconds";
    pub const INPUT_REFERENCE: &str = "input_reference";
}

pub mod routes {
    /// Submission, the base url itself.
    pub const JOBS: &str = "";
    /// Status query, relative to the base url.
    pub const JOB_BY_ID: &str = "/{id}";
    /// Artifact download, relative to the base url.
    pub const JOB_CONTENT: &str = "/{id}/content";
}

pub mod status {
    pub const QUEUED: &str = "queued";
    pub const SUBMITTED: &str = "submitted";
    pub const IN_PROGRESS: &str = "in_progress";
    pub const COMPLETED: &str = "completed";
    pub const FAILED: &str = "failed";
}

pub mod defaults {
    pub const BASE_URL: &str = "https://api.apiyi.com/v1/videos";
    pub const MODEL: &str = "sora-2";
    pub const SIZE: &str = "1280x720";
    pub const SECONDS: &str = "15";
    pub const POLL_INTERVAL_SECS: u64 = 30;
    pub const MAX_WAIT_SECS: u64 = 600;
}

pub mod mime {
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    /// Used when the attachment extension is not recognized.
    pub const FALLBACK: &str = PNG;
}
