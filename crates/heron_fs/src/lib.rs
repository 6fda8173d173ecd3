//! # Heron FileSystem Sink
//! [![Crates.io](https://img.shields.io/crates/v/heron_fs.svg)](https://crates.io/crates/heron_fs)
//! [![Docs](https://docs.rs/heron_fs/badge.svg)](https://docs.rs/heron_fs/)
//!
//! A local filesystem [`ArtifactSink`] for Heron.
//!
//! ## Features
//!
//! * **Atomic Writes**: Uses temporary files and rename operations so a failed or interrupted
//!   write never leaves a partial artifact behind.
//!
//! ## Usage
//!
//! ```no_run
//! use heron_fs::FileSystemSink;
//!
//! // Writes `<id>.mp4` into ./videos
//! let sink = FileSystemSink::new("./videos");
//!
//! // Or always writes to the same file
//! let sink = FileSystemSink::to_file("./videos/result.mp4");
//! ```

use bytes::Bytes;
use heron_core::prelude::*;
use std::path::{Path, PathBuf};
use tokio::fs;

async fn atomic_write(path: &Path, data: Bytes) -> Result<(), SinkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let mut tmp_name = path
        .file_name()
        .ok_or_else(|| SinkError::System(format!("Not a file path: {}", path.display())))?
        .to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, data).await?;
    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(SinkError::Io(e));
    }

    Ok(())
}

#[derive(Clone, Debug)]
enum Target {
    Dir(PathBuf),
    File(PathBuf),
}

#[derive(Clone, Debug)]
pub struct FileSystemSink {
    target: Target,
    extension: String,
}

impl FileSystemSink {
    /// Stores each artifact as `<dir>/<id>.mp4`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::Dir(dir.into()),
            extension: "mp4".to_string(),
        }
    }

    /// Stores every artifact at `path`, replacing the previous one.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            target: Target::File(path.into()),
            extension: "mp4".to_string(),
        }
    }

    /// Extension used in directory mode.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    fn get_path(&self, id: &str) -> Result<PathBuf, SinkError> {
        match &self.target {
            Target::File(path) => Ok(path.clone()),
            Target::Dir(dir) => {
                if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
                    return Err(SinkError::System(format!("Invalid job id for a file name: {id}")));
                }
                Ok(dir.join(format!("{id}.{}", self.extension)))
            }
        }
    }
}

impl ArtifactSink for FileSystemSink {
    async fn store(&self, id: &str, data: Bytes) -> Result<String, SinkError> {
        let path = self.get_path(id)?;
        atomic_write(&path, data).await?;
        Ok(path.to_string_lossy().to_string())
    }
}
