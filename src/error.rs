use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a recording. Nothing is retried; the first failure
/// is returned as-is.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("could not determine the current directory")]
    CurrentDir(#[source] io::Error),

    #[error("failed to create output directory {}", path.display())]
    CreateDir { path: PathBuf, #[source] source: io::Error },

    #[error("failed to read filesystem statistics for {}", path.display())]
    Stat { path: PathBuf, #[source] source: io::Error },

    #[error("failed to open {} for append", path.display())]
    Open { path: PathBuf, #[source] source: io::Error },

    #[error("failed to lock {}", path.display())]
    Lock { path: PathBuf, #[source] source: io::Error },

    #[error("failed to write row to {}", path.display())]
    Write { path: PathBuf, #[source] source: csv::Error },
}

pub type Result<T> = std::result::Result<T, RecordError>;
