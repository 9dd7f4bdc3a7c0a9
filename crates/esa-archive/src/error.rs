//! Error types for esa-archive

use std::path::PathBuf;

/// Result type for archive operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a feature archive.
///
/// Every variant is fatal to the resolution that triggered it: unreadable
/// version metadata must never produce a partially published result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read archive {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("archive {path} is not a readable zip: {source}")]
    InvalidArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to read entry '{entry}' in {path}: {reason}")]
    EntryRead {
        path: PathBuf,
        entry: String,
        reason: String,
    },

    #[error("no readable manifest in entry '{entry}' of {path}: {reason}")]
    MissingManifest {
        path: PathBuf,
        entry: String,
        reason: String,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing_manifest(
        path: impl Into<PathBuf>,
        entry: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MissingManifest {
            path: path.into(),
            entry: entry.into(),
            reason: reason.into(),
        }
    }
}
