//! Error type shared by the walker, the archive appenders and the
//! configuration loader.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can end a collection run.
///
/// Errors raised while reading individual subdirectories during the walk are
/// not represented here; the walker skips those entries.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The root directory did not exist when the walk started
    #[error("source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The extension criterion is not a usable list of suffixes
    #[error("invalid extension criteria: {0}")]
    InvalidCriteria(String),

    /// A file was enumerated but was gone by the time it was archived
    #[error("file vanished before it could be archived: {}", .0.display())]
    SourceVanished(PathBuf),

    /// The archive cannot be created at the requested location
    #[error("invalid destination {}: {}", .path.display(), .reason)]
    InvalidDestination { path: PathBuf, reason: String },

    #[error("archive error on {}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl CollectorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CollectorError::Io { path: path.into(), source }
    }

    pub(crate) fn archive(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        CollectorError::Archive { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, CollectorError>;
