use std::path::PathBuf;
use thiserror::Error;

use crate::types::QueryStatus;

/// Errors a query surface can raise instead of returning a status code.
///
/// These never cross the [`RecycleBinQuery`](crate::RecycleBinQuery)
/// boundary: the query turns them into zeroed stats and a failure status.
#[derive(Debug, Error)]
pub enum Error {
    /// Root path cannot be handed to the native surface
    #[error("invalid root path: {0}")]
    InvalidPath(String),

    /// No recycle bin implementation exists for this platform or layout
    #[error("recycle bin query not supported: {0}")]
    Unsupported(String),

    /// Trash location exists but could not be read
    #[error("cannot read trash at {}: {source}", .path.display())]
    Io {
        /// Directory that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Native call signalled failure outside its status code
    #[error("native recycle bin query failed: {0}")]
    Native(String),
}

impl Error {
    /// The status code reported to callers when this error is swallowed.
    pub fn status(&self) -> QueryStatus {
        match self {
            Error::InvalidPath(_) => QueryStatus::INVALID_ARG,
            Error::Unsupported(_) => QueryStatus::NOT_IMPLEMENTED,
            Error::Io { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => QueryStatus::NOT_FOUND,
                std::io::ErrorKind::PermissionDenied => QueryStatus::ACCESS_DENIED,
                _ => QueryStatus::FAIL,
            },
            Error::Native(_) => QueryStatus::FAIL,
        }
    }
}

/// Result type for recycle bin surfaces
pub type Result<T> = std::result::Result<T, Error>;
