//! Error types for the settings crate

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur loading or saving a settings document.
///
/// Missing keys and unparsable values are not errors; reads fall back to
/// the caller's default instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Settings file exists but could not be read or written
    #[error("settings file {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// XML reader or writer error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Document text is not a usable settings tree
    #[error("malformed settings document: {0}")]
    Malformed(String),

    /// Name cannot be used as an element tag
    #[error("invalid setting name {0:?}")]
    InvalidName(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, Error>;
