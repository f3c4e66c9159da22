//! Error types for asset loading and decoding

use std::path::PathBuf;

/// Errors surfaced by the asset pipeline.
///
/// Decode failures are terminal for the single call that produced them;
/// there is no partial-success result and no retrying. The one deliberate
/// exception is pattern-based replacement files: a present-but-malformed
/// replacement is treated as absent and never surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed, truncated or inconsistent binary input
    #[error("Malformed asset data: {0}")]
    Format(String),

    /// Named asset absent from both the override directory and the archive
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Out-of-range index or coordinate
    #[error("Index {index} out of bounds (limit {limit})")]
    OutOfBounds { index: usize, limit: usize },

    /// Filesystem failure while reading the archive or an override file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Shorthand for a [`Error::Format`] with a formatted message
    pub fn format(message: impl Into<String>) -> Self {
        Error::Format(message.into())
    }
}

impl From<lode_voc::VocError> for Error {
    fn from(err: lode_voc::VocError) -> Self {
        Error::Format(err.to_string())
    }
}

impl From<lode_imf::ImfError> for Error {
    fn from(err: lode_imf::ImfError) -> Self {
        Error::Format(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
