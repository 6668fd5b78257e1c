//! Error types for whoosh synthesis and WAV output.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WhooshError {
    /// A synthesis or format parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The output file could not be created, written or moved into place.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the WAV stream to a caller-supplied writer failed.
    #[error("failed to write WAV stream: {0}")]
    Write(#[source] std::io::Error),
}

impl WhooshError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        WhooshError::InvalidParameter(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WhooshError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WhooshError>;
