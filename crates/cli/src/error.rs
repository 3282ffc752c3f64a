//! Error types for CLI operations.

use contracts::StreamKind;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Target address is not a usable base URL
    #[error("invalid target '{target}': {message}")]
    InvalidTarget { target: String, message: String },

    /// Flag value out of range
    #[error("invalid value for --{flag}: {message}")]
    InvalidArgument { flag: String, message: String },

    /// Sample file could not be loaded
    #[error("failed to load {stream} samples")]
    Load {
        stream: StreamKind,
        #[source]
        source: ingestion::LoadError,
    },

    /// Replay pipeline could not be assembled
    #[error("failed to set up replay")]
    Setup(#[from] dispatcher::DispatcherError),
}

impl CliError {
    pub fn invalid_target(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            target: target.into(),
            message: message.into(),
        }
    }

    pub fn invalid_argument(flag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            flag: flag.into(),
            message: message.into(),
        }
    }

    pub fn load(stream: StreamKind, source: ingestion::LoadError) -> Self {
        Self::Load { stream, source }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
