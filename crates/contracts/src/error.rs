//! Shared error definitions

use thiserror::Error;

/// Unified contract error type
#[derive(Debug, Error)]
pub enum ContractError {
    /// Target address cannot be turned into a destination URL
    #[error("invalid target '{target}': {message}")]
    InvalidTarget { target: String, message: String },

    /// Invalid replay settings
    #[error("invalid replay setting '{field}': {message}")]
    InvalidSetting { field: String, message: String },
}

impl ContractError {
    /// Create invalid target error
    pub fn invalid_target(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create invalid setting error
    pub fn invalid_setting(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field: field.into(),
            message: message.into(),
        }
    }
}
