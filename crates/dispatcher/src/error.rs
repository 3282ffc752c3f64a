//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
///
/// Only setup can fail; delivery failures are outcomes, not errors.
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Transport construction error
    #[error("failed to create transport '{name}': {message}")]
    TransportInit { name: String, message: String },

    /// Invalid target or setting (from contract)
    #[error("replay setup error: {0}")]
    Contract(#[from] contracts::ContractError),
}

impl DispatcherError {
    /// Create a transport init error
    pub fn transport_init(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransportInit {
            name: name.into(),
            message: message.into(),
        }
    }
}
