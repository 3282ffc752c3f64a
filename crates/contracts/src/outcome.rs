//! DeliveryOutcome - result of one network call

use std::fmt;

/// Outcome of delivering one sample
///
/// Any received response counts as delivered, whatever its status; only
/// transport-level failures (refused, timed out, unresolvable) are `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// A response was received
    Delivered { status: u16 },

    /// No response; carries the transport error description
    Failed { error: String },
}

impl DeliveryOutcome {
    pub fn delivered(status: u16) -> Self {
        Self::Delivered { status }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }

    /// Status code, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Delivered { status } => Some(*status),
            Self::Failed { .. } => None,
        }
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered { status } => write!(f, "status={status}"),
            Self::Failed { error } => write!(f, "error: {error}"),
        }
    }
}
