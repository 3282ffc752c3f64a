//! Ingestion error types

use std::fmt;

use thiserror::Error;

/// Column of a sample row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Offset,
    Value,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Offset => f.write_str("offset"),
            Column::Value => f.write_str("value"),
        }
    }
}

/// Sample set load errors
///
/// Every variant is fatal for the load; no partial sequence is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source could not be opened
    #[error("failed to open '{path}': {source}")]
    Open {
        /// Source path
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Header row could not be read
    #[error("failed to read header of '{path}': {source}")]
    Header {
        /// Source path
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Source contains no header row
    #[error("'{path}' has no header row")]
    MissingHeader {
        /// Source path
        path: String,
    },

    /// A data row could not be read (bad quoting, invalid UTF-8, I/O)
    #[error("failed to read record of '{path}': {source}")]
    Record {
        /// Source path
        path: String,
        #[source]
        source: csv::Error,
    },

    /// A numeric field could not be parsed
    #[error("failed to parse {column} '{raw}' at {path}:{line}: {reason}")]
    InvalidField {
        /// Source path
        path: String,
        /// 1-based line number of the row
        line: u64,
        /// Which field failed
        column: Column,
        /// The field exactly as it appeared in the source
        raw: String,
        /// Why it was rejected
        reason: String,
    },
}

impl LoadError {
    /// Raw field text for `InvalidField` errors
    pub fn raw_field(&self) -> Option<&str> {
        match self {
            LoadError::InvalidField { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Ingestion Result type alias
pub type Result<T> = std::result::Result<T, LoadError>;
