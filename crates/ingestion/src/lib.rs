//! # Ingestion
//!
//! Sample set loading.
//!
//! Responsibilities:
//! - Decode comma-separated `offset,value` tables into a `SampleSequence`
//! - Skip the header row, `#` comment lines and short rows
//! - Fail fast, with the offending raw field, on malformed numbers
//!
//! ## Usage Example
//!
//! ```no_run
//! use contracts::StreamKind;
//! use std::path::Path;
//!
//! let bpm = ingestion::load_samples(Path::new("bpm.csv"), StreamKind::Bpm).unwrap();
//! println!("{} samples over {:.1}s", bpm.len(), bpm.span());
//! ```

mod error;
mod loader;

// Re-exports
pub use contracts::{Sample, SampleSequence, StreamKind};
pub use error::{Column, LoadError, Result};
pub use loader::{load_from_reader, load_samples};
