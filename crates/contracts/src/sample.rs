//! Sample data model - Ingestion output
//!
//! One timed reading and the read-only sequence it belongs to.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::StreamKind;

/// A single timed reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since the reference start of a cycle
    pub offset: f64,

    /// Recorded value
    pub value: f64,
}

impl Sample {
    pub fn new(offset: f64, value: f64) -> Self {
        Self { offset, value }
    }
}

/// Ordered, immutable samples of one stream
///
/// Cloning is cheap (shared buffer), so every replay cycle can start from the
/// top of the same data without copying it.
#[derive(Debug, Clone)]
pub struct SampleSequence {
    stream: StreamKind,
    samples: Arc<[Sample]>,
}

impl SampleSequence {
    pub fn new(stream: StreamKind, samples: impl Into<Arc<[Sample]>>) -> Self {
        Self {
            stream,
            samples: samples.into(),
        }
    }

    pub fn stream(&self) -> StreamKind {
        self.stream
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Largest offset in the sequence (0.0 when empty)
    ///
    /// This is the nominal duration of one replay of this stream.
    pub fn span(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.offset)
            .fold(0.0_f64, f64::max)
    }
}

impl<'a> IntoIterator for &'a SampleSequence {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
