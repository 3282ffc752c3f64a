//! Replay pipeline module.

mod orchestrator;
mod stats;

pub use orchestrator::{load_sample_sets, Pipeline, PipelineConfig};
pub use stats::{PipelineStats, SampleSetSummary};
