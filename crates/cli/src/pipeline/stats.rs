//! Replay statistics and dry-run summaries.

use contracts::{SampleSequence, StreamKind};
use dispatcher::ReplayStats;
use serde::Serialize;

/// Statistics from a replay run
#[derive(Debug, Clone)]
pub struct PipelineStats {
    /// Samples loaded for the bpm stream
    pub bpm_samples: usize,

    /// Samples loaded for the uterus stream
    pub uterus_samples: usize,

    /// Delivery totals from the orchestrator
    pub replay: ReplayStats,
}

impl PipelineStats {
    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Replay Statistics ===\n");

        println!("Overview");
        println!("  Duration: {:.2}s", self.replay.duration.as_secs_f64());
        println!("  Cycles completed: {}", self.replay.cycles_completed);
        println!(
            "  Samples loaded: bpm={}, uterus={}",
            self.bpm_samples, self.uterus_samples
        );
        println!("  Deliveries: {}", self.replay.total_attempted());
        println!("  Throughput: {:.2} req/s", self.replay.throughput());

        for report in &self.replay.streams {
            println!("\nStream {}", report.stream);
            println!("  Attempted: {}", report.attempted);
            println!("  Responses: {}", report.delivered);
            println!("  Non-2xx responses: {}", report.error_statuses);
            println!("  Transport failures: {}", report.failed);
            println!("  Schedule lag (ms): {}", report.lag_ms.summary());
        }

        println!();
    }
}

/// Dry-run description of one loaded sample set
#[derive(Debug, Clone, Serialize)]
pub struct SampleSetSummary {
    pub stream: StreamKind,
    pub path: String,
    pub samples: usize,
    /// Largest offset, i.e. nominal replay duration
    pub span_secs: f64,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    /// Whether offsets never decrease in file order
    pub offsets_sorted: bool,
}

impl SampleSetSummary {
    pub fn new(sequence: &SampleSequence, path: impl Into<String>) -> Self {
        let values = sequence.iter().map(|s| s.value);
        let min_value = values.clone().reduce(f64::min);
        let max_value = values.reduce(f64::max);
        let offsets_sorted = sequence
            .samples()
            .windows(2)
            .all(|pair| pair[0].offset <= pair[1].offset);

        Self {
            stream: sequence.stream(),
            path: path.into(),
            samples: sequence.len(),
            span_secs: sequence.span(),
            min_value,
            max_value,
            offsets_sorted,
        }
    }
}
