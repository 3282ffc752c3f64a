//! Replay metrics
//!
//! Prometheus-facing recorders plus an online statistics helper used for
//! in-process summaries.

use contracts::{DeliveryOutcome, StreamKind};
use metrics::{counter, gauge, histogram};

/// Record one delivery attempt
///
/// Labelled by stream and by `status` (the HTTP code, or `error` when the
/// transport failed).
pub fn record_delivery(stream: StreamKind, outcome: &DeliveryOutcome) {
    let status = match outcome.status() {
        Some(code) => code.to_string(),
        None => "error".to_string(),
    };

    counter!(
        "ctg_replay_deliveries_total",
        "stream" => stream.as_str(),
        "status" => status
    )
    .increment(1);

    if !outcome.is_delivered() {
        counter!("ctg_replay_delivery_failures_total", "stream" => stream.as_str()).increment(1);
    }
}

/// Record how late a delivery was issued relative to its target instant
pub fn record_schedule_lag_ms(stream: StreamKind, lag_ms: f64) {
    histogram!("ctg_replay_schedule_lag_ms", "stream" => stream.as_str()).record(lag_ms);
}

/// Record a finished replay cycle
pub fn record_cycle_completed(cycle: u64, duration_secs: f64) {
    counter!("ctg_replay_cycles_total").increment(1);
    gauge!("ctg_replay_last_cycle").set(cycle as f64);
    histogram!("ctg_replay_cycle_duration_seconds").record(duration_secs);
}

/// Record the size of a loaded sample set
pub fn record_samples_loaded(stream: StreamKind, count: usize) {
    gauge!("ctg_replay_samples_loaded", "stream" => stream.as_str()).set(count as f64);
}

/// Summary of a [`RunningStats`]
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// Fold another set of observations into this one
    pub fn merge(&mut self, other: &RunningStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }

        let total = self.count + other.count;
        let delta = other.mean - self.mean;
        let mean = self.mean + delta * other.count as f64 / total as f64;
        let m2 = self.m2
            + other.m2
            + delta * delta * (self.count as f64 * other.count as f64) / total as f64;

        self.count = total;
        self.mean = mean;
        self.m2 = m2;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from(self)
    }
}
