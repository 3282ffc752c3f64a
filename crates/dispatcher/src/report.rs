//! Replay reports - what a stream, a cycle and a whole run delivered

use std::time::Duration;

use contracts::StreamKind;
use observability::RunningStats;
use tokio::time::Instant;

use crate::metrics::MetricsSnapshot;

/// Result of replaying one stream once
#[derive(Debug, Clone)]
pub struct StreamReport {
    pub stream: StreamKind,
    /// Deliveries attempted
    pub attempted: u64,
    /// Responses received (any status)
    pub delivered: u64,
    /// Transport-level failures
    pub failed: u64,
    /// Received responses with a non-2xx status
    pub error_statuses: u64,
    /// Lateness of each delivery versus its target instant, in milliseconds
    pub lag_ms: RunningStats,
    /// Time from the reference start to the last attempt
    pub elapsed: Duration,
}

impl StreamReport {
    /// Report of a stream that sent nothing
    pub fn empty(stream: StreamKind) -> Self {
        Self {
            stream,
            attempted: 0,
            delivered: 0,
            failed: 0,
            error_statuses: 0,
            lag_ms: RunningStats::default(),
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn from_snapshot(
        stream: StreamKind,
        counters: MetricsSnapshot,
        lag_ms: RunningStats,
        elapsed: Duration,
    ) -> Self {
        Self {
            stream,
            attempted: counters.attempted,
            delivered: counters.delivered,
            failed: counters.failed,
            error_statuses: counters.error_statuses,
            lag_ms,
            elapsed,
        }
    }

    /// Accumulate another replay of the same stream
    pub fn merge(&mut self, other: &StreamReport) {
        self.attempted += other.attempted;
        self.delivered += other.delivered;
        self.failed += other.failed;
        self.error_statuses += other.error_statuses;
        self.lag_ms.merge(&other.lag_ms);
        self.elapsed += other.elapsed;
    }
}

/// Result of one replay cycle (both streams, one reference start)
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// 1-based cycle number
    pub cycle: u64,
    /// Reference start instant shared by both streams
    pub started_at: Instant,
    /// Until both streams drained
    pub duration: Duration,
    /// One report per stream, ordered bpm then uterus
    pub streams: Vec<StreamReport>,
}

impl CycleReport {
    pub fn stream(&self, kind: StreamKind) -> Option<&StreamReport> {
        self.streams.iter().find(|r| r.stream == kind)
    }

    /// Instant both streams had drained
    pub fn finished_at(&self) -> Instant {
        self.started_at + self.duration
    }

    pub fn attempted(&self) -> u64 {
        self.streams.iter().map(|r| r.attempted).sum()
    }
}

/// Totals of a whole replay run
#[derive(Debug, Clone)]
pub struct ReplayStats {
    pub cycles_completed: u64,
    /// Cumulative per-stream totals, ordered bpm then uterus
    pub streams: Vec<StreamReport>,
    pub duration: Duration,
}

impl Default for ReplayStats {
    fn default() -> Self {
        Self {
            cycles_completed: 0,
            streams: StreamKind::ALL.iter().map(|k| StreamReport::empty(*k)).collect(),
            duration: Duration::ZERO,
        }
    }
}

impl ReplayStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished cycle into the totals
    pub fn record_cycle(&mut self, cycle: &CycleReport) {
        self.cycles_completed += 1;
        for report in &cycle.streams {
            match self.streams.iter_mut().find(|r| r.stream == report.stream) {
                Some(total) => total.merge(report),
                None => self.streams.push(report.clone()),
            }
        }
    }

    pub fn stream(&self, kind: StreamKind) -> Option<&StreamReport> {
        self.streams.iter().find(|r| r.stream == kind)
    }

    pub fn total_attempted(&self) -> u64 {
        self.streams.iter().map(|r| r.attempted).sum()
    }

    pub fn total_failed(&self) -> u64 {
        self.streams.iter().map(|r| r.failed).sum()
    }

    /// Deliveries attempted per second of run time
    pub fn throughput(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.total_attempted() as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}
