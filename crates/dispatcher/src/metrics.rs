//! Per-stream delivery counters

use std::sync::atomic::{AtomicU64, Ordering};

use contracts::DeliveryOutcome;

/// Counters for one stream dispatcher
#[derive(Debug, Default)]
pub struct StreamMetrics {
    /// Deliveries attempted
    attempted: AtomicU64,
    /// Responses received (any status)
    delivered: AtomicU64,
    /// Transport-level failures
    failed: AtomicU64,
    /// Responses with a non-2xx status
    error_statuses: AtomicU64,
}

impl StreamMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one delivery attempt and its outcome
    pub fn record(&self, outcome: &DeliveryOutcome) {
        self.attempted.fetch_add(1, Ordering::Relaxed);
        match outcome.status() {
            Some(status) => {
                self.delivered.fetch_add(1, Ordering::Relaxed);
                if !(200..300).contains(&status) {
                    self.error_statuses.fetch_add(1, Ordering::Relaxed);
                }
            }
            None => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn attempted(&self) -> u64 {
        self.attempted.load(Ordering::Relaxed)
    }

    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn error_statuses(&self) -> u64 {
        self.error_statuses.load(Ordering::Relaxed)
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            attempted: self.attempted(),
            delivered: self.delivered(),
            failed: self.failed(),
            error_statuses: self.error_statuses(),
        }
    }
}

/// Snapshot of stream metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub attempted: u64,
    pub delivered: u64,
    pub failed: u64,
    pub error_statuses: u64,
}
