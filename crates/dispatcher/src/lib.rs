//! # Dispatcher
//!
//! Timed replay of sample streams.
//!
//! Responsibilities:
//! - Pace each stream's samples against a shared reference instant
//! - Deliver every sample through a `DeliveryTransport` (HTTP by default)
//! - Run both streams concurrently per cycle, optionally looping
//! - Report per-stream and per-cycle delivery counts

pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod report;
pub mod scheduler;
pub mod transport;

#[cfg(test)]
mod testing;

pub use contracts::{DeliveryOutcome, DeliveryTransport, Destination, SampleSequence};
pub use error::DispatcherError;
pub use metrics::{MetricsSnapshot, StreamMetrics};
pub use orchestrator::{ReplayConfig, ReplayOrchestrator};
pub use report::{CycleReport, ReplayStats, StreamReport};
pub use scheduler::{scheduled_instant, TemporalDispatcher};
pub use transport::{HttpTransport, HttpTransportConfig};
