//! ReplayOrchestrator - runs both streams per cycle, optionally looping

use std::sync::Arc;

use contracts::{ContractError, DeliveryTransport, Destination, SampleSequence, StreamKind};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument};

use crate::error::DispatcherError;
use crate::report::{CycleReport, ReplayStats, StreamReport};
use crate::scheduler::TemporalDispatcher;

/// Replay configuration
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Start a new cycle as soon as both streams drained
    pub loop_playback: bool,

    /// Stop looping after this many cycles (None = until cancelled)
    pub max_cycles: Option<u64>,

    /// Replay speed multiplier (1.0 = recorded pace)
    pub speed_multiplier: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            loop_playback: false,
            max_cycles: None,
            speed_multiplier: 1.0,
        }
    }
}

impl ReplayConfig {
    pub fn validate(&self) -> Result<(), ContractError> {
        if !self.speed_multiplier.is_finite() || self.speed_multiplier <= 0.0 {
            return Err(ContractError::invalid_setting(
                "speed_multiplier",
                format!("must be a positive number, got {}", self.speed_multiplier),
            ));
        }
        if self.max_cycles == Some(0) {
            return Err(ContractError::invalid_setting(
                "max_cycles",
                "must be at least 1 when set",
            ));
        }
        Ok(())
    }
}

/// Coordinates the bpm and uterus dispatchers
///
/// Each cycle captures one reference instant, hands it by value to both
/// stream tasks and waits for both to finish. Dropping the future returned by
/// [`run`](Self::run) aborts the in-flight stream tasks.
pub struct ReplayOrchestrator<T> {
    streams: [(SampleSequence, Destination); 2],
    transport: Arc<T>,
    config: ReplayConfig,
}

impl<T> ReplayOrchestrator<T>
where
    T: DeliveryTransport + Send + Sync + 'static,
{
    /// Create an orchestrator posting to `<base_url>/bpm` and `<base_url>/uterus`
    pub fn new(
        bpm: SampleSequence,
        uterus: SampleSequence,
        base_url: &str,
        transport: Arc<T>,
        config: ReplayConfig,
    ) -> Result<Self, DispatcherError> {
        config.validate()?;
        expect_stream(&bpm, StreamKind::Bpm)?;
        expect_stream(&uterus, StreamKind::Uterus)?;

        let bpm_destination = Destination::for_stream(base_url, StreamKind::Bpm)?;
        let uterus_destination = Destination::for_stream(base_url, StreamKind::Uterus)?;

        Ok(Self {
            streams: [(bpm, bpm_destination), (uterus, uterus_destination)],
            transport,
            config,
        })
    }

    /// Run cycles until done (single cycle, `max_cycles`, or forever)
    #[instrument(name = "replay_run", skip(self))]
    pub async fn run(&self) -> ReplayStats {
        let started = Instant::now();
        let mut stats = ReplayStats::new();
        let mut cycle: u64 = 0;

        info!(
            loop_playback = self.config.loop_playback,
            max_cycles = ?self.config.max_cycles,
            speed = self.config.speed_multiplier,
            "Start sending data"
        );

        loop {
            cycle += 1;
            let report = self.run_cycle(cycle).await;
            stats.record_cycle(&report);

            if !self.config.loop_playback {
                break;
            }
            if let Some(max) = self.config.max_cycles {
                if cycle >= max {
                    info!(cycles = cycle, "Reached max cycles limit");
                    break;
                }
            }

            debug!(next_cycle = cycle + 1, "Looping replay");
        }

        stats.duration = started.elapsed();
        info!(
            cycles = stats.cycles_completed,
            deliveries = stats.total_attempted(),
            failed = stats.total_failed(),
            "All requests completed"
        );

        stats
    }

    /// Replay both streams once against a fresh reference instant
    #[instrument(name = "replay_cycle", skip(self))]
    pub async fn run_cycle(&self, cycle: u64) -> CycleReport {
        let reference_start = Instant::now();
        let speed = self.config.speed_multiplier;

        info!(cycle, "Cycle started");

        let mut tasks = JoinSet::new();
        for (sequence, destination) in &self.streams {
            let dispatcher = TemporalDispatcher::new(
                sequence.clone(),
                destination.clone(),
                Arc::clone(&self.transport),
            );
            tasks.spawn(async move { dispatcher.dispatch(reference_start, speed).await });
        }

        let mut streams = Vec::with_capacity(self.streams.len());
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(report) => streams.push(report),
                Err(e) => error!(cycle, error = %e, "Stream task failed"),
            }
        }

        // a stream whose task died still gets a (zero) report
        for (sequence, _) in &self.streams {
            if !streams.iter().any(|r| r.stream == sequence.stream()) {
                streams.push(StreamReport::empty(sequence.stream()));
            }
        }
        streams.sort_by_key(|r| r.stream);

        let duration = reference_start.elapsed();
        observability::record_cycle_completed(cycle, duration.as_secs_f64());

        let report = CycleReport {
            cycle,
            started_at: reference_start,
            duration,
            streams,
        };

        info!(
            cycle,
            deliveries = report.attempted(),
            duration_secs = format!("{:.3}", duration.as_secs_f64()),
            "Cycle completed"
        );

        report
    }
}

fn expect_stream(sequence: &SampleSequence, expected: StreamKind) -> Result<(), ContractError> {
    if sequence.stream() == expected {
        Ok(())
    } else {
        Err(ContractError::invalid_setting(
            expected.as_str(),
            format!("expected a {} sequence, got {}", expected, sequence.stream()),
        ))
    }
}
