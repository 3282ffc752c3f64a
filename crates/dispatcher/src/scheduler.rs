//! TemporalDispatcher - paces one stream against a reference start instant

use std::sync::Arc;
use std::time::Duration;

use contracts::{DeliveryOutcome, DeliveryTransport, Destination, Sample, SampleSequence};
use observability::RunningStats;
use tokio::time::{sleep_until, Instant};
use tracing::{info, instrument, warn};

use crate::metrics::StreamMetrics;
use crate::report::StreamReport;

/// Upper bound for a single wait, mirroring tokio's own far-future clamp
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Sends one stream's samples, each at `reference_start + offset / speed`
///
/// Samples go out strictly in sequence order. An offset whose instant has
/// already passed is sent at once; a failed delivery is logged and the next
/// sample keeps its own schedule.
pub struct TemporalDispatcher<T> {
    sequence: SampleSequence,
    destination: Destination,
    transport: Arc<T>,
    metrics: Arc<StreamMetrics>,
}

impl<T: DeliveryTransport + Sync> TemporalDispatcher<T> {
    pub fn new(sequence: SampleSequence, destination: Destination, transport: Arc<T>) -> Self {
        Self {
            sequence,
            destination,
            transport,
            metrics: Arc::new(StreamMetrics::new()),
        }
    }

    /// Live counters, readable while `dispatch` runs
    pub fn metrics(&self) -> &Arc<StreamMetrics> {
        &self.metrics
    }

    /// Replay the whole sequence, returning once the last sample was attempted
    #[instrument(
        name = "temporal_dispatch",
        skip_all,
        fields(stream = %self.sequence.stream())
    )]
    pub async fn dispatch(&self, reference_start: Instant, speed: f64) -> StreamReport {
        let stream = self.sequence.stream();
        let before = self.metrics.snapshot();
        let mut lag_ms = RunningStats::default();

        info!(
            stream = %stream,
            samples = self.sequence.len(),
            destination = %self.destination,
            transport = self.transport.name(),
            "Start sending {}",
            stream
        );

        for sample in &self.sequence {
            let target = scheduled_instant(reference_start, sample.offset, speed);
            sleep_until(target).await;

            let lag = Instant::now().saturating_duration_since(target).as_secs_f64() * 1000.0;
            lag_ms.push(lag);
            observability::record_schedule_lag_ms(stream, lag);

            let outcome = self.transport.deliver(&self.destination, sample.value).await;
            self.metrics.record(&outcome);
            observability::record_delivery(stream, &outcome);
            self.report(sample, &outcome, lag);
        }

        let after = self.metrics.snapshot();
        let counters = crate::metrics::MetricsSnapshot {
            attempted: after.attempted - before.attempted,
            delivered: after.delivered - before.delivered,
            failed: after.failed - before.failed,
            error_statuses: after.error_statuses - before.error_statuses,
        };

        info!(
            stream = %stream,
            attempted = counters.attempted,
            failed = counters.failed,
            "All {} requests completed",
            stream
        );

        StreamReport::from_snapshot(stream, counters, lag_ms, reference_start.elapsed())
    }

    fn report(&self, sample: &Sample, outcome: &DeliveryOutcome, lag_ms: f64) {
        let stream = self.sequence.stream();
        match outcome {
            DeliveryOutcome::Delivered { status } => {
                info!(
                    stream = %stream,
                    offset = format!("{:.3}s", sample.offset),
                    value = format!("{:.6}", sample.value),
                    status = *status,
                    lag_ms = format!("{:.1}", lag_ms),
                    "Delivered"
                );
            }
            DeliveryOutcome::Failed { error } => {
                warn!(
                    stream = %stream,
                    offset = format!("{:.3}s", sample.offset),
                    value = format!("{:.6}", sample.value),
                    error = %error,
                    "Delivery failed"
                );
            }
        }
    }
}

/// Instant at which a sample with `offset` is due
///
/// Zero, negative and NaN offsets are due immediately.
pub fn scheduled_instant(reference_start: Instant, offset: f64, speed: f64) -> Instant {
    let secs = offset / speed;
    if secs.is_nan() || secs <= 0.0 {
        return reference_start;
    }

    let delay = Duration::try_from_secs_f64(secs)
        .unwrap_or(FAR_FUTURE)
        .min(FAR_FUTURE);
    reference_start + delay
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingTransport;
    use contracts::StreamKind;

    fn dispatcher_for(
        offsets: &[(f64, f64)],
        transport: Arc<RecordingTransport>,
    ) -> TemporalDispatcher<RecordingTransport> {
        let samples: Vec<Sample> = offsets.iter().map(|(o, v)| Sample::new(*o, *v)).collect();
        let sequence = SampleSequence::new(StreamKind::Bpm, samples);
        let destination = Destination::for_stream("localhost:9999", StreamKind::Bpm).unwrap();
        TemporalDispatcher::new(sequence, destination, transport)
    }

    #[test]
    fn test_scheduled_instant() {
        let start = Instant::now();
        assert_eq!(scheduled_instant(start, 0.0, 1.0), start);
        assert_eq!(scheduled_instant(start, -2.0, 1.0), start);
        assert_eq!(scheduled_instant(start, f64::NAN, 1.0), start);
        assert_eq!(
            scheduled_instant(start, 1.5, 1.0),
            start + Duration::from_millis(1500)
        );
        // double speed halves the wait
        assert_eq!(
            scheduled_instant(start, 1.0, 2.0),
            start + Duration::from_millis(500)
        );
        assert_eq!(scheduled_instant(start, 1e300, 1.0), start + FAR_FUTURE);
    }

    #[tokio::test]
    async fn test_deliveries_follow_offsets() {
        let transport = RecordingTransport::new();
        let dispatcher =
            dispatcher_for(&[(0.0, 1.0), (0.5, 2.0), (1.0, 3.0)], Arc::clone(&transport));

        let start = Instant::now();
        let report = dispatcher.dispatch(start, 1.0).await;

        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(report.attempted, 3);
        assert_eq!(report.delivered, 3);

        let second = calls[1].at.duration_since(start);
        let third = calls[2].at.duration_since(start);
        assert!(calls[0].at.duration_since(start) < Duration::from_millis(100));
        assert!(second >= Duration::from_millis(500), "second at {second:?}");
        assert!(second < Duration::from_millis(800), "second at {second:?}");
        assert!(third >= Duration::from_millis(1000), "third at {third:?}");
        assert!(third < Duration::from_millis(1300), "third at {third:?}");
    }

    #[tokio::test]
    async fn test_zero_and_negative_offsets_send_immediately() {
        let transport = RecordingTransport::new();
        let dispatcher = dispatcher_for(&[(0.0, 1.0), (-3.0, 2.0)], Arc::clone(&transport));

        let start = Instant::now();
        let report = dispatcher.dispatch(start, 1.0).await;

        assert_eq!(report.attempted, 2);
        assert_eq!(report.failed, 0);
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_list_order_kept_for_unsorted_offsets() {
        let transport = RecordingTransport::new();
        let dispatcher = dispatcher_for(
            &[(0.2, 1.0), (0.0, 2.0), (0.1, 3.0)],
            Arc::clone(&transport),
        );

        let start = Instant::now();
        dispatcher.dispatch(start, 1.0).await;

        let values: Vec<f64> = transport.calls().iter().map(|c| c.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
        // the later samples were already overdue once the first went out
        let calls = transport.calls();
        assert!(calls[1].at.duration_since(calls[0].at) < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_failure_does_not_delay_next_sample() {
        let transport = RecordingTransport::failing_on(&[1.0]);
        let dispatcher = dispatcher_for(&[(0.0, 1.0), (0.2, 2.0)], Arc::clone(&transport));

        let start = Instant::now();
        let report = dispatcher.dispatch(start, 1.0).await;

        assert_eq!(report.attempted, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.delivered, 1);

        let second = transport.calls()[1].at.duration_since(start);
        assert!(second >= Duration::from_millis(200));
        assert!(second < Duration::from_millis(450), "second at {second:?}");
    }

    #[tokio::test]
    async fn test_slow_delivery_does_not_shift_schedule() {
        // each delivery takes 150ms; targets stay anchored to the reference start
        let transport = RecordingTransport::with_delay(Duration::from_millis(150));
        let dispatcher = dispatcher_for(&[(0.0, 1.0), (0.3, 2.0)], Arc::clone(&transport));

        let start = Instant::now();
        dispatcher.dispatch(start, 1.0).await;

        let second = transport.calls()[1].at.duration_since(start);
        assert!(second >= Duration::from_millis(300));
        assert!(second < Duration::from_millis(420), "second at {second:?}");
    }

    #[tokio::test]
    async fn test_speed_multiplier_scales_waits() {
        let transport = RecordingTransport::new();
        let dispatcher = dispatcher_for(&[(0.0, 1.0), (0.4, 2.0)], Arc::clone(&transport));

        let start = Instant::now();
        dispatcher.dispatch(start, 2.0).await;

        let second = transport.calls()[1].at.duration_since(start);
        assert!(second >= Duration::from_millis(200));
        assert!(second < Duration::from_millis(380), "second at {second:?}");
    }

    #[tokio::test]
    async fn test_metrics_accumulate_across_dispatches() {
        let transport = RecordingTransport::new();
        let dispatcher = dispatcher_for(&[(0.0, 1.0)], Arc::clone(&transport));

        let first = dispatcher.dispatch(Instant::now(), 1.0).await;
        let second = dispatcher.dispatch(Instant::now(), 1.0).await;

        assert_eq!(first.attempted, 1);
        assert_eq!(second.attempted, 1);
        assert_eq!(dispatcher.metrics().attempted(), 2);
    }

    #[tokio::test]
    async fn test_empty_sequence_returns_immediately() {
        let transport = RecordingTransport::new();
        let dispatcher = dispatcher_for(&[], Arc::clone(&transport));

        let report = dispatcher.dispatch(Instant::now(), 1.0).await;
        assert_eq!(report.attempted, 0);
        assert!(transport.calls().is_empty());
    }
}
