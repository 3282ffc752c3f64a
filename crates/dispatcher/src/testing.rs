//! Test transport that records every call

use std::sync::{Arc, Mutex};
use std::time::Duration;

use contracts::{DeliveryOutcome, DeliveryTransport, Destination, StreamKind};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Call {
    pub stream: StreamKind,
    pub value: f64,
    pub at: Instant,
}

/// Records deliveries; values listed in `fail_on` come back as failures
#[derive(Default)]
pub(crate) struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    fail_on: Vec<f64>,
    delay: Duration,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_on(values: &[f64]) -> Arc<Self> {
        Arc::new(Self {
            fail_on: values.to_vec(),
            ..Self::default()
        })
    }

    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, stream: StreamKind) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.stream == stream)
            .collect()
    }
}

impl DeliveryTransport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    async fn deliver(&self, destination: &Destination, value: f64) -> DeliveryOutcome {
        let at = Instant::now();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.calls.lock().unwrap().push(Call {
            stream: destination.stream(),
            value,
            at,
        });

        if self.fail_on.contains(&value) {
            DeliveryOutcome::failed("simulated transport failure")
        } else {
            DeliveryOutcome::delivered(200)
        }
    }
}
