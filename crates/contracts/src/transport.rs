//! DeliveryTransport trait - Dispatcher output interface
//!
//! Defines the abstract interface for delivering one sample value.

use crate::{DeliveryOutcome, Destination};

/// Sample delivery trait
///
/// Implementations are shared by both stream dispatchers of a cycle, so
/// delivery takes `&self`.
#[trait_variant::make(DeliveryTransport: Send)]
pub trait LocalDeliveryTransport {
    /// Transport name (used for logging)
    fn name(&self) -> &str;

    /// Deliver one value to `destination`
    ///
    /// Must always return a determinate outcome; transport failures are
    /// reported as [`DeliveryOutcome::Failed`], never panicked or raised.
    async fn deliver(&self, destination: &Destination, value: f64) -> DeliveryOutcome;
}
