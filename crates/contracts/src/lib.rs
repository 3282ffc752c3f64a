//! # Contracts
//!
//! Shared interface contracts between the replay crates: the sample data
//! model, stream routing, delivery outcomes and the transport trait.
//! Business crates depend on this crate only; reverse dependencies are
//! prohibited.
//!
//! ## Time Model
//! - Sample offsets are seconds (f64) relative to a cycle's reference start
//! - Offsets are kept in source order; consumers must tolerate disorder

mod destination;
mod error;
mod outcome;
mod sample;
mod stream;
mod transport;

pub use destination::{normalize_base, Destination};
pub use error::*;
pub use outcome::DeliveryOutcome;
pub use sample::{Sample, SampleSequence};
pub use stream::StreamKind;
pub use transport::{DeliveryTransport, LocalDeliveryTransport};
