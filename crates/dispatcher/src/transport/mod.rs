//! Delivery transport implementations

mod http;

pub use self::http::{HttpTransport, HttpTransportConfig};
