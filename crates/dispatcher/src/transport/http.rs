//! HttpTransport - one POST per sample

use std::error::Error as _;
use std::time::Duration;

use contracts::{DeliveryOutcome, DeliveryTransport, Destination};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::DispatcherError;

/// Configuration for HttpTransport
#[derive(Debug, Clone, Default)]
pub struct HttpTransportConfig {
    /// Whole-request timeout (None = wait for the OS/stack limits)
    pub timeout: Option<Duration>,
}

/// Transport that posts each value as a query parameter
///
/// Requests carry a JSON content type but no body. Every received response is
/// a delivery, whatever its status.
pub struct HttpTransport {
    name: String,
    client: Client,
}

impl HttpTransport {
    /// Create a new HttpTransport
    pub fn new(config: HttpTransportConfig) -> Result<Self, DispatcherError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| DispatcherError::transport_init("http", e.to_string()))?;

        debug!(timeout = ?config.timeout, "HttpTransport created");

        Ok(Self {
            name: "http".to_string(),
            client,
        })
    }
}

impl DeliveryTransport for HttpTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "http_transport_deliver",
        skip(self, destination),
        fields(stream = %destination.stream())
    )]
    async fn deliver(&self, destination: &Destination, value: f64) -> DeliveryOutcome {
        let url = destination.url_for_value(value);

        let result = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await;

        // the response is dropped here, returning its connection to the pool
        match result {
            Ok(response) => DeliveryOutcome::delivered(response.status().as_u16()),
            Err(e) => DeliveryOutcome::failed(describe(&e)),
        }
    }
}

/// reqwest's Display omits the cause (refused, dns, ...); append the chain
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
