//! Destination - fully-qualified route of one stream

use std::fmt;

use crate::{ContractError, StreamKind};

/// URL a stream's samples are posted to (`<base>/<stream>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    stream: StreamKind,
    url: String,
}

impl Destination {
    /// Build the destination of `stream` under `base`
    ///
    /// `base` may be a bare `host:port`, in which case `http://` is assumed.
    /// Trailing slashes are dropped so the route never contains `//`.
    pub fn for_stream(base: &str, stream: StreamKind) -> Result<Self, ContractError> {
        let base = normalize_base(base)?;
        Ok(Self {
            stream,
            url: format!("{}/{}", base, stream.as_str()),
        })
    }

    pub fn stream(&self) -> StreamKind {
        self.stream
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request URL carrying one sample value
    ///
    /// The value is always written with six fractional digits.
    pub fn url_for_value(&self, value: f64) -> String {
        format!("{}?value={:.6}", self.url, value)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Prefix a scheme when missing and strip trailing slashes
pub fn normalize_base(base: &str) -> Result<String, ContractError> {
    let trimmed = base.trim();
    if trimmed.is_empty() {
        return Err(ContractError::invalid_target(base, "target address is empty"));
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else if trimmed.contains("://") {
        return Err(ContractError::invalid_target(
            base,
            "only http and https targets are supported",
        ));
    } else {
        format!("http://{trimmed}")
    };

    Ok(with_scheme.trim_end_matches('/').to_string())
}
