use thiserror::Error;

/// Failure of a single call to an external capability.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status}: {body}")]
    UnexpectedStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: &'static str },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Failure of a whole visibility operation.
///
/// Per-unit failures (one harvest call, one engine probe, the bulk volume
/// lookup) never surface here; they are recorded as outcome values instead.
#[derive(Debug, Error)]
pub enum VisibilityError {
    #[error("not configured: {0}")]
    Configuration(String),

    #[error("upstream call failed: {0}")]
    Upstream(#[from] ProviderError),

    #[error("brand must not be blank")]
    InvalidBrand,
}
