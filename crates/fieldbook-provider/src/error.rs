use thiserror::Error;

use crate::types::GeocodingCandidate;

/// Provider code for an order number that already exists.
pub const ERR_DUPLICATE_ORDER: &str = "ERR_DUP_ORDER_NO";
/// Provider code for an address that geocoded to more than one place.
pub const ERR_MULTIPLE_GEOCODING_RESULTS: &str = "ERR_LOC_MULTIPLE_RESULTS";

/// Errors returned by the scheduling-provider and geocoder clients.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider already has an order with this number.
    #[error("duplicate order number {order_no}")]
    DuplicateOrder { order_no: String },

    /// The order's address matched several places; candidates are in provider order.
    #[error("location is ambiguous ({} candidates)", .candidates.len())]
    AmbiguousLocation { candidates: Vec<GeocodingCandidate> },

    /// Any other `success: false` envelope or non-2xx status.
    #[error("provider error (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        /// Raw response body, passed through to callers that surface it.
        body: serde_json::Value,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ProviderError {
    /// Network failure, timeout or 5xx: worth one more attempt.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        crate::retry::is_retriable(self)
    }

    /// HTTP status to report upstream when surfacing this error verbatim.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            ProviderError::Api { status, .. } => *status,
            ProviderError::Http(e) => e.status().map_or(502, |s| s.as_u16()),
            ProviderError::DuplicateOrder { .. } => 409,
            ProviderError::AmbiguousLocation { .. } => 422,
            ProviderError::Deserialize { .. } | ProviderError::InvalidBaseUrl { .. } => 502,
        }
    }

    /// Raw payload for pass-through responses. Synthesised when the provider
    /// did not send a JSON body.
    #[must_use]
    pub fn payload(&self) -> serde_json::Value {
        match self {
            ProviderError::Api { body, .. } if body.is_object() => body.clone(),
            other => serde_json::json!({ "success": false, "message": other.to_string() }),
        }
    }
}
