use fieldbook_provider::ProviderError;
use thiserror::Error;

/// Errors returned by the booking flows.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The request is missing or malformed; nothing was sent upstream.
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// Every requested date violates a scheduling rule.
    #[error("{message}")]
    Rejected { rule: &'static str, message: String },

    /// The order number stayed taken after the temporary-id resubmission.
    #[error("order number {order_no} is still in conflict after resubmission")]
    Conflict { order_no: String },

    #[error(transparent)]
    Upstream(#[from] ProviderError),
}

impl BookingError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        BookingError::Validation {
            field,
            message: message.into(),
        }
    }
}
