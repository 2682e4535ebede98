//! Turns a chosen slot into a confirmed reservation.

use serde_json::{json, Value};

use crate::candidate::{CandidateBuilder, PendingOrder};
use crate::orchestrator::OrderReservationOrchestrator;

/// What to do when the reservation itself fails.
#[derive(Debug, Clone, Default)]
pub struct ConfirmOptions {
    /// Report success with `forceContinue` instead of the provider error.
    pub allow_force_continue: bool,
    /// Make sure this order exists on the provider for manual follow-up.
    /// Only resolved once the reservation has failed.
    pub fallback_order: Option<PendingOrder>,
}

/// Response body plus the HTTP status to send it with.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationResult {
    pub status: u16,
    pub body: Value,
}

impl ConfirmationResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.body
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct ReservationConfirmer {
    orchestrator: OrderReservationOrchestrator,
    builder: CandidateBuilder,
}

impl ReservationConfirmer {
    #[must_use]
    pub fn new(orchestrator: OrderReservationOrchestrator, builder: CandidateBuilder) -> Self {
        Self {
            orchestrator,
            builder,
        }
    }

    /// Reserves `reservation_id`. Infallible by construction: provider
    /// failures become the returned payload.
    ///
    /// - success: the provider payload, unchanged;
    /// - failure with force-continue: `{success: true, forceContinue: true}`;
    /// - failure otherwise: the provider's raw error body and status.
    pub async fn confirm(&self, reservation_id: &str, options: ConfirmOptions) -> ConfirmationResult {
        let error = match self.orchestrator.provider().reserve(reservation_id).await {
            Ok(body) => {
                tracing::info!(reservation_id, "reservation confirmed");
                return ConfirmationResult { status: 200, body };
            }
            Err(e) => e,
        };

        tracing::warn!(reservation_id, error = %error, "reservation failed");

        let order_created = match options.fallback_order {
            Some(pending) => Some(self.keep_fallback_order(pending).await),
            None => None,
        };

        if options.allow_force_continue {
            let mut body = json!({
                "success": true,
                "forceContinue": true,
                "message": "Reservation failed; continuing without a confirmed slot",
            });
            if let Some(created) = order_created {
                body["orderCreated"] = Value::Bool(created);
            }
            return ConfirmationResult { status: 200, body };
        }

        let mut body = error.payload();
        if let (Some(created), Some(map)) = (order_created, body.as_object_mut()) {
            map.insert("orderCreated".to_owned(), Value::Bool(created));
        }
        ConfirmationResult {
            status: error.status(),
            body,
        }
    }

    /// Resolves the held-back order and makes sure it exists on the
    /// provider. Returns whether that worked.
    async fn keep_fallback_order(&self, pending: PendingOrder) -> bool {
        let order_no = pending.order.order_no.trim().to_owned();
        let candidate = match self.builder.build_pending(pending).await {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::warn!(order_no = %order_no, error = %e, "fallback order data unusable");
                return false;
            }
        };
        match self.orchestrator.ensure_order(candidate).await {
            Ok(submission) => {
                tracing::info!(
                    order_no = %order_no,
                    temporary_order_no = ?submission.temporary_order_no,
                    "order kept for manual follow-up"
                );
                true
            }
            Err(e) => {
                tracing::warn!(order_no = %order_no, error = %e, "fallback order creation failed");
                false
            }
        }
    }
}
