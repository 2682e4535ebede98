//! Creates or repairs the provider-side order record.
//!
//! Both the slot query and the plain order upsert carry the full order, so
//! both go through [`OrderReservationOrchestrator::submit_with_recovery`]:
//! a duplicate order number is answered by one resubmission under a
//! temporary number, and a transient failure by one retry under the same
//! number. Never more than two submissions per call.

use std::future::Future;
use std::sync::Arc;

use fieldbook_core::{ids, ClockPolicy, OrderCandidate};
use fieldbook_provider::{ProviderError, SchedulingClient};

use crate::attempt::ReservationAttempt;
use crate::error::BookingError;

/// What happens to a temporary order once the call succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderUsage {
    /// The order must outlive the call (manual follow-up); keep it.
    Durable,
    /// The order only served this call; delete the temporary record.
    Transient,
}

/// Result of a recovered submission. `order_no` is always the caller's own
/// number, even when the provider saw a temporary one.
#[derive(Debug, Clone)]
pub struct Submission<T> {
    pub value: T,
    pub order_no: String,
    pub temporary_order_no: Option<String>,
    pub submissions: u32,
}

#[derive(Debug, Clone)]
pub struct OrderReservationOrchestrator {
    provider: Arc<SchedulingClient>,
    clock: ClockPolicy,
}

impl OrderReservationOrchestrator {
    #[must_use]
    pub fn new(provider: Arc<SchedulingClient>, clock: ClockPolicy) -> Self {
        Self { provider, clock }
    }

    #[must_use]
    pub fn provider(&self) -> &SchedulingClient {
        &self.provider
    }

    /// Runs `submit` against the provider with conflict and transient-error
    /// recovery.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Conflict`] when the temporary number is also refused.
    /// - [`BookingError::Upstream`] for any other provider failure, including
    ///   [`ProviderError::AmbiguousLocation`], which is returned untouched for
    ///   the caller to resolve.
    pub async fn submit_with_recovery<T, F, Fut>(
        &self,
        candidate: OrderCandidate,
        usage: OrderUsage,
        mut submit: F,
    ) -> Result<Submission<T>, BookingError>
    where
        F: FnMut(OrderCandidate) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = ReservationAttempt::new(candidate);

        while let Some(sent) = attempt.submit() {
            match submit(sent).await {
                Ok(value) => {
                    attempt.confirm();
                    let temporary_order_no = attempt.temporary_order_no().map(str::to_owned);
                    if let (Some(temp), OrderUsage::Transient) = (&temporary_order_no, usage) {
                        self.discard_temporary(temp).await;
                    }
                    return Ok(Submission {
                        value,
                        order_no: attempt.original_order_no().to_owned(),
                        temporary_order_no,
                        submissions: attempt.attempt_count(),
                    });
                }
                Err(ProviderError::DuplicateOrder { order_no }) => {
                    let temp = ids::temporary_order_no(self.clock.now_utc());
                    if attempt.conflict(temp.clone()) {
                        tracing::info!(
                            order_no = %order_no,
                            temporary_order_no = %temp,
                            "order number taken, resubmitting under a temporary number"
                        );
                    } else {
                        tracing::warn!(
                            order_no = attempt.original_order_no(),
                            attempts = attempt.attempt_count(),
                            "order number conflict persisted"
                        );
                        return Err(BookingError::Conflict {
                            order_no: attempt.original_order_no().to_owned(),
                        });
                    }
                }
                Err(err @ ProviderError::AmbiguousLocation { .. }) => {
                    attempt.fail(&err, false);
                    return Err(err.into());
                }
                Err(err) => {
                    let transient = err.is_transient();
                    if attempt.fail(&err, transient) {
                        tracing::warn!(
                            order_no = attempt.original_order_no(),
                            error = %err,
                            "transient provider failure, retrying once"
                        );
                    } else {
                        tracing::warn!(
                            order_no = attempt.original_order_no(),
                            attempts = attempt.attempt_count(),
                            error = %err,
                            "order submission failed"
                        );
                        return Err(err.into());
                    }
                }
            }
        }

        // Only reachable if the loop ends without a terminal outcome.
        Err(BookingError::Conflict {
            order_no: attempt.original_order_no().to_owned(),
        })
    }

    /// Makes sure the order exists on the provider, keeping any temporary
    /// record that recovery created.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit_with_recovery`].
    pub async fn ensure_order(
        &self,
        candidate: OrderCandidate,
    ) -> Result<Submission<Option<String>>, BookingError> {
        let provider = Arc::clone(&self.provider);
        self.submit_with_recovery(candidate, OrderUsage::Durable, move |sent| {
            let provider = Arc::clone(&provider);
            async move { provider.create_or_update_order(&sent).await }
        })
        .await
    }

    async fn discard_temporary(&self, order_no: &str) {
        match self.provider.delete_order(order_no).await {
            Ok(()) => tracing::debug!(order_no, "temporary order deleted"),
            Err(e) => tracing::warn!(order_no, error = %e, "failed to delete temporary order"),
        }
    }
}
