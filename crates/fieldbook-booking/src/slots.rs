//! Slot availability with scheduling-rule gating before and after the
//! provider call.

use chrono::NaiveDate;
use fieldbook_core::{ClockPolicy, DateRejection, OrderCandidate, Region, TimeSlot};
use fieldbook_provider::ProviderError;

use crate::error::BookingError;
use crate::orchestrator::{OrderReservationOrchestrator, OrderUsage};

/// Message returned when the provider could not produce slots.
pub const NO_SLOTS_MESSAGE: &str = "No slots available for the requested dates";

/// Outcome of a slot query that passed the scheduling rules.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotOutcome {
    /// The caller's order number, never a temporary one.
    pub order_no: String,
    /// Provider-ordered slots on bookable dates.
    pub slots: Vec<TimeSlot>,
    /// Requested dates dropped before the call, with the rule each broke.
    pub skipped: Vec<DateRejection>,
    /// Set when the provider failed and the answer is a degraded empty list.
    pub degraded: bool,
    /// Whether the fallback order creation succeeded on a degraded answer.
    pub order_created: bool,
    /// Number the fallback order was actually created under when the
    /// caller's number was taken. That record stays on the provider.
    pub temporary_order_no: Option<String>,
}

impl SlotOutcome {
    #[must_use]
    pub fn message(&self) -> Option<String> {
        if self.slots.is_empty() {
            Some(NO_SLOTS_MESSAGE.to_owned())
        } else {
            None
        }
    }
}

/// Requested dates split by the scheduling rules. `bookable` is never empty
/// and keeps request order without duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGate {
    pub bookable: Vec<NaiveDate>,
    pub skipped: Vec<DateRejection>,
}

#[derive(Debug, Clone)]
pub struct SlotAvailabilityFetcher {
    orchestrator: OrderReservationOrchestrator,
    clock: ClockPolicy,
}

impl SlotAvailabilityFetcher {
    #[must_use]
    pub fn new(orchestrator: OrderReservationOrchestrator, clock: ClockPolicy) -> Self {
        Self {
            orchestrator,
            clock,
        }
    }

    /// Queries bookable windows for `candidate`.
    ///
    /// An empty `time_windows` means "use the region template". Provider
    /// failures never surface here: they degrade to an empty list after a
    /// best-effort order creation.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Validation`] for a blank order number or no dates.
    /// - [`BookingError::Rejected`] when no requested date is bookable; no
    ///   provider call is made.
    pub async fn fetch_slots(
        &self,
        mut candidate: OrderCandidate,
    ) -> Result<SlotOutcome, BookingError> {
        if candidate.order_no.trim().is_empty() {
            return Err(BookingError::validation("orderNo", "order number is required"));
        }
        let region = candidate.region;
        let DateGate { bookable, skipped } = self.gate(&candidate.desired_dates, region)?;

        let now = self.clock.now();
        candidate.desired_dates = bookable;
        if candidate.time_windows.is_empty() {
            candidate.time_windows = region.time_windows();
        }
        let order_no = candidate.order_no.clone();

        let slots = match self.query(&mut candidate).await {
            Ok(slots) => slots,
            Err(e) => {
                tracing::warn!(order_no = %order_no, error = %e, "slot query failed; degrading");
                let (order_created, temporary_order_no) =
                    match self.orchestrator.ensure_order(candidate).await {
                        Ok(submission) => {
                            if let Some(temp) = &submission.temporary_order_no {
                                tracing::warn!(
                                    order_no = %order_no,
                                    temporary_order_no = %temp,
                                    "fallback order kept under a temporary number"
                                );
                            }
                            (true, submission.temporary_order_no)
                        }
                        Err(e) => {
                            tracing::warn!(order_no = %order_no, error = %e, "fallback order creation failed");
                            (false, None)
                        }
                    };
                return Ok(SlotOutcome {
                    order_no,
                    slots: Vec::new(),
                    skipped,
                    degraded: true,
                    order_created,
                    temporary_order_no,
                });
            }
        };

        let tz = self.clock.tz();
        let slots: Vec<TimeSlot> = slots
            .into_iter()
            .filter(|slot| {
                let day = slot.from.with_timezone(&tz).date_naive();
                fieldbook_core::clock::is_bookable(day, now, region)
            })
            .collect();

        Ok(SlotOutcome {
            order_no,
            slots,
            skipped,
            degraded: false,
            order_created: false,
            temporary_order_no: None,
        })
    }

    /// Splits `dates` into bookable ones and rejections at the current
    /// reference time. Makes no outbound call.
    ///
    /// # Errors
    ///
    /// - [`BookingError::Validation`] when no date is given.
    /// - [`BookingError::Rejected`] when no date is bookable.
    pub fn gate(&self, dates: &[NaiveDate], region: Region) -> Result<DateGate, BookingError> {
        if dates.is_empty() {
            return Err(BookingError::validation("dates", "at least one date is required"));
        }

        let now = self.clock.now();
        let mut bookable = Vec::new();
        let mut skipped = Vec::new();
        for &date in dates {
            match fieldbook_core::clock::classify(date, now, region) {
                Ok(()) if !bookable.contains(&date) => bookable.push(date),
                Ok(()) => {}
                Err(rejection) => skipped.push(rejection),
            }
        }

        if bookable.is_empty() {
            let (rule, message) = consolidate(&skipped);
            tracing::info!(region = %region, rule, "no requested date is bookable");
            return Err(BookingError::Rejected { rule, message });
        }
        for rejection in &skipped {
            tracing::debug!(date = %rejection.date(), rule = rejection.rule(), "date skipped");
        }
        Ok(DateGate { bookable, skipped })
    }

    /// Runs the slot query through the orchestrator, retrying once with the
    /// first geocoding candidate when the provider reports an ambiguous
    /// address. Precomputed coordinates are never swapped out: the error is
    /// returned instead. `candidate` keeps the coordinates actually used.
    async fn query(&self, candidate: &mut OrderCandidate) -> Result<Vec<TimeSlot>, BookingError> {
        match self.submit(candidate.clone()).await {
            Err(e @ BookingError::Upstream(ProviderError::AmbiguousLocation { .. }))
                if candidate.location.has_precomputed_coordinates() =>
            {
                tracing::warn!(
                    order_no = %candidate.order_no,
                    coordinates = ?candidate.location.coordinates(),
                    "provider finds precomputed coordinates ambiguous; keeping them"
                );
                Err(e)
            }
            Err(BookingError::Upstream(ProviderError::AmbiguousLocation { candidates }))
                if !candidates.is_empty() =>
            {
                tracing::info!(
                    order_no = %candidate.order_no,
                    candidates = candidates.len(),
                    "provider reported an ambiguous address; retrying with the first candidate"
                );
                candidate.location.move_to(candidates[0].coordinates());
                self.submit(candidate.clone()).await
            }
            other => other,
        }
    }

    async fn submit(&self, candidate: OrderCandidate) -> Result<Vec<TimeSlot>, BookingError> {
        let provider = self.orchestrator.provider();
        let submission = self
            .orchestrator
            .submit_with_recovery(candidate, OrderUsage::Transient, |sent| async move {
                provider.booking_slots(&sent).await
            })
            .await?;
        Ok(submission.value)
    }
}

/// Single rule name and message for a set of rejections.
fn consolidate(rejections: &[DateRejection]) -> (&'static str, String) {
    match rejections {
        [] => ("dates", "no dates were requested".to_owned()),
        [only] => (only.rule(), only.to_string()),
        [first, rest @ ..] => {
            let rule = if rest.iter().all(|r| r.rule() == first.rule()) {
                first.rule()
            } else {
                "mixed"
            };
            let reasons = rejections
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            (rule, format!("None of the requested dates can be booked: {reasons}"))
        }
    }
}
