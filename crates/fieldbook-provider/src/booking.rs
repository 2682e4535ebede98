//! Slot-query and reservation endpoints.

use fieldbook_core::{OrderCandidate, TimeSlot};

use crate::client::SchedulingClient;
use crate::error::ProviderError;
use crate::types::{
    BookingSlotsData, BookingSlotsRequest, ReserveRequest, SlotQuery, WireOrder, WireTimeWindow,
};

impl SchedulingClient {
    /// Asks the provider for bookable windows for `candidate` on its desired
    /// dates, restricted to its time-window template. Slots are returned in
    /// provider order.
    ///
    /// The provider upserts the order as a side effect, so a taken order
    /// number surfaces here as [`ProviderError::DuplicateOrder`]. For the same
    /// reason the call is not retried here; the orchestrator owns the budget.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::DuplicateOrder`] / [`ProviderError::AmbiguousLocation`]
    ///   for the recoverable provider codes.
    /// - [`ProviderError::Api`] / [`ProviderError::Http`] on any other failure.
    pub async fn booking_slots(
        &self,
        candidate: &OrderCandidate,
    ) -> Result<Vec<TimeSlot>, ProviderError> {
        let body = BookingSlotsRequest {
            order: WireOrder::from(candidate),
            slots: SlotQuery {
                dates: candidate.desired_dates.clone(),
                time_windows: candidate
                    .time_windows
                    .iter()
                    .map(WireTimeWindow::from)
                    .collect(),
            },
        };
        let order_no = candidate.order_no.as_str();
        let data: BookingSlotsData = self.post("booking_slots", Some(order_no), &body).await?;

        tracing::debug!(order_no, slots = data.slots.len(), "provider returned slots");
        Ok(data.slots)
    }

    /// Reserves a previously offered slot and returns the provider's payload
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Api`] carrying the raw body and status when the
    /// provider refuses, or [`ProviderError::Http`] on network failure.
    pub async fn reserve(&self, reservation_id: &str) -> Result<serde_json::Value, ProviderError> {
        let request = self.post_request("booking_reserve", &ReserveRequest { reservation_id });
        self.execute_raw("booking_reserve", None, request).await
    }
}
