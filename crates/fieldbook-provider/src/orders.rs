//! Order and location endpoints.

use fieldbook_core::{Location, OrderCandidate};

use crate::client::SchedulingClient;
use crate::error::ProviderError;
use crate::retry::retry_with_backoff;
use crate::types::{
    CreateOrderData, DeleteOrderRequest, LocationsRequest, OrderRecord, OrdersData, WireLocation,
    WireOrder,
};

impl SchedulingClient {
    /// Creates or replaces the order on the provider (`create_order`, `SYNC`).
    ///
    /// Not retried at this layer; the orchestrator owns the attempt budget.
    /// Returns the provider's internal id when it sends one.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::DuplicateOrder`] when the order number is taken.
    /// - [`ProviderError::AmbiguousLocation`] when the address needs disambiguation.
    /// - [`ProviderError::Api`] / [`ProviderError::Http`] on any other failure.
    pub async fn create_or_update_order(
        &self,
        candidate: &OrderCandidate,
    ) -> Result<Option<String>, ProviderError> {
        let body = WireOrder::from(candidate);
        let data: CreateOrderData = self
            .post("create_order", Some(&candidate.order_no), &body)
            .await?;
        tracing::debug!(order_no = %candidate.order_no, "provider order synced");
        Ok(data.id)
    }

    /// Deletes an order by number.
    ///
    /// # Errors
    ///
    /// Returns the last [`ProviderError`] once transient retries are exhausted.
    pub async fn delete_order(&self, order_no: &str) -> Result<(), ProviderError> {
        retry_with_backoff("delete_order", self.max_retries, self.backoff_base_ms, || async {
            let body = DeleteOrderRequest { order_no };
            let _: serde_json::Value = self.post("delete_order", Some(order_no), &body).await?;
            Ok(())
        })
        .await
    }

    /// Looks an order up by number. `Ok(None)` when the provider has no such order.
    ///
    /// # Errors
    ///
    /// Returns the last [`ProviderError`] once transient retries are exhausted.
    pub async fn get_order(&self, order_no: &str) -> Result<Option<OrderRecord>, ProviderError> {
        let query = [("orderNo", order_no)];
        let data: OrdersData = retry_with_backoff(
            "get_orders",
            self.max_retries,
            self.backoff_base_ms,
            || self.get("get_orders", &query),
        )
        .await?;

        Ok(data
            .orders
            .into_iter()
            .find(|item| item.success)
            .and_then(|item| item.data))
    }

    /// Registers (or refreshes) a location record so orders can reference it
    /// by `locationNo`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on any failure; callers treat this as best-effort.
    pub async fn create_or_update_location(&self, location: &Location) -> Result<(), ProviderError> {
        let body = LocationsRequest {
            locations: vec![WireLocation::from(location)],
        };
        let _: serde_json::Value = self
            .post("create_or_update_locations", None, &body)
            .await?;
        Ok(())
    }
}
