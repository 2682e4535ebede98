//! Turns a validated order request into an [`OrderCandidate`].

use chrono::NaiveDate;
use fieldbook_core::{OrderCandidate, Region, TimeWindow};

use crate::error::BookingError;
use crate::location::LocationResolver;
use crate::request::OrderRequest;

/// Order data held back until it is actually needed, e.g. the order to
/// create only if a reservation fails.
#[derive(Debug, Clone)]
pub struct PendingOrder {
    pub order: OrderRequest,
    pub dates: Vec<NaiveDate>,
    pub region: Region,
}

#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    resolver: LocationResolver,
    default_duration_minutes: u32,
}

impl CandidateBuilder {
    #[must_use]
    pub fn new(resolver: LocationResolver, default_duration_minutes: u32) -> Self {
        Self {
            resolver,
            default_duration_minutes,
        }
    }

    #[must_use]
    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    /// Resolves and registers the location, then fills duration and driver
    /// pool defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Validation`] when the order data is incomplete.
    pub async fn build(
        &self,
        order: &OrderRequest,
        dates: Vec<NaiveDate>,
        time_windows: Vec<TimeWindow>,
        region: Region,
    ) -> Result<OrderCandidate, BookingError> {
        let address = order.validate()?;
        let location = self
            .resolver
            .resolve(&address, &order.display_name(), region)
            .await;

        Ok(OrderCandidate {
            order_no: order.order_no.trim().to_owned(),
            location,
            duration_minutes: order.duration.unwrap_or(self.default_duration_minutes),
            desired_dates: dates,
            time_windows,
            driver_pool: order
                .driver_pool
                .clone()
                .or_else(|| region.driver_pool().map(|pool| vec![pool.to_owned()])),
            region,
            contact: order.contact(),
        })
    }

    /// # Errors
    ///
    /// Same as [`Self::build`].
    pub async fn build_pending(&self, pending: PendingOrder) -> Result<OrderCandidate, BookingError> {
        self.build(&pending.order, pending.dates, Vec::new(), pending.region)
            .await
    }
}
