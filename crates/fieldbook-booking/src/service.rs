//! Facade wiring the booking components together for the HTTP server and
//! the CLI.

use std::sync::Arc;

use fieldbook_core::{AppConfig, ClockPolicy};
use fieldbook_provider::{GeocodeClient, GeocodeMatch, ProviderError, SchedulingClient};

use crate::candidate::{CandidateBuilder, PendingOrder};
use crate::confirm::{ConfirmOptions, ConfirmationResult, ReservationConfirmer};
use crate::error::BookingError;
use crate::location::LocationResolver;
use crate::orchestrator::OrderReservationOrchestrator;
use crate::request::{parse_dates, resolve_region, ReservationRequest, SlotRequest};
use crate::slots::{SlotAvailabilityFetcher, SlotOutcome};

const PROVIDER_BACKOFF_BASE_MS: u64 = 250;

/// Shared, immutable booking service. Clone the `Arc`, not the service.
#[derive(Debug)]
pub struct BookingService {
    clock: ClockPolicy,
    builder: CandidateBuilder,
    orchestrator: OrderReservationOrchestrator,
    fetcher: SlotAvailabilityFetcher,
    confirmer: ReservationConfirmer,
}

impl BookingService {
    #[must_use]
    pub fn new(
        provider: SchedulingClient,
        geocoder: Option<GeocodeClient>,
        clock: ClockPolicy,
        default_duration_minutes: u32,
    ) -> Self {
        let provider = Arc::new(provider);
        let orchestrator = OrderReservationOrchestrator::new(Arc::clone(&provider), clock.clone());
        let resolver = LocationResolver::new(geocoder.map(Arc::new), provider, clock.clone());
        let builder = CandidateBuilder::new(resolver, default_duration_minutes);
        Self {
            fetcher: SlotAvailabilityFetcher::new(orchestrator.clone(), clock.clone()),
            confirmer: ReservationConfirmer::new(orchestrator.clone(), builder.clone()),
            builder,
            orchestrator,
            clock,
        }
    }

    /// Builds the provider clients from configuration and a system clock.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if a client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let provider = SchedulingClient::new(
            &config.provider_api_key,
            &config.provider_base_url,
            config.provider_timeout_secs,
        )?
        .with_retry_policy(config.provider_max_retries, PROVIDER_BACKOFF_BASE_MS);

        let geocoder = match &config.geocoder_api_key {
            Some(key) => Some(GeocodeClient::new(
                key,
                &config.geocoder_base_url,
                config.provider_timeout_secs,
            )?),
            None => {
                tracing::warn!("FIELDBOOK_GEOCODER_API_KEY not set; region default coordinates will be used");
                None
            }
        };

        Ok(Self::new(
            provider,
            geocoder,
            ClockPolicy::system(config.reference_tz),
            config.default_duration_minutes,
        ))
    }

    #[must_use]
    pub fn clock(&self) -> &ClockPolicy {
        &self.clock
    }

    #[must_use]
    pub fn provider(&self) -> &SchedulingClient {
        self.orchestrator.provider()
    }

    /// Validates the request, resolves the location and queries slots.
    ///
    /// # Errors
    ///
    /// [`BookingError::Validation`] or [`BookingError::Rejected`]; provider
    /// failures degrade inside the fetcher.
    pub async fn fetch_slots(&self, request: SlotRequest) -> Result<SlotOutcome, BookingError> {
        let dates = parse_dates(&request.slots.dates)?;
        let address = request.order.validate()?;
        let region = resolve_region(request.region.as_deref(), &address)?;

        // Rules first so a rejected request makes no call at all.
        self.fetcher.gate(&dates, region)?;

        let candidate = self
            .builder
            .build(&request.order, dates, request.slots.time_windows, region)
            .await?;
        self.fetcher.fetch_slots(candidate).await
    }

    /// Reserves a slot.
    ///
    /// `allowForceContinue` defaults to `true` when the caller omits it. The
    /// fallback order data is validated up front but only geocoded and sent
    /// to the provider if the reservation fails.
    ///
    /// # Errors
    ///
    /// [`BookingError::Validation`] for a missing reservation id or bad
    /// fallback order data.
    pub async fn make_reservation(
        &self,
        request: ReservationRequest,
    ) -> Result<ConfirmationResult, BookingError> {
        let reservation_id = request.reservation_id.trim();
        if reservation_id.is_empty() {
            return Err(BookingError::validation(
                "reservationId",
                "reservation id is required",
            ));
        }

        let fallback_order = match (request.order_data, request.create_order_if_booking_fails) {
            (Some(order), true) => {
                let address = order.validate()?;
                let region = resolve_region(request.region.as_deref(), &address)?;
                let mut dates = parse_dates(&request.dates)?;
                if dates.is_empty() {
                    dates.extend(fieldbook_core::clock::earliest_bookable_date(self.clock.now(), region));
                }
                Some(PendingOrder {
                    order,
                    dates,
                    region,
                })
            }
            _ => None,
        };

        let options = ConfirmOptions {
            allow_force_continue: request.allow_force_continue.unwrap_or(true),
            fallback_order,
        };
        Ok(self.confirmer.confirm(reservation_id, options).await)
    }

    /// First geocoder match for `address`, `None` when nothing matched or no
    /// geocoder is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the geocoder call itself fails.
    pub async fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>, ProviderError> {
        self.builder.resolver().geocode_first(address).await
    }
}
