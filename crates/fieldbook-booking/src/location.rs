//! Address to coordinates, with a fallback chain that always yields a location.
//!
//! Order of preference: coordinates supplied with the address, the first
//! geocoder match, the region's default point.

use std::sync::Arc;

use fieldbook_core::{ids, Address, ClockPolicy, Coordinates, Location, Region};
use fieldbook_provider::{GeocodeClient, GeocodeMatch, ProviderError, SchedulingClient};
use serde::Serialize;

/// Where a location's coordinates came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum CoordinateSource {
    Precomputed,
    Geocoded { formatted_address: String },
    RegionDefault,
}

#[derive(Debug, Clone)]
pub struct LocationResolver {
    geocoder: Option<Arc<GeocodeClient>>,
    provider: Arc<SchedulingClient>,
    clock: ClockPolicy,
}

impl LocationResolver {
    /// `geocoder` is `None` when no geocoder key is configured; every
    /// address without coordinates then falls back to the region default.
    #[must_use]
    pub fn new(
        geocoder: Option<Arc<GeocodeClient>>,
        provider: Arc<SchedulingClient>,
        clock: ClockPolicy,
    ) -> Self {
        Self {
            geocoder,
            provider,
            clock,
        }
    }

    /// Builds a fresh [`Location`] for one booking attempt and registers it
    /// with the provider. Never fails: geocoding and registration problems
    /// are logged and the fallback chain continues.
    pub async fn resolve(&self, address: &Address, display_name: &str, region: Region) -> Location {
        let (coordinates, source) = self.coordinates_for(address, region).await;
        tracing::debug!(?source, region = %region, "location coordinates resolved");

        let location = Location {
            location_id: ids::location_id(self.clock.now_utc()),
            display_name: display_name.to_owned(),
            address: address.clone(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        };

        if let Err(e) = self.provider.create_or_update_location(&location).await {
            tracing::warn!(
                location_id = %location.location_id,
                error = %e,
                "location registration failed; continuing"
            );
        }
        location
    }

    /// Resolves coordinates without registering anything.
    pub async fn coordinates_for(
        &self,
        address: &Address,
        region: Region,
    ) -> (Coordinates, CoordinateSource) {
        if let Some(coordinates) = address.coordinates {
            return (coordinates, CoordinateSource::Precomputed);
        }

        match self.geocode_first(&address.formatted()).await {
            Ok(Some(found)) => (
                found.coordinates,
                CoordinateSource::Geocoded {
                    formatted_address: found.formatted_address,
                },
            ),
            Ok(None) => (region.default_coordinates(), CoordinateSource::RegionDefault),
            Err(e) => {
                tracing::warn!(error = %e, region = %region, "geocoding failed; using region default");
                (region.default_coordinates(), CoordinateSource::RegionDefault)
            }
        }
    }

    /// First geocoder match for a single-line address. Several matches are
    /// never an error: index 0 wins.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the geocoder call fails.
    pub async fn geocode_first(&self, address: &str) -> Result<Option<GeocodeMatch>, ProviderError> {
        let Some(geocoder) = &self.geocoder else {
            tracing::debug!("geocoder not configured");
            return Ok(None);
        };
        if address.trim().is_empty() {
            return Ok(None);
        }

        let matches = geocoder.geocode(address).await?;
        if matches.len() > 1 {
            tracing::info!(
                address,
                matches = matches.len(),
                "address is ambiguous; using the first match"
            );
        }
        Ok(matches.into_iter().next())
    }
}
