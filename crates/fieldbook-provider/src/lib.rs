//! Typed clients for the scheduling provider and the geocoder.

mod booking;
pub mod client;
pub mod error;
pub mod geocode;
mod orders;
mod retry;
pub mod types;

pub use client::SchedulingClient;
pub use error::{ProviderError, ERR_DUPLICATE_ORDER, ERR_MULTIPLE_GEOCODING_RESULTS};
pub use geocode::GeocodeClient;
pub use types::{GeocodeMatch, GeocodingCandidate, OrderRecord};
