//! Scheduling-provider and geocoder wire types.
//!
//! The scheduling provider wraps every response in a `{"success": bool, ...}`
//! envelope; failures add `code` and `message`. [`Envelope`] captures the
//! shared part and flattens the endpoint-specific payload.

use chrono::NaiveDate;
use fieldbook_core::{Coordinates, Location, OrderCandidate, TimeSlot, TimeWindow};
use serde::{Deserialize, Serialize};

/// Top-level envelope for scheduling-provider responses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

/// Error-side fields of the envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorFields {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub geocoding_results: Vec<GeocodingCandidate>,
}

/// One of several places an ambiguous address resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodingCandidate {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
}

impl GeocodingCandidate {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderOperation {
    /// Create or replace.
    Sync,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireLocation {
    pub location_no: String,
    pub location_name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Location> for WireLocation {
    fn from(location: &Location) -> Self {
        Self {
            location_no: location.location_id.clone(),
            location_name: location.display_name.clone(),
            address: location.address.formatted(),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTimeWindow {
    pub tw_from: String,
    pub tw_to: String,
}

impl From<&TimeWindow> for WireTimeWindow {
    fn from(window: &TimeWindow) -> Self {
        Self {
            tw_from: window.from.format("%H:%M").to_string(),
            tw_to: window.to.format("%H:%M").to_string(),
        }
    }
}

/// Body of `create_order`, also embedded in `booking_slots`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrder {
    pub operation: OrderOperation,
    pub order_no: String,
    #[serde(rename = "type")]
    pub order_type: &'static str,
    pub duration: u32,
    pub location: WireLocation,
    pub time_windows: Vec<WireTimeWindow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<&OrderCandidate> for WireOrder {
    fn from(candidate: &OrderCandidate) -> Self {
        let contact = candidate.contact.clone().unwrap_or_default();
        Self {
            operation: OrderOperation::Sync,
            order_no: candidate.order_no.clone(),
            order_type: "T",
            duration: candidate.duration_minutes,
            location: WireLocation::from(&candidate.location),
            time_windows: candidate.time_windows.iter().map(WireTimeWindow::from).collect(),
            skills: candidate.driver_pool.clone().unwrap_or_default(),
            notes: contact.name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderData {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOrderRequest<'a> {
    pub order_no: &'a str,
}

/// Order as returned by `get_orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_no: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub location: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct OrdersData {
    #[serde(default)]
    pub orders: Vec<OrderLookupItem>,
}

#[derive(Debug, Deserialize)]
pub struct OrderLookupItem {
    pub success: bool,
    #[serde(default)]
    pub data: Option<OrderRecord>,
}

#[derive(Debug, Serialize)]
pub struct LocationsRequest {
    pub locations: Vec<WireLocation>,
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
    pub dates: Vec<NaiveDate>,
    pub time_windows: Vec<WireTimeWindow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingSlotsRequest {
    pub order: WireOrder,
    pub slots: SlotQuery,
}

#[derive(Debug, Deserialize)]
pub struct BookingSlotsData {
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest<'a> {
    pub reservation_id: &'a str,
}

// ---------------------------------------------------------------------------
// Geocoder
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeGeometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A single geocoder match, in the geocoder's own ranking order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeMatch {
    pub formatted_address: String,
    pub coordinates: Coordinates,
}

impl From<GeocodeResult> for GeocodeMatch {
    fn from(result: GeocodeResult) -> Self {
        Self {
            formatted_address: result.formatted_address,
            coordinates: Coordinates::new(result.geometry.location.lat, result.geometry.location.lng),
        }
    }
}
