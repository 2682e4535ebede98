//! Inbound booking requests as the internal pipeline sends them.
//!
//! Dates and regions arrive as loose strings and are validated here so
//! malformed input is reported per field before anything goes upstream.

use chrono::NaiveDate;
use fieldbook_core::{Address, Contact, Coordinates, Region, TimeWindow};
use serde::Deserialize;

use crate::error::BookingError;

/// Either a single-line address or its structured form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AddressInput {
    Text(String),
    Structured(Address),
}

impl AddressInput {
    /// Structured address, with `coordinates` attached when the caller sent
    /// them separately.
    #[must_use]
    pub fn to_address(&self, coordinates: Option<Coordinates>) -> Address {
        let mut address = match self {
            AddressInput::Text(text) => Address::parse_free_form(text),
            AddressInput::Structured(address) => address.clone(),
        };
        if address.coordinates.is_none() {
            address.coordinates = coordinates;
        }
        address
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default, alias = "orderId")]
    pub order_no: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub address: Option<AddressInput>,
    /// Coordinates computed upstream; trusted verbatim when present.
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default, alias = "durationMinutes")]
    pub duration: Option<u32>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Explicit driver skills; the region's pool is used when absent.
    #[serde(default, alias = "skills")]
    pub driver_pool: Option<Vec<String>>,
}

impl OrderRequest {
    /// # Errors
    ///
    /// Returns [`BookingError::Validation`] when the order number or the
    /// address is missing.
    pub fn validate(&self) -> Result<Address, BookingError> {
        if self.order_no.trim().is_empty() {
            return Err(BookingError::validation("orderNo", "order number is required"));
        }
        let address = self
            .address
            .as_ref()
            .map(|a| a.to_address(self.coordinates))
            .ok_or_else(|| BookingError::validation("address", "address is required"))?;
        if address.is_blank() && address.coordinates.is_none() {
            return Err(BookingError::validation("address", "address is empty"));
        }
        Ok(address)
    }

    #[must_use]
    pub fn contact(&self) -> Option<Contact> {
        let contact = Contact {
            name: self.customer_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        };
        (contact != Contact::default()).then_some(contact)
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.customer_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or_else(|| self.order_no.trim().to_owned(), str::to_owned)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotWindowRequest {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub time_windows: Vec<TimeWindow>,
}

/// Body of a slot query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub order: OrderRequest,
    #[serde(default)]
    pub slots: SlotWindowRequest,
    #[serde(default)]
    pub region: Option<String>,
    /// Accepted for compatibility; planning hints are not used.
    #[serde(default)]
    pub planning: Option<serde_json::Value>,
    #[serde(default, rename = "isCRMBooking")]
    pub is_crm_booking: bool,
}

/// Body of a reservation confirmation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[serde(default)]
    pub reservation_id: String,
    #[serde(default)]
    pub create_order_if_booking_fails: bool,
    #[serde(default)]
    pub order_data: Option<OrderRequest>,
    #[serde(default)]
    pub allow_force_continue: Option<bool>,
    /// Dates to put on the fallback order; empty means "earliest bookable".
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub region: Option<String>,
}

/// Parses `YYYY-MM-DD` dates, reporting the first malformed one.
///
/// # Errors
///
/// Returns [`BookingError::Validation`] on the `dates` field.
pub fn parse_dates(raw: &[String]) -> Result<Vec<NaiveDate>, BookingError> {
    raw.iter()
        .map(|s| {
            let trimmed = s.trim();
            // Accept full timestamps by taking the date part.
            let day = trimmed.get(..10).unwrap_or(trimmed);
            NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| {
                BookingError::validation("dates", format!("'{s}' is not a YYYY-MM-DD date"))
            })
        })
        .collect()
}

/// Explicit region when given, otherwise inferred from the address text.
///
/// # Errors
///
/// Returns [`BookingError::Validation`] on the `region` field for an
/// unknown region name.
pub fn resolve_region(explicit: Option<&str>, address: &Address) -> Result<Region, BookingError> {
    match explicit.map(str::trim).filter(|r| !r.is_empty()) {
        Some(name) => name
            .parse::<Region>()
            .map_err(|reason| BookingError::validation("region", reason)),
        None => Ok(Region::infer_from_address(&address.formatted())),
    }
}
