//! Booking domain types shared by the provider client, the orchestrator and
//! the HTTP surface.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::region::Region;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A postal address as captured by the booking form.
///
/// When `coordinates` is present it was computed upstream and is trusted
/// verbatim; nothing downstream replaces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    /// State or province code, e.g. `CA`.
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl Address {
    /// Best-effort split of a single-line address such as
    /// `"14th St, Vallejo, CA 94590, USA"`.
    ///
    /// Segments are comma separated; the segment holding the state code and
    /// postal code is recognised by its trailing digits. Anything that does
    /// not fit lands in `street` so no text is lost.
    #[must_use]
    pub fn parse_free_form(text: &str) -> Self {
        let mut parts: Vec<&str> = text
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        let mut address = Self::default();

        if parts.len() >= 4
            && parts
                .last()
                .is_some_and(|p| p.chars().all(|c| c.is_ascii_alphabetic() || c == ' '))
        {
            address.country = parts.pop().map(str::to_owned);
        }

        if let Some(last) = parts.last().copied() {
            let mut tokens = last.split_whitespace();
            if let (Some(state), Some(zip), None) = (tokens.next(), tokens.next(), tokens.next()) {
                if zip.chars().all(|c| c.is_ascii_digit() || c == '-')
                    && state.chars().all(|c| c.is_ascii_alphabetic())
                {
                    address.region = state.to_owned();
                    address.postal_code = zip.to_owned();
                    parts.pop();
                }
            }
        }

        if parts.len() >= 2 {
            address.city = parts.pop().unwrap_or_default().to_owned();
        }
        address.street = parts.join(", ");
        address
    }

    /// Single-line form sent to the geocoder and used as the location's
    /// display address.
    #[must_use]
    pub fn formatted(&self) -> String {
        let state_zip = [self.region.trim(), self.postal_code.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        [
            self.street.trim(),
            self.city.trim(),
            state_zip.as_str(),
            self.country.as_deref().map_or("", str::trim),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.street.trim().is_empty()
            && self.city.trim().is_empty()
            && self.postal_code.trim().is_empty()
    }
}

/// A provider-side location record. Immutable once built for an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub location_id: String,
    pub display_name: String,
    pub address: Address,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// True when the address arrived with its own coordinates. Those are
    /// kept as-is; no fallback may replace them.
    #[must_use]
    pub fn has_precomputed_coordinates(&self) -> bool {
        self.address.coordinates.is_some()
    }

    pub fn move_to(&mut self, coordinates: Coordinates) {
        self.latitude = coordinates.latitude;
        self.longitude = coordinates.longitude;
    }
}

/// Customer contact details forwarded to the provider order for the crew.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A daily service window, e.g. 07:30-11:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(with = "hhmm")]
    pub from: NaiveTime,
    #[serde(with = "hhmm")]
    pub to: NaiveTime,
}

impl TimeWindow {
    /// Builds a window from hour/minute pairs.
    ///
    /// # Panics
    ///
    /// Panics on out-of-range values; only used with literal tables.
    #[must_use]
    pub fn hm(from: (u32, u32), to: (u32, u32)) -> Self {
        Self {
            from: NaiveTime::from_hms_opt(from.0, from.1, 0).expect("valid window start"),
            to: NaiveTime::from_hms_opt(to.0, to.1, 0).expect("valid window end"),
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from.format("%H:%M"), self.to.format("%H:%M"))
    }
}

/// An order as it will be sent to the scheduling provider.
///
/// `order_no` may be swapped for a temporary identifier during conflict
/// recovery; every other field stays fixed for the lifetime of the attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCandidate {
    pub order_no: String,
    pub location: Location,
    pub duration_minutes: u32,
    pub desired_dates: Vec<NaiveDate>,
    pub time_windows: Vec<TimeWindow>,
    #[serde(default)]
    pub driver_pool: Option<Vec<String>>,
    pub region: Region,
    #[serde(default)]
    pub contact: Option<Contact>,
}

/// A bookable window offered by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
    pub reservation_id: String,
    #[serde(default)]
    pub cost: f64,
}

pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
