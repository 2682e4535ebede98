//! Service territories and the fixed business data attached to each one.
//!
//! Time windows, weekday whitelists, blackout dates, fallback coordinates
//! and driver pools are static tables; none of them are configurable at
//! runtime.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, TimeWindow};

/// Used when the region itself has no better guess (e.g. [`Region::Other`]).
pub const GLOBAL_DEFAULT_COORDINATES: Coordinates = Coordinates::new(36.7783, -119.4179);

/// Bay Area holiday closures as (year, month, day).
const BAY_AREA_BLACKOUTS: &[(i32, u32, u32)] = &[(2025, 11, 28), (2025, 12, 26)];

const PHOENIX_METRO_DAYS: &[Weekday] = &[Weekday::Tue, Weekday::Thu];
const PHOENIX_WEST_DAYS: &[Weekday] = &[Weekday::Mon, Weekday::Wed, Weekday::Fri];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Arizona metro, central and east valley.
    PhoenixMetro,
    /// Arizona metro, west valley crews.
    PhoenixWest,
    BayArea,
    SouthernCalifornia,
    Other,
}

static PHOENIX_WEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(goodyear|buckeye|avondale|surprise|litchfield park|tolleson|el mirage)\b",
    )
    .expect("valid regex")
});
static PHOENIX_METRO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(phoenix|scottsdale|tempe|mesa|chandler|gilbert|queen creek|arizona)\b|,\s*az\b",
    )
    .expect("valid regex")
});
static BAY_AREA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(vallejo|benicia|napa|fairfield|oakland|berkeley|richmond|san francisco|san jose|fremont|hayward|concord|walnut creek)\b",
    )
    .expect("valid regex")
});
static SOUTHERN_CALIFORNIA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(los angeles|san diego|irvine|anaheim|long beach|riverside|pasadena|santa ana|ontario)\b",
    )
    .expect("valid regex")
});

impl Region {
    pub const ALL: [Region; 5] = [
        Region::PhoenixMetro,
        Region::PhoenixWest,
        Region::BayArea,
        Region::SouthernCalifornia,
        Region::Other,
    ];

    /// Best-effort guess from free address text, used only when the caller
    /// did not name a region. West-valley cities are checked before the
    /// wider Arizona pattern so they are not swallowed by it.
    #[must_use]
    pub fn infer_from_address(text: &str) -> Self {
        if PHOENIX_WEST_RE.is_match(text) {
            Region::PhoenixWest
        } else if PHOENIX_METRO_RE.is_match(text) {
            Region::PhoenixMetro
        } else if BAY_AREA_RE.is_match(text) {
            Region::BayArea
        } else if SOUTHERN_CALIFORNIA_RE.is_match(text) {
            Region::SouthernCalifornia
        } else {
            Region::Other
        }
    }

    #[must_use]
    pub fn is_arizona(self) -> bool {
        matches!(self, Region::PhoenixMetro | Region::PhoenixWest)
    }

    /// Service windows offered to customers in this region.
    #[must_use]
    pub fn time_windows(self) -> Vec<TimeWindow> {
        if self.is_arizona() {
            vec![TimeWindow::hm((7, 0), (11, 0)), TimeWindow::hm((10, 0), (14, 0))]
        } else {
            vec![
                TimeWindow::hm((7, 30), (11, 0)),
                TimeWindow::hm((10, 0), (14, 0)),
                TimeWindow::hm((13, 0), (17, 0)),
            ]
        }
    }

    /// Weekdays crews run in this region, or `None` when every weekday is open.
    #[must_use]
    pub fn allowed_weekdays(self) -> Option<&'static [Weekday]> {
        match self {
            Region::PhoenixMetro => Some(PHOENIX_METRO_DAYS),
            Region::PhoenixWest => Some(PHOENIX_WEST_DAYS),
            Region::BayArea | Region::SouthernCalifornia | Region::Other => None,
        }
    }

    #[must_use]
    pub fn is_blackout(self, date: NaiveDate) -> bool {
        let table: &[(i32, u32, u32)] = match self {
            Region::BayArea => BAY_AREA_BLACKOUTS,
            _ => &[],
        };
        table
            .iter()
            .any(|&(y, m, d)| date.year() == y && date.month() == m && date.day() == d)
    }

    #[must_use]
    pub fn default_coordinates(self) -> Coordinates {
        match self {
            Region::PhoenixMetro => Coordinates::new(33.4484, -112.0740),
            Region::PhoenixWest => Coordinates::new(33.4353, -112.3577),
            Region::BayArea => Coordinates::new(38.1041, -122.2566),
            Region::SouthernCalifornia => Coordinates::new(34.0522, -118.2437),
            Region::Other => GLOBAL_DEFAULT_COORDINATES,
        }
    }

    /// Provider skill tag that routes the order to the region's crews.
    #[must_use]
    pub fn driver_pool(self) -> Option<&'static str> {
        match self {
            Region::PhoenixMetro => Some("PHX"),
            Region::PhoenixWest => Some("PHX-WEST"),
            Region::BayArea => Some("BAY"),
            Region::SouthernCalifornia => Some("SOCAL"),
            Region::Other => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Region::PhoenixMetro => "phoenix_metro",
            Region::PhoenixWest => "phoenix_west",
            Region::BayArea => "bay_area",
            Region::SouthernCalifornia => "southern_california",
            Region::Other => "other",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == normalized)
            .ok_or_else(|| format!("unknown region '{s}'"))
    }
}
