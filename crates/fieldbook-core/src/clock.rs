//! Reference-time clock and the date gating rules built on it.
//!
//! Cutoff and lead-time rules are evaluated in one fixed reference timezone
//! regardless of where a request comes from. All rule functions are pure
//! over an explicit `now`; only [`ClockPolicy::now`] touches a [`Clock`].

use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, NaiveDate, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::region::Region;

/// Reference hour (24h) from which next-day bookings are closed.
pub const CUTOFF_HOUR: u32 = 17;

/// How far ahead [`earliest_bookable_date`] searches before giving up.
const EARLIEST_SEARCH_DAYS: u64 = 60;

/// The current instant expressed in the reference timezone.
pub type ReferenceTime = DateTime<Tz>;

/// Source of "now". Swapped for [`FixedClock`] in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Lead-time rule derived from the reference time. Recomputed per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutoffPolicy {
    pub minimum_lead_days: u64,
    pub is_cutoff_active: bool,
}

impl CutoffPolicy {
    #[must_use]
    pub fn at(now: ReferenceTime) -> Self {
        let is_cutoff_active = is_cutoff_active(now);
        Self {
            minimum_lead_days: if is_cutoff_active { 2 } else { 1 },
            is_cutoff_active,
        }
    }
}

/// The first rule a candidate date violates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRejection {
    Weekend {
        date: NaiveDate,
    },
    TooSoon {
        date: NaiveDate,
        earliest: NaiveDate,
        cutoff_active: bool,
    },
    Blackout {
        date: NaiveDate,
        region: Region,
    },
    WeekdayRestricted {
        date: NaiveDate,
        region: Region,
        allowed: &'static [Weekday],
    },
}

impl DateRejection {
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            DateRejection::Weekend { date }
            | DateRejection::TooSoon { date, .. }
            | DateRejection::Blackout { date, .. }
            | DateRejection::WeekdayRestricted { date, .. } => *date,
        }
    }

    /// Short rule name, used for logging and for grouping messages.
    #[must_use]
    pub fn rule(&self) -> &'static str {
        match self {
            DateRejection::Weekend { .. } => "weekend",
            DateRejection::TooSoon { .. } => "cutoff",
            DateRejection::Blackout { .. } => "blackout",
            DateRejection::WeekdayRestricted { .. } => "weekday",
        }
    }
}

impl std::fmt::Display for DateRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateRejection::Weekend { date } => write!(
                f,
                "{date} falls on a weekend; surveys cannot be booked on weekends"
            ),
            DateRejection::TooSoon {
                date,
                earliest,
                cutoff_active: true,
            } => write!(
                f,
                "{date} is past the 5pm booking cutoff; the earliest available date is {earliest}"
            ),
            DateRejection::TooSoon { date, earliest, .. } => write!(
                f,
                "{date} is too soon to book; the earliest available date is {earliest}"
            ),
            DateRejection::Blackout { date, region } => {
                write!(f, "{date} is a blackout date for {region}")
            }
            DateRejection::WeekdayRestricted {
                date,
                region,
                allowed,
            } => {
                let days = allowed
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{date} is not a service day in {region}; crews run on {days}")
            }
        }
    }
}

/// True once the reference clock reaches [`CUTOFF_HOUR`].
#[must_use]
pub fn is_cutoff_active(now: ReferenceTime) -> bool {
    now.hour() >= CUTOFF_HOUR
}

#[must_use]
pub fn minimum_lead_days(now: ReferenceTime) -> u64 {
    CutoffPolicy::at(now).minimum_lead_days
}

#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Base check: weekend, lead time and blackout calendar.
///
/// # Errors
///
/// Returns the first [`DateRejection`] the date violates.
pub fn check_base(date: NaiveDate, now: ReferenceTime, region: Region) -> Result<(), DateRejection> {
    if is_weekend(date) {
        return Err(DateRejection::Weekend { date });
    }

    let policy = CutoffPolicy::at(now);
    let first_allowed = now.date_naive() + Days::new(policy.minimum_lead_days);
    if date < first_allowed {
        return Err(DateRejection::TooSoon {
            date,
            earliest: earliest_bookable_date(now, region).unwrap_or(first_allowed),
            cutoff_active: policy.is_cutoff_active,
        });
    }

    if region.is_blackout(date) {
        return Err(DateRejection::Blackout { date, region });
    }

    Ok(())
}

/// Region layer: day-of-week whitelist for territories that run partial weeks.
///
/// # Errors
///
/// Returns [`DateRejection::WeekdayRestricted`] when the weekday is not served.
pub fn check_region_weekday(date: NaiveDate, region: Region) -> Result<(), DateRejection> {
    match region.allowed_weekdays() {
        Some(allowed) if !allowed.contains(&date.weekday()) => {
            Err(DateRejection::WeekdayRestricted {
                date,
                region,
                allowed,
            })
        }
        _ => Ok(()),
    }
}

/// Full classification: the base check followed by the region layer.
///
/// # Errors
///
/// Returns the first [`DateRejection`] the date violates.
pub fn classify(date: NaiveDate, now: ReferenceTime, region: Region) -> Result<(), DateRejection> {
    check_base(date, now, region)?;
    check_region_weekday(date, region)
}

#[must_use]
pub fn is_bookable(date: NaiveDate, now: ReferenceTime, region: Region) -> bool {
    classify(date, now, region).is_ok()
}

/// First date on or after the lead-time boundary that passes every rule.
#[must_use]
pub fn earliest_bookable_date(now: ReferenceTime, region: Region) -> Option<NaiveDate> {
    let start = now.date_naive() + Days::new(minimum_lead_days(now));
    (0..EARLIEST_SEARCH_DAYS)
        .map(|offset| start + Days::new(offset))
        .find(|&date| {
            !is_weekend(date)
                && !region.is_blackout(date)
                && check_region_weekday(date, region).is_ok()
        })
}

/// Clock plus reference timezone, shared by every component that needs "now".
#[derive(Clone)]
pub struct ClockPolicy {
    clock: Arc<dyn Clock>,
    tz: Tz,
}

impl std::fmt::Debug for ClockPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockPolicy").field("tz", &self.tz).finish_non_exhaustive()
    }
}

impl ClockPolicy {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, tz: Tz) -> Self {
        Self { clock, tz }
    }

    #[must_use]
    pub fn system(tz: Tz) -> Self {
        Self::new(Arc::new(SystemClock), tz)
    }

    #[must_use]
    pub fn fixed(now: DateTime<Utc>, tz: Tz) -> Self {
        Self::new(Arc::new(FixedClock(now)), tz)
    }

    #[must_use]
    pub fn tz(&self) -> Tz {
        self.tz
    }

    #[must_use]
    pub fn now(&self) -> ReferenceTime {
        self.clock.now().with_timezone(&self.tz)
    }

    /// Raw UTC instant, used for identifier timestamps.
    #[must_use]
    pub fn now_utc(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    #[must_use]
    pub fn cutoff(&self) -> CutoffPolicy {
        CutoffPolicy::at(self.now())
    }

    /// # Errors
    ///
    /// Returns the first [`DateRejection`] the date violates at the current time.
    pub fn classify(&self, date: NaiveDate, region: Region) -> Result<(), DateRejection> {
        classify(date, self.now(), region)
    }

    #[must_use]
    pub fn is_bookable(&self, date: NaiveDate, region: Region) -> bool {
        is_bookable(date, self.now(), region)
    }
}
