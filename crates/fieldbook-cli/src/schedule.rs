//! Offline scheduling-rule commands. No provider credentials needed.

use chrono::NaiveDate;
use chrono_tz::Tz;
use fieldbook_core::{clock, ClockPolicy, Region};

pub(crate) fn parse_tz(raw: &str) -> anyhow::Result<Tz> {
    raw.parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("invalid timezone '{raw}': {e}"))
}

pub(crate) fn parse_region(raw: &str) -> anyhow::Result<Region> {
    raw.parse::<Region>().map_err(|e| anyhow::anyhow!(e))
}

/// Prints whether `date` is bookable in `region` at the current reference time.
///
/// # Errors
///
/// Returns an error for an unknown timezone or region.
pub(crate) fn run_check_date(tz: &str, date: NaiveDate, region: &str) -> anyhow::Result<()> {
    let policy = ClockPolicy::system(parse_tz(tz)?);
    let region = parse_region(region)?;
    let now = policy.now();
    let cutoff = policy.cutoff();

    println!(
        "reference time: {} (cutoff {}, minimum lead {} day(s))",
        now.format("%Y-%m-%d %H:%M %Z"),
        if cutoff.is_cutoff_active { "active" } else { "inactive" },
        cutoff.minimum_lead_days
    );
    match policy.classify(date, region) {
        Ok(()) => println!("{date} is bookable in {region}"),
        Err(rejection) => println!("{date} rejected ({}): {rejection}", rejection.rule()),
    }
    Ok(())
}

/// Prints the region's window template, crew days and earliest bookable date.
///
/// # Errors
///
/// Returns an error for an unknown timezone or region.
pub(crate) fn run_windows(tz: &str, region: &str) -> anyhow::Result<()> {
    let policy = ClockPolicy::system(parse_tz(tz)?);
    let region = parse_region(region)?;

    println!("region: {region}");
    let windows = region
        .time_windows()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!("windows: {windows}");
    match region.allowed_weekdays() {
        Some(days) => println!(
            "crew days: {}",
            days.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        ),
        None => println!("crew days: Mon-Fri"),
    }
    println!("driver pool: {}", region.driver_pool().unwrap_or("\u{2014}"));
    match clock::earliest_bookable_date(policy.now(), region) {
        Some(date) => println!("earliest bookable: {date}"),
        None => println!("earliest bookable: none in the next 60 days"),
    }
    Ok(())
}
