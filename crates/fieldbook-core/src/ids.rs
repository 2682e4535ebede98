//! Identifier generation for provider-side records.
//!
//! Identifiers combine a millisecond timestamp with a random alphanumeric
//! suffix. They are never derived from the address, so two bookings for the
//! same property cannot collide on identifier alone.

use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;

pub const TEMP_ORDER_PREFIX: &str = "TEMP";
pub const LOCATION_PREFIX: &str = "LOC";

const SUFFIX_LEN: usize = 6;

/// Identifier used for a short-lived order created to sidestep a
/// duplicate-order conflict, e.g. `TEMP1747400000000A1B2C3`.
#[must_use]
pub fn temporary_order_no(now: DateTime<Utc>) -> String {
    tagged(TEMP_ORDER_PREFIX, now)
}

/// Identifier for a freshly resolved location, e.g. `LOC1747400000000X9Y8Z7`.
#[must_use]
pub fn location_id(now: DateTime<Utc>) -> String {
    tagged(LOCATION_PREFIX, now)
}

#[must_use]
pub fn is_temporary_order_no(order_no: &str) -> bool {
    order_no
        .strip_prefix(TEMP_ORDER_PREFIX)
        .is_some_and(|rest| rest.len() > SUFFIX_LEN && rest.is_ascii())
}

fn tagged(prefix: &str, now: DateTime<Utc>) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();
    format!("{prefix}{}{suffix}", now.timestamp_millis())
}
