//! Seeding from the time of day.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::DiffQuotError;

/// Microsecond part of the current wall-clock time, in `0..1_000_000`.
///
/// Only the sub-second part is used, so two runs within the same second
/// still get different seeds while the value stays small.
pub fn seed_from_time_of_day() -> Result<u64, DiffQuotError> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?;
    Ok(u64::from(now.subsec_micros()))
}
