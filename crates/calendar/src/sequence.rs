//! Hourly timestamp generation.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::CalendarError;

/// Generates the hourly timestamps of a full calendar year, starting at
/// `YYYY-01-01 00:00` and ending at `YYYY-12-31 23:00`.
///
/// Leap years yield 8784 entries, other years 8760.
pub fn hourly_index(year: i32) -> Result<Vec<NaiveDateTime>, CalendarError> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(CalendarError::InvalidYear { year })?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(CalendarError::InvalidYear { year })?;

    let n_hours = (end - start).num_hours() as usize;
    Ok((0..n_hours)
        .map(|h| start + TimeDelta::hours(h as i64))
        .collect())
}
