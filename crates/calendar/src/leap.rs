//! Leap-day detection and removal.

use chrono::{Datelike, NaiveDateTime};

use crate::error::CalendarError;
use crate::sequence::hourly_index;

/// Hours in a common year.
pub const HOURS_PER_YEAR: usize = 8760;

/// Hours in a leap year.
pub const HOURS_PER_LEAP_YEAR: usize = 8784;

/// Returns `true` if the timestamp falls on February 29.
pub fn is_leap_day(t: NaiveDateTime) -> bool {
    t.month() == 2 && t.day() == 29
}

/// Per-timestamp flag marking February 29 entries.
pub fn leap_day_mask(times: &[NaiveDateTime]) -> Vec<bool> {
    times.iter().map(|&t| is_leap_day(t)).collect()
}

/// Drops every value whose timestamp falls on February 29.
///
/// # Errors
///
/// Returns [`CalendarError::LengthMismatch`] if `values` and `times` differ
/// in length.
pub fn remove_leap_day<T: Clone>(
    values: &[T],
    times: &[NaiveDateTime],
) -> Result<Vec<T>, CalendarError> {
    if values.len() != times.len() {
        return Err(CalendarError::LengthMismatch {
            values: values.len(),
            times: times.len(),
        });
    }
    Ok(values
        .iter()
        .zip(times)
        .filter(|(_, t)| !is_leap_day(**t))
        .map(|(v, _)| v.clone())
        .collect())
}

/// Drops the 24 February 29 hours from an untimed hourly leap-year array.
///
/// The array is taken to start at January 1, 00:00 of a leap year, so the
/// removed block is hours `1416..1440`.
///
/// # Errors
///
/// Returns [`CalendarError::NotLeapYear`] unless `values` holds exactly
/// [`HOURS_PER_LEAP_YEAR`] entries.
pub fn remove_leap_day_hourly<T: Clone>(values: &[T]) -> Result<Vec<T>, CalendarError> {
    if values.len() != HOURS_PER_LEAP_YEAR {
        return Err(CalendarError::NotLeapYear {
            len: values.len(),
            expected: HOURS_PER_LEAP_YEAR,
        });
    }
    let times = hourly_index(2000)?;
    remove_leap_day(values, &times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn detects_feb_29() {
        assert!(is_leap_day(at(2016, 2, 29, 13)));
        assert!(!is_leap_day(at(2016, 2, 28, 23)));
        assert!(!is_leap_day(at(2016, 3, 1, 0)));
    }

    #[test]
    fn mask_marks_only_leap_day() {
        let times = [at(2016, 2, 28, 0), at(2016, 2, 29, 0), at(2016, 3, 1, 0)];
        assert_eq!(leap_day_mask(&times), vec![false, true, false]);
    }

    #[test]
    fn removes_by_timestamp() {
        let times = [at(2016, 2, 28, 0), at(2016, 2, 29, 0), at(2016, 3, 1, 0)];
        let out = remove_leap_day(&[1, 2, 3], &times).unwrap();
        assert_eq!(out, vec![1, 3]);
    }

    #[test]
    fn length_mismatch() {
        let times = [at(2016, 2, 28, 0)];
        let err = remove_leap_day(&[1, 2], &times).unwrap_err();
        assert!(matches!(err, CalendarError::LengthMismatch { .. }));
    }

    #[test]
    fn hourly_removes_24_hours() {
        let values: Vec<usize> = (0..HOURS_PER_LEAP_YEAR).collect();
        let out = remove_leap_day_hourly(&values).unwrap();
        assert_eq!(out.len(), HOURS_PER_YEAR);
        // Feb 28 23:00 is hour 1415, Mar 1 00:00 is hour 1440.
        assert_eq!(out[1415], 1415);
        assert_eq!(out[1416], 1440);
    }

    #[test]
    fn hourly_rejects_common_year() {
        let err = remove_leap_day_hourly(&vec![0.0; HOURS_PER_YEAR]).unwrap_err();
        assert_eq!(
            err,
            CalendarError::NotLeapYear {
                len: HOURS_PER_YEAR,
                expected: HOURS_PER_LEAP_YEAR
            }
        );
    }
}
