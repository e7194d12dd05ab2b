//! CF-convention time axes: `"<unit> since <epoch>"`.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::IoError;

/// Unit of a CF time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Seconds.
    Seconds,
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
    /// Days of 24 hours.
    Days,
}

impl TimeUnit {
    /// Length of one unit in seconds.
    pub fn seconds(self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 3_600,
            TimeUnit::Days => 86_400,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "seconds" | "second" | "secs" | "sec" | "s" => Some(TimeUnit::Seconds),
            "minutes" | "minute" | "mins" | "min" => Some(TimeUnit::Minutes),
            "hours" | "hour" | "hrs" | "hr" | "h" => Some(TimeUnit::Hours),
            "days" | "day" | "d" => Some(TimeUnit::Days),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }
}

/// A time axis defined by a unit and an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxis {
    unit: TimeUnit,
    epoch: NaiveDateTime,
}

impl Default for TimeAxis {
    /// `minutes since 1900-01-01 00:00:00`.
    fn default() -> Self {
        Self {
            unit: TimeUnit::Minutes,
            epoch: NaiveDate::from_ymd_opt(1900, 1, 1)
                .unwrap_or_default()
                .and_time(NaiveTime::MIN),
        }
    }
}

impl TimeAxis {
    /// Creates an axis from a unit and an epoch.
    pub fn new(unit: TimeUnit, epoch: NaiveDateTime) -> Self {
        Self { unit, epoch }
    }

    /// Parses a CF `units` string such as `"hours since 1980-01-01"` or
    /// `"minutes since 1900-01-01 00:00:00"`.
    ///
    /// A `T` between date and time is accepted; anything after the
    /// time-of-day (such as a UTC offset) is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidTime`] for an unknown unit or a malformed
    /// epoch.
    pub fn parse(units: &str) -> Result<Self, IoError> {
        let invalid = || IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units}'"),
        };
        let mut parts = units.split_whitespace();
        let unit = parts.next().and_then(TimeUnit::parse).ok_or_else(invalid)?;
        if parts.next().map(str::to_ascii_lowercase).as_deref() != Some("since") {
            return Err(invalid());
        }
        let rest: Vec<&str> = parts.collect();
        let stamp = rest.join(" ");
        let mut pieces = stamp.splitn(2, |c: char| c == ' ' || c == 'T');
        let date_str = pieces.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            IoError::InvalidTime {
                reason: format!("failed to parse base date '{date_str}': {e}"),
            }
        })?;

        let time = match pieces.next().and_then(|s| s.split_whitespace().next()) {
            None => NaiveTime::MIN,
            Some(t) => {
                let t = t.trim_end_matches('Z');
                NaiveTime::parse_from_str(t, "%H:%M:%S%.f")
                    .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
                    .map_err(|e| IoError::InvalidTime {
                        reason: format!("failed to parse base time '{t}': {e}"),
                    })?
            }
        };

        Ok(Self::new(unit, date.and_time(time)))
    }

    /// Unit of the offsets.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Epoch the offsets count from.
    pub fn epoch(&self) -> NaiveDateTime {
        self.epoch
    }

    /// Timestamp of an offset, rounded to the nearest second.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidTime`] for non-finite offsets or results
    /// outside chrono's range.
    pub fn to_datetime(&self, offset: f64) -> Result<NaiveDateTime, IoError> {
        if !offset.is_finite() {
            return Err(IoError::InvalidTime {
                reason: format!("non-finite time offset {offset}"),
            });
        }
        let secs = (offset * self.unit.seconds() as f64).round() as i64;
        TimeDelta::try_seconds(secs)
            .and_then(|d| self.epoch.checked_add_signed(d))
            .ok_or_else(|| IoError::InvalidTime {
                reason: format!("date overflow adding {offset} {} to {}", self.unit.name(), self.epoch),
            })
    }

    /// Converts a slice of offsets into timestamps.
    pub fn to_datetimes(&self, offsets: &[f64]) -> Result<Vec<NaiveDateTime>, IoError> {
        offsets.iter().map(|&o| self.to_datetime(o)).collect()
    }

    /// Offset of `t` in whole units.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidTime`] if `t` precedes the epoch, does not
    /// fall on a whole unit, or overflows `u32`.
    pub fn to_offset_u32(&self, t: NaiveDateTime) -> Result<u32, IoError> {
        let secs = (t - self.epoch).num_seconds();
        let step = self.unit.seconds();
        if secs < 0 || secs % step != 0 {
            return Err(IoError::InvalidTime {
                reason: format!("{t} is not a whole number of {} after {}", self.unit.name(), self.epoch),
            });
        }
        u32::try_from(secs / step).map_err(|_| IoError::InvalidTime {
            reason: format!("{t} is too far after {} for a u32 offset", self.epoch),
        })
    }
}

impl fmt::Display for TimeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} since {}",
            self.unit.name(),
            self.epoch.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn parse_date_only() {
        let axis = TimeAxis::parse("days since 2000-01-01").unwrap();
        assert_eq!(axis.unit(), TimeUnit::Days);
        assert_eq!(axis.epoch(), at(2000, 1, 1, 0, 0));
    }

    #[test]
    fn parse_with_time_and_offset() {
        let axis = TimeAxis::parse("hours since 1980-01-01 00:30:00 0:00").unwrap();
        assert_eq!(axis.unit(), TimeUnit::Hours);
        assert_eq!(axis.epoch(), at(1980, 1, 1, 0, 30));
    }

    #[test]
    fn parse_iso_separator() {
        let axis = TimeAxis::parse("seconds since 2015-06-01T12:00:00Z").unwrap();
        assert_eq!(axis.epoch(), at(2015, 6, 1, 12, 0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(TimeAxis::parse("fortnights since 2000-01-01").is_err());
        assert!(TimeAxis::parse("days after 2000-01-01").is_err());
        assert!(TimeAxis::parse("days since").is_err());
        assert!(TimeAxis::parse("days since 2000-13-01").is_err());
    }

    #[test]
    fn offsets_to_datetimes() {
        let axis = TimeAxis::parse("minutes since 2000-01-01 00:00:00").unwrap();
        let times = axis.to_datetimes(&[0.0, 30.0, 90.0, 1440.0]).unwrap();
        assert_eq!(times[1], at(2000, 1, 1, 0, 30));
        assert_eq!(times[2], at(2000, 1, 1, 1, 30));
        assert_eq!(times[3], at(2000, 1, 2, 0, 0));
    }

    #[test]
    fn fractional_days() {
        let axis = TimeAxis::parse("days since 2000-01-01").unwrap();
        assert_eq!(axis.to_datetime(0.5).unwrap(), at(2000, 1, 1, 12, 0));
    }

    #[test]
    fn default_axis_display() {
        assert_eq!(
            TimeAxis::default().to_string(),
            "minutes since 1900-01-01 00:00:00"
        );
    }

    #[test]
    fn offset_round_trip() {
        let axis = TimeAxis::default();
        let t = at(2015, 3, 1, 13, 0);
        let offset = axis.to_offset_u32(t).unwrap();
        assert_eq!(axis.to_datetime(f64::from(offset)).unwrap(), t);
    }

    #[test]
    fn offset_before_epoch_rejected() {
        let axis = TimeAxis::default();
        assert!(axis.to_offset_u32(at(1899, 12, 31, 0, 0)).is_err());
    }

    #[test]
    fn offset_not_whole_unit_rejected() {
        let axis = TimeAxis::new(TimeUnit::Hours, at(2000, 1, 1, 0, 0));
        assert!(axis.to_offset_u32(at(2000, 1, 1, 0, 30)).is_err());
    }
}
