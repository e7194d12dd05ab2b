//! # aeolus-calendar
//!
//! Leap-day handling for hourly weather series.
//!
//! Weather-model output is usually delivered on the Gregorian calendar while
//! most energy-system models expect 8760-hour years. This crate removes the
//! 24 hours of February 29 either by timestamp or, for bare arrays of a full
//! leap year, by position.
//!
//! ## Quick Start
//!
//! ```ignore
//! use aeolus_calendar::{hourly_index, remove_leap_day, remove_leap_day_hourly};
//!
//! let times = hourly_index(2000).unwrap();
//! assert_eq!(times.len(), 8784);
//!
//! let values = vec![1.0; 8784];
//! let trimmed = remove_leap_day_hourly(&values).unwrap();
//! assert_eq!(trimmed.len(), 8760);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `leap` | Leap-day detection and removal |
//! | `sequence` | Hourly timestamp generation |
//! | `error` | Error types |

mod error;
mod leap;
mod sequence;

pub use error::CalendarError;
pub use leap::{
    HOURS_PER_LEAP_YEAR, HOURS_PER_YEAR, is_leap_day, leap_day_mask, remove_leap_day,
    remove_leap_day_hourly,
};
pub use sequence::hourly_index;
