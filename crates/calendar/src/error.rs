//! Error types for the aeolus-calendar crate.

/// Error type for all fallible operations in the aeolus-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when values and timestamps differ in length.
    #[error("length mismatch: {values} values but {times} timestamps")]
    LengthMismatch {
        /// Number of values supplied.
        values: usize,
        /// Number of timestamps supplied.
        times: usize,
    },

    /// Returned when an untimed array is not a full hourly leap year.
    #[error("cannot locate leap day in {len} untimed values (expected {expected})")]
    NotLeapYear {
        /// Length of the supplied array.
        len: usize,
        /// Required length.
        expected: usize,
    },

    /// Returned when a year cannot be represented as a calendar date.
    #[error("invalid year: {year}")]
    InvalidYear {
        /// The offending year.
        year: i32,
    },
}
