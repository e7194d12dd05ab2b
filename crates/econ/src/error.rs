//! Error types for aeolus-econ.

/// Error type for all fallible operations in the aeolus-econ crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EconError {
    /// Returned when input series are empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when array lengths do not match.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched field.
        field: String,
    },

    /// Returned when a financial parameter is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when discounted production is zero, so the cost per unit is
    /// undefined.
    #[error("discounted production is {value}, LCOE is undefined")]
    NoProduction {
        /// The discounted production sum.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_length_mismatch() {
        let err = EconError::LengthMismatch {
            expected: 4,
            got: 3,
            field: "productions".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "length mismatch: expected 4, got 3 for productions"
        );
    }

    #[test]
    fn display_no_production() {
        let err = EconError::NoProduction { value: 0.0 };
        assert_eq!(err.to_string(), "discounted production is 0, LCOE is undefined");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<EconError>();
    }
}
