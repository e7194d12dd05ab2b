//! Error types for aeolus-profile.

/// Error type for all fallible operations in the aeolus-profile crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    /// Returned when a height, roughness or speed that must be positive is not.
    #[error("{field} must be finite and > 0, got {value}")]
    NonPositive {
        /// Name of the offending parameter.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// Returned when a parameter that may take any sign is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending parameter.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// Returned when a per-location parameter does not match the number of
    /// locations.
    #[error("length mismatch for {field}: expected {expected}, got {got}")]
    LengthMismatch {
        /// Name of the offending parameter.
        field: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when a measurement height does not exceed the roughness
    /// length, so the log law is undefined.
    #[error("height {height} m must exceed roughness length {roughness} m")]
    HeightBelowRoughness {
        /// Height above ground (m).
        height: f64,
        /// Roughness length (m).
        roughness: f64,
    },

    /// Returned when two levels cannot determine a profile.
    #[error("degenerate levels: {reason}")]
    DegenerateLevels {
        /// Why the two levels are unusable.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_non_positive() {
        let err = ProfileError::NonPositive {
            field: "roughness".to_string(),
            value: -0.1,
        };
        assert_eq!(err.to_string(), "roughness must be finite and > 0, got -0.1");
    }

    #[test]
    fn display_length_mismatch() {
        let err = ProfileError::LengthMismatch {
            field: "alpha".to_string(),
            expected: 3,
            got: 2,
        };
        assert_eq!(err.to_string(), "length mismatch for alpha: expected 3, got 2");
    }

    #[test]
    fn display_height_below_roughness() {
        let err = ProfileError::HeightBelowRoughness {
            height: 0.5,
            roughness: 1.5,
        };
        assert_eq!(
            err.to_string(),
            "height 0.5 m must exceed roughness length 1.5 m"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<ProfileError>();
    }
}
