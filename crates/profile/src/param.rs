//! Parameters that are either shared by all locations or given per location.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// A per-location parameter: one shared value or one value per location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerLocation {
    /// Same value for every location.
    Uniform(f64),
    /// One value per location, in location order.
    Each(Vec<f64>),
}

impl PerLocation {
    /// Number of values carried, `None` for [`PerLocation::Uniform`].
    pub fn len(&self) -> Option<usize> {
        match self {
            PerLocation::Uniform(_) => None,
            PerLocation::Each(v) => Some(v.len()),
        }
    }

    /// Returns `true` for an empty [`PerLocation::Each`].
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Expands to exactly `n` values.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::LengthMismatch`] if an `Each` does not hold
    /// `n` values.
    pub fn broadcast(&self, n: usize, field: &str) -> Result<Vec<f64>, ProfileError> {
        match self {
            PerLocation::Uniform(v) => Ok(vec![*v; n]),
            PerLocation::Each(v) if v.len() == n => Ok(v.clone()),
            PerLocation::Each(v) => Err(ProfileError::LengthMismatch {
                field: field.to_string(),
                expected: n,
                got: v.len(),
            }),
        }
    }

    /// Like [`broadcast`](Self::broadcast) but additionally requires every
    /// value to be finite and strictly positive.
    pub fn broadcast_positive(&self, n: usize, field: &str) -> Result<Vec<f64>, ProfileError> {
        let values = self.broadcast(n, field)?;
        if let Some(&bad) = values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
            return Err(ProfileError::NonPositive {
                field: field.to_string(),
                value: bad,
            });
        }
        Ok(values)
    }
}

impl From<f64> for PerLocation {
    fn from(v: f64) -> Self {
        PerLocation::Uniform(v)
    }
}

impl From<Vec<f64>> for PerLocation {
    fn from(v: Vec<f64>) -> Self {
        PerLocation::Each(v)
    }
}

impl From<&[f64]> for PerLocation {
    fn from(v: &[f64]) -> Self {
        PerLocation::Each(v.to_vec())
    }
}

/// Common length of several parameters: the length of the `Each` entries,
/// or 1 when all are uniform.
pub(crate) fn common_len(params: &[(&PerLocation, &str)]) -> Result<usize, ProfileError> {
    let mut n: Option<usize> = None;
    for (p, field) in params {
        if let Some(len) = p.len() {
            match n {
                None => n = Some(len),
                Some(expected) if expected != len => {
                    return Err(ProfileError::LengthMismatch {
                        field: field.to_string(),
                        expected,
                        got: len,
                    });
                }
                Some(_) => {}
            }
        }
    }
    Ok(n.unwrap_or(1))
}
