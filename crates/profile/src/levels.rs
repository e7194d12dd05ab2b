//! Back-calculation of shear exponent and roughness length from wind speeds
//! at two heights.

use crate::error::ProfileError;
use crate::param::{PerLocation, common_len};

fn check_levels(low_height: f64, high_height: f64) -> Result<(), ProfileError> {
    for (value, field) in [(low_height, "low_height"), (high_height, "high_height")] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ProfileError::NonPositive {
                field: field.to_string(),
                value,
            });
        }
    }
    if low_height == high_height {
        return Err(ProfileError::DegenerateLevels {
            reason: format!("both levels at {low_height} m"),
        });
    }
    Ok(())
}

/// Shear exponent between two levels: `ln(v_h / v_l) / ln(z_h / z_l)`.
///
/// # Errors
///
/// Returns [`ProfileError::NonPositive`] for non-positive speeds or heights
/// and [`ProfileError::DegenerateLevels`] for equal heights.
pub fn alpha_between(
    low_speed: f64,
    low_height: f64,
    high_speed: f64,
    high_height: f64,
) -> Result<f64, ProfileError> {
    check_levels(low_height, high_height)?;
    for (value, field) in [(low_speed, "low_speed"), (high_speed, "high_speed")] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ProfileError::NonPositive {
                field: field.to_string(),
                value,
            });
        }
    }
    Ok((high_speed / low_speed).ln() / (high_height / low_height).ln())
}

/// Roughness length matching the log law through two levels:
/// `exp((v_h ln z_l - v_l ln z_h) / (v_h - v_l))`.
///
/// # Errors
///
/// Returns [`ProfileError::NonPositive`] for non-positive heights and
/// [`ProfileError::DegenerateLevels`] for equal heights or equal speeds.
pub fn roughness_between(
    low_speed: f64,
    low_height: f64,
    high_speed: f64,
    high_height: f64,
) -> Result<f64, ProfileError> {
    check_levels(low_height, high_height)?;
    if low_speed == high_speed {
        return Err(ProfileError::DegenerateLevels {
            reason: format!("equal wind speeds ({low_speed} m/s) at both levels"),
        });
    }
    Ok(
        ((high_speed * low_height.ln() - low_speed * high_height.ln())
            / (high_speed - low_speed))
            .exp(),
    )
}

/// Element-wise [`alpha_between`] over per-location inputs.
///
/// All `Each` arguments must share one length; `Uniform` arguments are
/// broadcast. When every argument is uniform the result has one element.
pub fn alpha_from_levels(
    low_speed: &PerLocation,
    low_height: &PerLocation,
    high_speed: &PerLocation,
    high_height: &PerLocation,
) -> Result<Vec<f64>, ProfileError> {
    elementwise(low_speed, low_height, high_speed, high_height, alpha_between)
}

/// Element-wise [`roughness_between`] over per-location inputs.
///
/// Broadcasting follows [`alpha_from_levels`].
pub fn roughness_from_levels(
    low_speed: &PerLocation,
    low_height: &PerLocation,
    high_speed: &PerLocation,
    high_height: &PerLocation,
) -> Result<Vec<f64>, ProfileError> {
    elementwise(low_speed, low_height, high_speed, high_height, roughness_between)
}

fn elementwise(
    low_speed: &PerLocation,
    low_height: &PerLocation,
    high_speed: &PerLocation,
    high_height: &PerLocation,
    f: fn(f64, f64, f64, f64) -> Result<f64, ProfileError>,
) -> Result<Vec<f64>, ProfileError> {
    let n = common_len(&[
        (low_speed, "low_speed"),
        (low_height, "low_height"),
        (high_speed, "high_speed"),
        (high_height, "high_height"),
    ])?;
    let vl = low_speed.broadcast(n, "low_speed")?;
    let zl = low_height.broadcast(n, "low_height")?;
    let vh = high_speed.broadcast(n, "high_speed")?;
    let zh = high_height.broadcast(n, "high_height")?;

    (0..n).map(|i| f(vl[i], zl[i], vh[i], zh[i])).collect()
}
