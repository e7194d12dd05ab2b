//! Log-law and power-law projection of wind speeds between heights.

use ndarray::{Array2, ArrayView2, Axis};
use rayon::prelude::*;
use tracing::debug;

use crate::error::ProfileError;
use crate::param::PerLocation;

/// Log-law scaling factor `ln(target / z0) / ln(measured / z0)`.
fn log_factor(measured: f64, target: f64, roughness: f64) -> Result<f64, ProfileError> {
    for height in [measured, target] {
        if height <= roughness {
            return Err(ProfileError::HeightBelowRoughness { height, roughness });
        }
    }
    Ok((target / roughness).ln() / (measured / roughness).ln())
}

/// Projects a single wind speed with the log law.
///
/// # Errors
///
/// Returns [`ProfileError::NonPositive`] for non-positive heights or
/// roughness and [`ProfileError::HeightBelowRoughness`] when either height
/// does not exceed the roughness length.
pub fn log_law(
    wind_speed: f64,
    measured_height: f64,
    target_height: f64,
    roughness: f64,
) -> Result<f64, ProfileError> {
    check_positive(measured_height, "measured_height")?;
    check_positive(target_height, "target_height")?;
    check_positive(roughness, "roughness")?;
    Ok(wind_speed * log_factor(measured_height, target_height, roughness)?)
}

/// Projects a single wind speed with the power law.
///
/// # Errors
///
/// Returns [`ProfileError::NonPositive`] for non-positive heights and
/// [`ProfileError::NonFinite`] for a NaN or infinite alpha.
pub fn power_law(
    wind_speed: f64,
    measured_height: f64,
    target_height: f64,
    alpha: f64,
) -> Result<f64, ProfileError> {
    check_positive(measured_height, "measured_height")?;
    check_positive(target_height, "target_height")?;
    check_finite(alpha, "alpha")?;
    Ok(wind_speed * (target_height / measured_height).powf(alpha))
}

/// Projects every column of `wind_speed` (`[n_time, n_locations]`) from the
/// measured to the target height with the log law.
///
/// # Errors
///
/// Returns [`ProfileError::LengthMismatch`] if a per-location parameter
/// does not have one value per column, plus the errors of [`log_law`].
pub fn project_by_log_law(
    wind_speed: ArrayView2<'_, f64>,
    measured_height: &PerLocation,
    target_height: &PerLocation,
    roughness: &PerLocation,
) -> Result<Array2<f64>, ProfileError> {
    let n = wind_speed.ncols();
    let measured = measured_height.broadcast_positive(n, "measured_height")?;
    let target = target_height.broadcast_positive(n, "target_height")?;
    let z0 = roughness.broadcast_positive(n, "roughness")?;

    let factors = measured
        .iter()
        .zip(&target)
        .zip(&z0)
        .map(|((&m, &t), &r)| log_factor(m, t, r))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(n_locations = n, n_time = wind_speed.nrows(), "log-law projection");
    Ok(scale_columns(wind_speed, &factors))
}

/// Projects every column of `wind_speed` (`[n_time, n_locations]`) from the
/// measured to the target height with the power law.
///
/// # Errors
///
/// Returns [`ProfileError::LengthMismatch`] if a per-location parameter
/// does not have one value per column, plus the errors of [`power_law`].
pub fn project_by_power_law(
    wind_speed: ArrayView2<'_, f64>,
    measured_height: &PerLocation,
    target_height: &PerLocation,
    alpha: &PerLocation,
) -> Result<Array2<f64>, ProfileError> {
    let n = wind_speed.ncols();
    let measured = measured_height.broadcast_positive(n, "measured_height")?;
    let target = target_height.broadcast_positive(n, "target_height")?;
    let alpha = alpha.broadcast(n, "alpha")?;
    for &a in &alpha {
        check_finite(a, "alpha")?;
    }

    let factors: Vec<f64> = measured
        .iter()
        .zip(&target)
        .zip(&alpha)
        .map(|((&m, &t), &a)| (t / m).powf(a))
        .collect();

    debug!(n_locations = n, n_time = wind_speed.nrows(), "power-law projection");
    Ok(scale_columns(wind_speed, &factors))
}

/// Multiplies column `i` by `factors[i]`, one column per rayon task.
///
/// `factors` must hold one entry per column; surplus columns are copied
/// unscaled.
pub fn scale_columns(wind_speed: ArrayView2<'_, f64>, factors: &[f64]) -> Array2<f64> {
    let mut out = wind_speed.to_owned();
    out.axis_iter_mut(Axis(1))
        .into_par_iter()
        .zip(factors.par_iter())
        .for_each(|(mut col, &f)| col.mapv_inplace(|v| v * f));
    out
}

fn check_positive(value: f64, field: &str) -> Result<(), ProfileError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ProfileError::NonPositive {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_finite(value: f64, field: &str) -> Result<(), ProfileError> {
    if !value.is_finite() {
        return Err(ProfileError::NonFinite {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}
