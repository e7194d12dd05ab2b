//! Scaling of wind-speed series so their long-run mean matches the GWA.

use std::path::{Path, PathBuf};

use aeolus_profile::{PerLocation, scale_columns};
use aeolus_raster::{Location, extract_values};
use ndarray::{Array2, ArrayView2};
use tracing::{debug, info};

use crate::error::GwaError;

/// Mean wind speed each series is measured against.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    /// Known values, shared or one per location.
    Values(PerLocation),
    /// A raster sampled at each location's nearest pixel.
    Raster(PathBuf),
}

impl From<f64> for Reference {
    fn from(v: f64) -> Self {
        Reference::Values(PerLocation::Uniform(v))
    }
}

impl From<Vec<f64>> for Reference {
    fn from(v: Vec<f64>) -> Self {
        Reference::Values(PerLocation::Each(v))
    }
}

impl From<PathBuf> for Reference {
    fn from(p: PathBuf) -> Self {
        Reference::Raster(p)
    }
}

/// Scales each column of `wind_speed` by `gwa / lra`, where `gwa` is the
/// GWA mean at the location and `lra` the long-run average of the source
/// the series was taken from.
///
/// `wind_speed` is `[n_time, n_locations]` with columns in `locs` order.
///
/// # Errors
///
/// Returns [`GwaError::LocationCount`] if `locs` does not match the columns,
/// [`GwaError::MissingValue`] for a location without GWA or reference data,
/// and [`GwaError::NonPositiveReference`] for a reference `<= 0`.
pub fn adjust_lra_to_gwa(
    wind_speed: ArrayView2<'_, f64>,
    locs: &[Location],
    gwa: &Path,
    long_run_average: &Reference,
) -> Result<Array2<f64>, GwaError> {
    info!(gwa = %gwa.display(), n = locs.len(), "adjusting long-run average to GWA");
    adjust(wind_speed, locs, gwa, long_run_average)
}

/// Scales each column of `wind_speed` by `gwa / context_mean`, where
/// `context_mean` is the GWA mean over the weather-model cell the series
/// was taken from.
///
/// # Errors
///
/// As [`adjust_lra_to_gwa`].
pub fn adjust_context_mean_to_gwa(
    wind_speed: ArrayView2<'_, f64>,
    locs: &[Location],
    gwa: &Path,
    context_mean: &Reference,
) -> Result<Array2<f64>, GwaError> {
    info!(gwa = %gwa.display(), n = locs.len(), "adjusting context mean to GWA");
    adjust(wind_speed, locs, gwa, context_mean)
}

fn adjust(
    wind_speed: ArrayView2<'_, f64>,
    locs: &[Location],
    gwa: &Path,
    reference: &Reference,
) -> Result<Array2<f64>, GwaError> {
    if locs.len() != wind_speed.ncols() {
        return Err(GwaError::LocationCount {
            locations: locs.len(),
            columns: wind_speed.ncols(),
        });
    }
    let gwa_values = nearest_required(gwa, locs)?;
    let reference = match reference {
        Reference::Values(values) => values.broadcast(locs.len(), "reference")?,
        Reference::Raster(path) => nearest_required(path, locs)?,
    };

    let mut factors = Vec::with_capacity(locs.len());
    for (index, (&g, &r)) in gwa_values.iter().zip(&reference).enumerate() {
        if !r.is_finite() || r <= 0.0 {
            return Err(GwaError::NonPositiveReference { index, value: r });
        }
        debug!(index, gwa = g, reference = r, factor = g / r, "adjustment factor");
        factors.push(g / r);
    }

    Ok(scale_columns(wind_speed, &factors))
}

/// Nearest-pixel values at every location; a missing value is an error.
fn nearest_required(path: &Path, locs: &[Location]) -> Result<Vec<f64>, GwaError> {
    extract_values(path, locs)?
        .into_iter()
        .zip(locs)
        .enumerate()
        .map(|(index, (v, loc))| {
            v.ok_or_else(|| GwaError::MissingValue {
                index,
                lon: loc.lon(),
                lat: loc.lat(),
                path: path.to_path_buf(),
            })
        })
        .collect()
}
