//! Shear exponent and roughness length from GWA means at two heights.

use std::path::Path;

use aeolus_profile::{alpha_between, roughness_between};
use aeolus_raster::{Location, interpolate_values};
use tracing::{debug, info};

use crate::atlas::{GwaAtlas, HeightPair};
use crate::error::GwaError;

/// Power-law shear exponent at each location from the GWA means at the two
/// heights of `pair`, bilinearly interpolated.
///
/// # Errors
///
/// Returns [`GwaError::MissingLayer`] if a layer is absent,
/// [`GwaError::MissingValue`] for a location without GWA data, or a wrapped
/// profile error for unusable means.
pub fn alpha_from_gwa(
    atlas: &GwaAtlas,
    locs: &[Location],
    pair: HeightPair,
) -> Result<Vec<f64>, GwaError> {
    info!(?pair, n = locs.len(), "alpha from GWA");
    from_pair(atlas, locs, pair, alpha_between)
}

/// Log-law roughness length at each location from the GWA means at the two
/// heights of `pair`, bilinearly interpolated.
///
/// # Errors
///
/// As [`alpha_from_gwa`]; equal means at both heights are a wrapped
/// [`aeolus_profile::ProfileError::DegenerateLevels`].
pub fn roughness_from_gwa(
    atlas: &GwaAtlas,
    locs: &[Location],
    pair: HeightPair,
) -> Result<Vec<f64>, GwaError> {
    info!(?pair, n = locs.len(), "roughness from GWA");
    from_pair(atlas, locs, pair, roughness_between)
}

fn from_pair(
    atlas: &GwaAtlas,
    locs: &[Location],
    pair: HeightPair,
    f: fn(f64, f64, f64, f64) -> Result<f64, aeolus_profile::ProfileError>,
) -> Result<Vec<f64>, GwaError> {
    let (low_h, high_h) = pair.heights();
    let low_path = atlas.path_for(low_h)?;
    let high_path = atlas.path_for(high_h)?;
    let low = sample_required(&low_path, locs)?;
    let high = sample_required(&high_path, locs)?;

    low.iter()
        .zip(&high)
        .enumerate()
        .map(|(index, (&vl, &vh))| {
            let v = f(vl, f64::from(low_h), vh, f64::from(high_h))?;
            debug!(index, low = vl, high = vh, value = v, "GWA pair");
            Ok(v)
        })
        .collect()
}

/// Interpolated values at every location; a missing value is an error.
fn sample_required(path: &Path, locs: &[Location]) -> Result<Vec<f64>, GwaError> {
    interpolate_values(path, locs)?
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
