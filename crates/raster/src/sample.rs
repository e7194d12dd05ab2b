//! One-shot sampling helpers that open a raster, sample a set of locations
//! and close it again.

use std::path::Path;

use tracing::debug;

use crate::error::RasterError;
use crate::geotiff::Raster;
use crate::location::Location;

/// Value of the containing pixel at each location.
///
/// Entries are `None` for locations outside the raster or over no-data.
pub fn extract_values(path: &Path, locs: &[Location]) -> Result<Vec<Option<f64>>, RasterError> {
    let mut raster = Raster::open(path)?;
    let values = locs
        .iter()
        .map(|loc| raster.value_at(loc))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        path = %path.display(),
        n = locs.len(),
        missing = values.iter().filter(|v| v.is_none()).count(),
        "extracted raster values"
    );
    Ok(values)
}

/// Bilinearly interpolated value at each location.
pub fn interpolate_values(
    path: &Path,
    locs: &[Location],
) -> Result<Vec<Option<f64>>, RasterError> {
    let mut raster = Raster::open(path)?;
    locs.iter().map(|loc| raster.interpolate_at(loc)).collect()
}

/// Pixel window of radius `win_range` around each location.
pub fn extract_windows(
    path: &Path,
    locs: &[Location],
    win_range: u32,
) -> Result<Vec<Vec<Option<f64>>>, RasterError> {
    let mut raster = Raster::open(path)?;
    locs.iter()
        .map(|loc| raster.window_at(loc, win_range))
        .collect()
}
