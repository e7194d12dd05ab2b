//! Roughness sampled from land-cover rasters at locations.

use std::path::Path;

use aeolus_raster::{Location, Raster};
use aeolus_stats::mean;
use tracing::{debug, info};

use crate::error::LandCoverError;
use crate::product::LandCover;
use crate::tables::{CLC_SEA_GRID, roughness_for};

/// Roughness at each location from a CORINE grid-index raster.
///
/// No-data, NaN and out-of-legend pixels (anything outside 1..=44) are read
/// as sea and ocean. With `win_range > 0` the result is the mean roughness
/// over the `(2 * win_range + 1)²` pixel window, clipped at the raster edge.
///
/// # Errors
///
/// Returns [`LandCoverError::OutsideRaster`] for a location outside the
/// raster, or a wrapped raster error if the file cannot be read.
pub fn roughness_from_clc(
    path: &Path,
    locs: &[Location],
    win_range: u32,
) -> Result<Vec<f64>, LandCoverError> {
    let mut raster = Raster::open(path)?;
    info!(path = %path.display(), n = locs.len(), win_range, "roughness from CLC");

    locs.iter()
        .enumerate()
        .map(|(index, loc)| {
            let window = non_empty_window(&mut raster, index, loc, win_range)?;
            let roughness = window
                .iter()
                .map(|pixel| {
                    let grid = pixel.map_or(CLC_SEA_GRID, |v| v.round() as i64);
                    let grid = if (1..=CLC_SEA_GRID).contains(&grid) {
                        grid
                    } else {
                        CLC_SEA_GRID
                    };
                    roughness_for(grid, LandCover::ClcGrid)
                })
                .collect::<Result<Vec<_>, _>>()?;
            let r = mean(&roughness);
            debug!(index, %loc, pixels = window.len(), roughness = r, "CLC roughness");
            Ok(r)
        })
        .collect()
}

/// Roughness at each location from a land-cover raster of any product.
///
/// [`LandCover::ClcGrid`] rasters are handled by [`roughness_from_clc`].
/// For the other products no-data pixels are skipped and the result is the
/// mean roughness of the remaining pixels in the window.
///
/// # Errors
///
/// Returns [`LandCoverError::OutsideRaster`] for a location outside the
/// raster, [`LandCoverError::NoValidPixels`] if its window holds only
/// no-data, and [`LandCoverError::UnknownCode`] for a class missing from the
/// product's table.
pub fn roughness_from_land_cover_raster(
    path: &Path,
    locs: &[Location],
    product: LandCover,
    win_range: u32,
) -> Result<Vec<f64>, LandCoverError> {
    if product == LandCover::ClcGrid {
        return roughness_from_clc(path, locs, win_range);
    }
    let mut raster = Raster::open(path)?;
    info!(path = %path.display(), %product, n = locs.len(), win_range, "roughness from land cover");

    locs.iter()
        .enumerate()
        .map(|(index, loc)| {
            let window = non_empty_window(&mut raster, index, loc, win_range)?;
            let roughness = window
                .iter()
                .flatten()
                .map(|v| roughness_for(v.round() as i64, product))
                .collect::<Result<Vec<_>, _>>()?;
            if roughness.is_empty() {
                return Err(LandCoverError::NoValidPixels { index, win_range });
            }
            let r = mean(&roughness);
            debug!(index, %loc, pixels = roughness.len(), roughness = r, "land-cover roughness");
            Ok(r)
        })
        .collect()
}

fn non_empty_window(
    raster: &mut Raster,
    index: usize,
    loc: &Location,
    win_range: u32,
) -> Result<Vec<Option<f64>>, LandCoverError> {
    let window = raster.window_at(loc, win_range)?;
    if window.is_empty() {
        return Err(LandCoverError::OutsideRaster {
            index,
            lon: loc.lon(),
            lat: loc.lat(),
        });
    }
    Ok(window)
}
