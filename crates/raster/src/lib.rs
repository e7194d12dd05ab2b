//! # aeolus-raster
//!
//! Point sampling of single-band GeoTIFF rasters at geographic locations.
//!
//! Rasters are opened lazily: only the strips or tiles touched by a sample
//! are decoded, and decoded chunks are cached for the lifetime of the
//! [`Raster`]. Locations are always given in WGS84 longitude/latitude and
//! projected into the raster's CRS on the fly.
//!
//! Supported coordinate reference systems:
//!
//! - geographic longitude/latitude (EPSG:4326 and compatible datums)
//! - ETRS89 Lambert azimuthal equal-area Europe (EPSG:3035)
//!
//! ## Sampling modes
//!
//! | Method | Behaviour |
//! |--------|-----------|
//! | [`Raster::value_at`] | value of the pixel containing the point |
//! | [`Raster::interpolate_at`] | bilinear between the surrounding pixel centres |
//! | [`Raster::window_at`] | all pixels within `win_range` of the containing pixel |

mod crs;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
mod error;
mod geotiff;
mod location;
mod sample;
mod transform;

pub use crs::Crs;
pub use error::RasterError;
pub use geotiff::Raster;
pub use location::Location;
pub use sample::{extract_values, extract_windows, interpolate_values};
pub use transform::GeoTransform;
