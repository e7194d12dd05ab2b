//! Error types for aeolus-landcover.

use aeolus_raster::RasterError;

use crate::product::LandCover;

/// Error type for all fallible operations in the aeolus-landcover crate.
#[derive(Debug, thiserror::Error)]
pub enum LandCoverError {
    /// Returned when a class code has no roughness in the product's table.
    #[error("no roughness for {product} class {code}")]
    UnknownCode {
        /// The unmapped class code.
        code: i64,
        /// Land-cover product the code was interpreted in.
        product: LandCover,
    },

    /// Returned when a product name cannot be parsed.
    #[error("unknown land-cover product '{name}' (expected clc, clc-code, globcover, modis or cci)")]
    UnknownProduct {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when a location falls outside the land-cover raster.
    #[error("location {index} ({lon}, {lat}) is outside the land-cover raster")]
    OutsideRaster {
        /// Index of the location in the input slice.
        index: usize,
        /// Longitude in degrees.
        lon: f64,
        /// Latitude in degrees.
        lat: f64,
    },

    /// Returned when every pixel sampled for a location is no-data.
    #[error("location {index} has only no-data pixels within range {win_range}")]
    NoValidPixels {
        /// Index of the location in the input slice.
        index: usize,
        /// Window radius in pixels.
        win_range: u32,
    },

    /// Wrapped error from the raster crate.
    #[error(transparent)]
    Raster(#[from] RasterError),
}
