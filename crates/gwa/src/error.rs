//! Error types for aeolus-gwa.

use std::path::PathBuf;

use aeolus_profile::ProfileError;
use aeolus_raster::RasterError;

/// Error type for all fallible operations in the aeolus-gwa crate.
#[derive(Debug, thiserror::Error)]
pub enum GwaError {
    /// Returned when the atlas file for a height does not exist.
    #[error("no GWA layer for {height} m: {} does not exist", path.display())]
    MissingLayer {
        /// Requested height (m).
        height: u32,
        /// Path the layer was expected at.
        path: PathBuf,
    },

    /// Returned when a file-name pattern has no height placeholder.
    #[error("GWA file pattern '{pattern}' contains neither {{height}} nor {{height:03}}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
    },

    /// Returned for a height-pair id other than 0, 1 or 2.
    #[error("invalid GWA height pair id {id} (expected 0, 1 or 2)")]
    InvalidPair {
        /// The rejected id.
        id: u8,
    },

    /// Returned when a raster has no value at a location.
    #[error("no value at location {index} ({lon}, {lat}) in {}", path.display())]
    MissingValue {
        /// Index of the location in the input slice.
        index: usize,
        /// Longitude in degrees.
        lon: f64,
        /// Latitude in degrees.
        lat: f64,
        /// Raster that was sampled.
        path: PathBuf,
    },

    /// Returned when a reference wind speed is zero, negative or NaN.
    #[error("reference wind speed at location {index} must be > 0, got {value}")]
    NonPositiveReference {
        /// Index of the location in the input slice.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// Returned when the number of locations differs from the number of
    /// wind-speed columns.
    #[error("{locations} locations given for {columns} wind-speed columns")]
    LocationCount {
        /// Number of locations.
        locations: usize,
        /// Number of columns in the wind-speed matrix.
        columns: usize,
    },

    /// Wrapped error from the raster crate.
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// Wrapped error from the profile crate.
    #[error(transparent)]
    Profile(#[from] ProfileError),
}
