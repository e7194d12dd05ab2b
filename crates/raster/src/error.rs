//! Error types for aeolus-raster.

use std::path::PathBuf;

/// Error type for all fallible operations in the aeolus-raster crate.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Returned when a raster file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error from the operating system while opening a file.
    #[error("i/o error: {reason}")]
    Io {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the TIFF decoder.
    #[error("tiff error: {reason}")]
    Tiff {
        /// Description of the underlying TIFF failure.
        reason: String,
    },

    /// Returned when a TIFF carries no GeoTIFF georeferencing tags.
    #[error("raster is not georeferenced: {}", path.display())]
    MissingGeoreference {
        /// Path to the offending raster.
        path: PathBuf,
    },

    /// Returned for rotated or sheared model transformations.
    #[error("rotated raster transforms are not supported")]
    RotatedTransform,

    /// Returned when the raster's CRS cannot be handled.
    #[error("unsupported coordinate reference system: EPSG:{code}")]
    UnsupportedCrs {
        /// EPSG code found in the GeoKey directory.
        code: u32,
    },

    /// Returned when the pixel type has no numeric interpretation.
    #[error("unsupported sample type: {reason}")]
    UnsupportedSampleType {
        /// Description of the pixel layout.
        reason: String,
    },

    /// Returned when a coordinate is outside the valid WGS84 range.
    #[error("invalid location: lon={lon}, lat={lat}")]
    InvalidLocation {
        /// Longitude in degrees.
        lon: f64,
        /// Latitude in degrees.
        lat: f64,
    },

    /// Returned when a location string cannot be parsed.
    #[error("cannot parse location '{input}': expected 'lon,lat'")]
    ParseLocation {
        /// The unparsable input.
        input: String,
    },
}

impl From<tiff::TiffError> for RasterError {
    fn from(e: tiff::TiffError) -> Self {
        RasterError::Tiff {
            reason: e.to_string(),
        }
    }
}

impl From<std::io::Error> for RasterError {
    fn from(e: std::io::Error) -> Self {
        RasterError::Io {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = RasterError::FileNotFound {
            path: PathBuf::from("/tmp/missing.tif"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.tif");
    }

    #[test]
    fn display_unsupported_crs() {
        let err = RasterError::UnsupportedCrs { code: 32632 };
        assert_eq!(
            err.to_string(),
            "unsupported coordinate reference system: EPSG:32632"
        );
    }

    #[test]
    fn display_invalid_location() {
        let err = RasterError::InvalidLocation {
            lon: 200.0,
            lat: 10.0,
        };
        assert_eq!(err.to_string(), "invalid location: lon=200, lat=10");
    }

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RasterError = io.into();
        assert!(matches!(err, RasterError::Io { .. }));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<RasterError>();
    }
}
