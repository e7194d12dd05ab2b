//! Affine pixel/world transforms for north-up rasters.

use crate::error::RasterError;

/// North-up affine transform between pixel and world coordinates.
///
/// The world coordinate of the top-left corner of pixel `(col, row)` is
/// `(origin_x + col * pixel_width, origin_y + row * pixel_height)`.
/// `pixel_height` is negative for the usual north-up layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    origin_x: f64,
    origin_y: f64,
    pixel_width: f64,
    pixel_height: f64,
}

impl GeoTransform {
    /// Creates a transform from the top-left corner and pixel size.
    pub const fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        }
    }

    /// Builds a transform from the GeoTIFF `ModelPixelScale` and
    /// `ModelTiepoint` tags. Only the first tie point is used.
    ///
    /// Returns `None` if either tag is too short.
    pub fn from_tiepoint(scale: &[f64], tiepoint: &[f64]) -> Option<Self> {
        if scale.len() < 2 || tiepoint.len() < 6 {
            return None;
        }
        let (sx, sy) = (scale[0], scale[1]);
        let (i, j) = (tiepoint[0], tiepoint[1]);
        let (x, y) = (tiepoint[3], tiepoint[4]);
        Some(Self::new(x - i * sx, y + j * sy, sx, -sy))
    }

    /// Builds a transform from a row-major 4x4 `ModelTransformation` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::RotatedTransform`] if the matrix has rotation
    /// or shear terms, or [`RasterError::Tiff`] if it has fewer than 16
    /// entries.
    pub fn from_matrix(m: &[f64]) -> Result<Self, RasterError> {
        if m.len() < 16 {
            return Err(RasterError::Tiff {
                reason: format!("model transformation has {} entries, expected 16", m.len()),
            });
        }
        if m[1] != 0.0 || m[4] != 0.0 {
            return Err(RasterError::RotatedTransform);
        }
        Ok(Self::new(m[3], m[7], m[0], m[5]))
    }

    /// Shifts the origin by half a pixel, for rasters whose coordinates
    /// refer to pixel centres (`PixelIsPoint`).
    pub fn centre_to_corner(self) -> Self {
        Self::new(
            self.origin_x - self.pixel_width / 2.0,
            self.origin_y - self.pixel_height / 2.0,
            self.pixel_width,
            self.pixel_height,
        )
    }

    /// Fractional pixel coordinates `(col, row)` of a world point.
    ///
    /// Integer parts identify the containing pixel; `(c + 0.5, r + 0.5)` is
    /// the centre of pixel `(c, r)`.
    pub fn world_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.origin_x) / self.pixel_width,
            (y - self.origin_y) / self.pixel_height,
        )
    }

    /// World coordinates of the centre of pixel `(col, row)`.
    pub fn pixel_centre(&self, col: usize, row: usize) -> (f64, f64) {
        (
            self.origin_x + (col as f64 + 0.5) * self.pixel_width,
            self.origin_y + (row as f64 + 0.5) * self.pixel_height,
        )
    }

    /// Top-left corner x.
    pub fn origin_x(&self) -> f64 {
        self.origin_x
    }

    /// Top-left corner y.
    pub fn origin_y(&self) -> f64 {
        self.origin_y
    }

    /// Pixel width in world units.
    pub fn pixel_width(&self) -> f64 {
        self.pixel_width
    }

    /// Pixel height in world units (negative for north-up).
    pub fn pixel_height(&self) -> f64 {
        self.pixel_height
    }
}
