//! Coordinate reference systems and forward projection from WGS84.

use crate::error::RasterError;
use crate::location::Location;

// GRS80 ellipsoid.
const GRS80_A: f64 = 6_378_137.0;
const GRS80_INV_F: f64 = 298.257_222_101;

// EPSG:3035 projection parameters.
const LAEA_LAT0: f64 = 52.0;
const LAEA_LON0: f64 = 10.0;
const LAEA_FALSE_EASTING: f64 = 4_321_000.0;
const LAEA_FALSE_NORTHING: f64 = 3_210_000.0;

/// Coordinate reference system of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crs {
    /// Geographic longitude/latitude in degrees.
    #[default]
    Wgs84,
    /// ETRS89 / LAEA Europe (EPSG:3035), metres.
    EtrsLaea,
}

impl Crs {
    /// Resolves an EPSG code into a supported CRS.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::UnsupportedCrs`] for codes other than the
    /// geographic WGS84/ETRS89 systems and EPSG:3035.
    pub fn from_epsg(code: u32) -> Result<Self, RasterError> {
        match code {
            4326 | 4258 => Ok(Crs::Wgs84),
            3035 => Ok(Crs::EtrsLaea),
            other => Err(RasterError::UnsupportedCrs { code: other }),
        }
    }

    /// EPSG code of this CRS.
    pub fn epsg(self) -> u32 {
        match self {
            Crs::Wgs84 => 4326,
            Crs::EtrsLaea => 3035,
        }
    }

    /// Projects a WGS84 location into this CRS, returning `(x, y)`.
    pub fn project(self, loc: &Location) -> (f64, f64) {
        match self {
            Crs::Wgs84 => (loc.lon(), loc.lat()),
            Crs::EtrsLaea => laea_forward(loc.lon(), loc.lat()),
        }
    }
}

/// Authalic latitude helper `q(phi)` for an ellipsoid with eccentricity `e`.
fn authalic_q(sin_phi: f64, e: f64) -> f64 {
    let e2 = e * e;
    let es = e * sin_phi;
    (1.0 - e2) * (sin_phi / (1.0 - es * es) - (1.0 / (2.0 * e)) * ((1.0 - es) / (1.0 + es)).ln())
}

/// Ellipsoidal Lambert azimuthal equal-area forward projection (oblique
/// aspect) with the EPSG:3035 parameters.
fn laea_forward(lon: f64, lat: f64) -> (f64, f64) {
    let f = 1.0 / GRS80_INV_F;
    let e2 = 2.0 * f - f * f;
    let e = e2.sqrt();

    let phi = lat.to_radians();
    let phi0 = LAEA_LAT0.to_radians();
    let dlam = (lon - LAEA_LON0).to_radians();

    let q_p = authalic_q(1.0, e);
    let q_0 = authalic_q(phi0.sin(), e);
    let q = authalic_q(phi.sin(), e);

    let beta0 = (q_0 / q_p).asin();
    let beta = (q / q_p).clamp(-1.0, 1.0).asin();

    let r_q = GRS80_A * (q_p / 2.0).sqrt();
    let d = GRS80_A * (phi0.cos() / (1.0 - e2 * phi0.sin().powi(2)).sqrt()) / (r_q * beta0.cos());
    let b = r_q
        * (2.0 / (1.0 + beta0.sin() * beta.sin() + beta0.cos() * beta.cos() * dlam.cos())).sqrt();

    let x = LAEA_FALSE_EASTING + b * d * beta.cos() * dlam.sin();
    let y = LAEA_FALSE_NORTHING
        + (b / d) * (beta0.cos() * beta.sin() - beta0.sin() * beta.cos() * dlam.cos());
    (x, y)
}
