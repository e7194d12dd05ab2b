//! Geographic point locations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RasterError;

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    lon: f64,
    lat: f64,
}

#[derive(Deserialize)]
struct RawLocation {
    lon: f64,
    lat: f64,
}

impl TryFrom<RawLocation> for Location {
    type Error = RasterError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Location::new(raw.lon, raw.lat)
    }
}

impl Location {
    /// Creates a location from longitude and latitude.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidLocation`] if either value is not finite,
    /// `|lon| > 180` or `|lat| > 90`.
    pub fn new(lon: f64, lat: f64) -> Result<Self, RasterError> {
        if !lon.is_finite() || !lat.is_finite() || lon.abs() > 180.0 || lat.abs() > 90.0 {
            return Err(RasterError::InvalidLocation { lon, lat });
        }
        Ok(Self { lon, lat })
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lon, self.lat)
    }
}

/// Parses `"lon,lat"`.
impl FromStr for Location {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || RasterError::ParseLocation {
            input: s.to_string(),
        };
        let (lon, lat) = s.split_once(',').ok_or_else(parse_err)?;
        let lon: f64 = lon.trim().parse().map_err(|_| parse_err())?;
        let lat: f64 = lat.trim().parse().map_err(|_| parse_err())?;
        Location::new(lon, lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid() {
        let loc = Location::new(6.202, 50.763).unwrap();
        assert_eq!(loc.lon(), 6.202);
        assert_eq!(loc.lat(), 50.763);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Location::new(181.0, 0.0).is_err());
        assert!(Location::new(0.0, -90.5).is_err());
        assert!(Location::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn parses_pair() {
        let loc: Location = " 6.005, 50.105".parse().unwrap();
        assert_eq!(loc, Location::new(6.005, 50.105).unwrap());
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "6.0;50.0".parse::<Location>().unwrap_err();
        assert!(matches!(err, RasterError::ParseLocation { .. }));
    }
}
