//! Supported land-cover products.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LandCoverError;

/// A land-cover classification whose classes map to roughness lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LandCover {
    /// CORINE raster grid indices (1..=44, CLC 2006 legend).
    ClcGrid,
    /// Three-digit CORINE class codes (111..=523).
    ClcCode,
    /// ESA GlobCover 2009.
    GlobCover,
    /// MODIS land cover type 1 (IGBP).
    Modis,
    /// ESA-CCI land cover.
    Cci,
}

impl LandCover {
    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            LandCover::ClcGrid => "clc",
            LandCover::ClcCode => "clc-code",
            LandCover::GlobCover => "globcover",
            LandCover::Modis => "modis",
            LandCover::Cci => "cci",
        }
    }
}

impl fmt::Display for LandCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LandCover {
    type Err = LandCoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clc" | "clc-grid" => Ok(LandCover::ClcGrid),
            "clc-code" => Ok(LandCover::ClcCode),
            "globcover" => Ok(LandCover::GlobCover),
            "modis" => Ok(LandCover::Modis),
            "cci" | "esa-cci" => Ok(LandCover::Cci),
            _ => Err(LandCoverError::UnknownProduct {
                name: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for LandCover {
    type Error = LandCoverError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LandCover> for String {
    fn from(lc: LandCover) -> Self {
        lc.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!("CLC".parse::<LandCover>().unwrap(), LandCover::ClcGrid);
        assert_eq!("clc-grid".parse::<LandCover>().unwrap(), LandCover::ClcGrid);
        assert_eq!("clc-code".parse::<LandCover>().unwrap(), LandCover::ClcCode);
        assert_eq!("globCover".parse::<LandCover>().unwrap(), LandCover::GlobCover);
        assert_eq!(" modis ".parse::<LandCover>().unwrap(), LandCover::Modis);
        assert_eq!("cci".parse::<LandCover>().unwrap(), LandCover::Cci);
    }

    #[test]
    fn rejects_unknown_product() {
        assert!(matches!(
            "landsat".parse::<LandCover>(),
            Err(LandCoverError::UnknownProduct { .. })
        ));
    }

    #[test]
    fn display_round_trips() {
        for lc in [
            LandCover::ClcGrid,
            LandCover::ClcCode,
            LandCover::GlobCover,
            LandCover::Modis,
            LandCover::Cci,
        ] {
            assert_eq!(lc.to_string().parse::<LandCover>().unwrap(), lc);
        }
    }
}
