//! Class → roughness length lookup tables (metres).

use crate::error::LandCoverError;
use crate::product::LandCover;

/// Grid index used for sea and ocean, the fallback for no-data pixels.
pub const CLC_SEA_GRID: i64 = 44;

/// CLC code marking unclassified / no-data cells.
pub const CLC_NODATA_CODE: u16 = 999;

/// CLC 2006 legend: grid index `i` (1-based) maps to `CLC_LEGEND[i - 1]`.
const CLC_LEGEND: [u16; 44] = [
    111, 112, 121, 122, 123, 124, 131, 132, 133, 141, 142, //
    211, 212, 213, 221, 222, 223, 231, 241, 242, 243, 244, //
    311, 312, 313, 321, 322, 323, 324, 331, 332, 333, 334, 335, //
    411, 412, 421, 422, 423, //
    511, 512, 521, 522, 523,
];

/// Three-digit CLC code for a CLC raster grid index.
///
/// Indices 1..=44 follow the CLC 2006 legend; 48 is the no-data class and
/// maps to [`CLC_NODATA_CODE`]. Anything else is `None`.
pub fn clc_grid_to_code(grid: i64) -> Option<u16> {
    match grid {
        1..=44 => Some(CLC_LEGEND[(grid - 1) as usize]),
        48 => Some(CLC_NODATA_CODE),
        _ => None,
    }
}

fn clc_code_roughness(code: i64) -> Option<f64> {
    let r = match code {
        111 => 1.2,
        311 | 312 | 313 => 0.75,
        141 | 324 | 334 => 0.6,
        112 | 121 | 123 | 133 | 142 => 0.5,
        242 | 243 | 244 => 0.3,
        221 | 222 | 223 | 241 => 0.1,
        122 => 0.075,
        211 | 212 | 213 | 411 | 421 => 0.05,
        231 | 321 | 322 | 323 => 0.03,
        124 | 131 | 132 | 332 | 333 => 0.005,
        335 | 511 => 0.001,
        522 => 0.0008,
        412 | 422 | 423 | 512 | 521 => 0.0005,
        331 => 0.0003,
        523 => 0.0002,
        _ => return None,
    };
    Some(r)
}

fn globcover_roughness(code: i64) -> Option<f64> {
    let r = match code {
        210 => 0.0002,
        220 => 0.0004,
        200 => 0.005,
        140 => 0.03,
        150 => 0.05,
        11 | 14 | 130 => 0.1,
        180 => 0.2,
        20 | 30 => 0.3,
        120 | 160 => 0.5,
        170 => 0.6,
        190 => 1.0,
        40 | 50 | 60 | 70 | 90 | 100 | 110 => 1.5,
        _ => return None,
    };
    Some(r)
}

fn modis_roughness(code: i64) -> Option<f64> {
    let r = match code {
        0 => 0.0002,
        15 => 0.0004,
        16 => 0.005,
        10 => 0.03,
        6 | 7 | 12 => 0.1,
        11 => 0.2,
        14 => 0.3,
        9 => 0.5,
        13 => 1.0,
        1..=5 | 8 => 1.5,
        _ => return None,
    };
    Some(r)
}

fn cci_roughness(code: i64) -> Option<f64> {
    let r = match code {
        210 => 0.0002,
        220 => 0.001,
        150 | 152 | 153 | 200 | 201 | 202 => 0.005,
        130 | 140 => 0.03,
        10 | 11 | 20 | 30 | 120 | 121 | 122 => 0.1,
        180 => 0.2,
        12 | 110 => 0.3,
        40 | 60 | 61 | 62 | 100 | 160 => 0.5,
        170 => 0.6,
        190 => 1.0,
        50 | 70 | 71 | 72 | 80 | 81 | 82 | 90 => 1.5,
        _ => return None,
    };
    Some(r)
}

/// Roughness length of a single land-cover class.
///
/// For [`LandCover::ClcGrid`] indices above 44 are read as sea (44).
///
/// # Errors
///
/// Returns [`LandCoverError::UnknownCode`] if the class is not in the
/// product's table.
pub fn roughness_for(code: i64, product: LandCover) -> Result<f64, LandCoverError> {
    let r = match product {
        LandCover::ClcGrid => {
            let grid = if code > CLC_SEA_GRID { CLC_SEA_GRID } else { code };
            clc_grid_to_code(grid).and_then(|c| clc_code_roughness(i64::from(c)))
        }
        LandCover::ClcCode => clc_code_roughness(code),
        LandCover::GlobCover => globcover_roughness(code),
        LandCover::Modis => modis_roughness(code),
        LandCover::Cci => cci_roughness(code),
    };
    r.ok_or(LandCoverError::UnknownCode { code, product })
}

/// [`roughness_for`] over a slice of class codes.
pub fn roughness_from_land_cover(
    codes: &[i64],
    product: LandCover,
) -> Result<Vec<f64>, LandCoverError> {
    codes.iter().map(|&c| roughness_for(c, product)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clc_legend_endpoints() {
        assert_eq!(clc_grid_to_code(1), Some(111));
        assert_eq!(clc_grid_to_code(11), Some(142));
        assert_eq!(clc_grid_to_code(12), Some(211));
        assert_eq!(clc_grid_to_code(24), Some(312));
        assert_eq!(clc_grid_to_code(34), Some(335));
        assert_eq!(clc_grid_to_code(36), Some(412));
        assert_eq!(clc_grid_to_code(44), Some(523));
        assert_eq!(clc_grid_to_code(48), Some(CLC_NODATA_CODE));
        assert_eq!(clc_grid_to_code(0), None);
        assert_eq!(clc_grid_to_code(45), None);
    }

    #[test]
    fn every_clc_class_has_a_roughness() {
        for grid in 1..=44 {
            assert!(roughness_for(grid, LandCover::ClcGrid).is_ok(), "grid {grid}");
        }
    }

    #[test]
    fn clc_grid_examples() {
        assert_relative_eq!(roughness_for(24, LandCover::ClcGrid).unwrap(), 0.75);
        assert_relative_eq!(roughness_for(36, LandCover::ClcGrid).unwrap(), 0.0005);
        assert_relative_eq!(roughness_for(1, LandCover::ClcGrid).unwrap(), 1.2);
    }

    #[test]
    fn clc_grid_above_sea_is_sea() {
        assert_relative_eq!(roughness_for(48, LandCover::ClcGrid).unwrap(), 0.0002);
        assert_relative_eq!(roughness_for(128, LandCover::ClcGrid).unwrap(), 0.0002);
    }

    #[test]
    fn clc_nodata_code_is_unknown() {
        assert!(matches!(
            roughness_for(999, LandCover::ClcCode),
            Err(LandCoverError::UnknownCode { code: 999, .. })
        ));
    }

    #[test]
    fn other_products() {
        assert_relative_eq!(roughness_for(210, LandCover::GlobCover).unwrap(), 0.0002);
        assert_relative_eq!(roughness_for(70, LandCover::GlobCover).unwrap(), 1.5);
        assert_relative_eq!(roughness_for(0, LandCover::Modis).unwrap(), 0.0002);
        assert_relative_eq!(roughness_for(4, LandCover::Modis).unwrap(), 1.5);
        assert_relative_eq!(roughness_for(220, LandCover::Cci).unwrap(), 0.001);
        assert_relative_eq!(roughness_for(62, LandCover::Cci).unwrap(), 0.5);
    }

    #[test]
    fn slice_fails_on_first_unknown() {
        let r = roughness_from_land_cover(&[10, 999], LandCover::Modis);
        assert!(r.is_err());
        let r = roughness_from_land_cover(&[10, 13], LandCover::Modis).unwrap();
        assert_eq!(r, vec![0.03, 1.0]);
    }
}
