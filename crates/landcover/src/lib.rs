//! # aeolus-landcover
//!
//! Surface roughness length from land-cover classifications.
//!
//! Each supported product ([`LandCover`]) has a class → roughness table.
//! Rasters are sampled at WGS84 locations through `aeolus-raster`,
//! optionally averaging over a square pixel window.

mod error;
mod product;
mod sample;
mod tables;

pub use error::LandCoverError;
pub use product::LandCover;
pub use sample::{roughness_from_clc, roughness_from_land_cover_raster};
pub use tables::{
    CLC_NODATA_CODE, CLC_SEA_GRID, clc_grid_to_code, roughness_for, roughness_from_land_cover,
};
