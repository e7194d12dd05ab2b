//! # aeolus-gwa
//!
//! Operations backed by the Global Wind Atlas (GWA) mean wind-speed
//! rasters:
//!
//! - shear exponent and roughness length from the GWA means at two heights
//!   ([`alpha_from_gwa`], [`roughness_from_gwa`]);
//! - rescaling of wind-speed series so that their long-run mean matches the
//!   GWA ([`adjust_lra_to_gwa`], [`adjust_context_mean_to_gwa`]).

mod adjust;
mod atlas;
mod error;
mod shear;

pub use adjust::{Reference, adjust_context_mean_to_gwa, adjust_lra_to_gwa};
pub use atlas::{DEFAULT_PATTERN, GwaAtlas, HeightPair};
pub use error::GwaError;
pub use shear::{alpha_from_gwa, roughness_from_gwa};
