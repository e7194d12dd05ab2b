//! Vertical wind-speed profiles.
//!
//! Extrapolates wind-speed time series between heights and back-calculates
//! the surface parameters that control wind shear.
//!
//! # Formulas
//!
//! | Operation | Formula |
//! |-----------|---------|
//! | Log law | `v_t = v_m * ln(z_t / z0) / ln(z_m / z0)` |
//! | Power law | `v_t = v_m * (z_t / z_m)^alpha` |
//! | Alpha from two levels | `alpha = ln(v_h / v_l) / ln(z_h / z_l)` |
//! | Roughness from two levels | `z0 = exp((v_h ln z_l - v_l ln z_h) / (v_h - v_l))` |
//!
//! Wind-speed matrices are `[n_time, n_locations]`; every per-location
//! parameter is a [`PerLocation`], either shared or one value per column.

mod error;
mod levels;
mod param;
mod project;

pub use error::ProfileError;
pub use levels::{alpha_between, alpha_from_levels, roughness_between, roughness_from_levels};
pub use param::PerLocation;
pub use project::{log_law, power_law, project_by_log_law, project_by_power_law, scale_columns};
