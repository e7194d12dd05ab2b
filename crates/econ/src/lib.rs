//! # aeolus-econ
//!
//! Levelised cost of electricity (LCOE).
//!
//! - [`simple_lcoe`]: annuitised capex plus fixed opex over mean annual
//!   production.
//! - [`lcoe`]: discounted annual expenditures over discounted annual
//!   production.

mod error;
mod lcoe;

pub use error::EconError;
pub use lcoe::{DiscountRate, Financing, lcoe, simple_lcoe};
