//! LCOE command: simple levelised cost from CLI numbers.

use anyhow::{Context, Result};
use serde::Serialize;

use aeolus_econ::{Financing, simple_lcoe};

use crate::cli::LcoeArgs;
use crate::report;

#[derive(Debug, Serialize)]
struct LcoeReport {
    capex: f64,
    production: f64,
    financing: Financing,
    capital_recovery_factor: f64,
    lcoe: f64,
}

/// Compute the simple LCOE and print it as JSON.
pub fn run(args: LcoeArgs) -> Result<()> {
    let financing = Financing::default()
        .with_opex_per_capex(args.opex_per_capex)
        .with_lifetime(args.lifetime)
        .with_discount_rate(args.discount_rate);
    let lcoe = simple_lcoe(args.capex, args.production, &financing)
        .context("failed to compute LCOE")?;

    report::emit(
        &LcoeReport {
            capex: args.capex,
            production: args.production,
            capital_recovery_factor: financing.capital_recovery_factor(),
            financing,
            lcoe,
        },
        None,
    )
}
