//! Alpha command: power-law shear exponent at locations from the GWA.

use anyhow::{Context, Result};
use tracing::info_span;

use aeolus_gwa::{HeightPair, alpha_from_gwa};

use crate::cli::AlphaArgs;
use crate::convert;
use crate::report::{self, Report};

/// Compute alpha from two GWA layers and emit a report.
pub fn run(args: AlphaArgs) -> Result<()> {
    let _cmd = info_span!("alpha").entered();

    let dir = args
        .gwa
        .gwa_dir
        .clone()
        .context("--gwa-dir is required for alpha")?;
    let atlas = convert::build_atlas(dir, args.gwa.gwa_pattern.as_deref())?;
    let pair = HeightPair::try_from(args.gwa.pair)?;
    let values = alpha_from_gwa(&atlas, &args.locations, pair)
        .context("failed to derive alpha from the GWA")?;

    let (low, high) = pair.heights();
    let source = format!("gwa {low}/{high} m ({})", atlas.dir().display());
    report::emit(
        &Report::new("alpha", source, &args.locations, &values),
        args.output.as_deref(),
    )
}
