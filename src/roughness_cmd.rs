//! Roughness command: roughness length at locations.

use anyhow::{Context, Result};
use tracing::info_span;

use aeolus_gwa::{HeightPair, roughness_from_gwa};
use aeolus_landcover::roughness_from_land_cover_raster;

use crate::cli::RoughnessArgs;
use crate::convert;
use crate::report::{self, Report};

/// Compute roughness from a land-cover raster or the GWA and emit a report.
pub fn run(args: RoughnessArgs) -> Result<()> {
    let _cmd = info_span!("roughness").entered();

    let (source, values) = match (&args.land_cover, &args.gwa.gwa_dir) {
        (Some(path), _) => {
            let values =
                roughness_from_land_cover_raster(path, &args.locations, args.product, args.window)
                    .with_context(|| format!("failed to sample {}", path.display()))?;
            (format!("{} ({})", args.product, path.display()), values)
        }
        (None, Some(dir)) => {
            let atlas = convert::build_atlas(dir.clone(), args.gwa.gwa_pattern.as_deref())?;
            let pair = HeightPair::try_from(args.gwa.pair)?;
            let values = roughness_from_gwa(&atlas, &args.locations, pair)
                .context("failed to derive roughness from the GWA")?;
            let (low, high) = pair.heights();
            (format!("gwa {low}/{high} m ({})", dir.display()), values)
        }
        (None, None) => anyhow::bail!("provide --land-cover or --gwa-dir"),
    };

    report::emit(
        &Report::new("roughness", source, &args.locations, &values),
        args.output.as_deref(),
    )
}
