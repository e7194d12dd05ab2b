//! Project command: extract wind series, adjust them to the GWA, project them
//! to hub height and write the result.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use aeolus_gwa::{
    adjust_context_mean_to_gwa, adjust_lra_to_gwa, alpha_from_gwa, roughness_from_gwa,
};
use aeolus_io::{TimeseriesSet, WeatherSource, WindSeries, store_timeseries, write_parquet};
use aeolus_landcover::{roughness_from_clc, roughness_from_land_cover_raster};
use aeolus_profile::{PerLocation, project_by_log_law, project_by_power_law};
use aeolus_raster::Location;

use crate::cli::ProjectArgs;
use crate::config::{JobConfig, OutputToml, ProjectionToml};
use crate::convert::{self, AdjustMethod, Law, Surface};

/// Run a `project` job.
pub fn run(args: ProjectArgs) -> Result<()> {
    let _cmd = info_span!("project").entered();
    // 1. Load job TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read job file: {}", args.config.display()))?;
    let job: JobConfig = toml::from_str(&toml_str).context("failed to parse TOML job")?;

    let output = args
        .output
        .clone()
        .or_else(|| job.output.path.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("no output path: set [output].path in the job or use --output")
        })?;
    if job.locations.is_empty() {
        bail!("job has no locations");
    }

    // 2. Extract series at the source height
    let source_cfg = convert::build_source_config(&job.source)?;
    let source = WeatherSource::open(&job.source.path, &source_cfg)
        .with_context(|| format!("failed to open source: {}", job.source.path.display()))?;
    let mut series = source
        .wind_speed(&job.locations)
        .context("failed to extract wind speeds")?;
    if job.source.remove_leap_days {
        series = series.without_leap_days();
    }
    info!(
        n_times = series.n_times(),
        n_locations = series.n_locations(),
        "series extracted"
    );

    // 3. Long-run adjustment
    if let Some(adjust) = &job.adjust {
        let method = convert::parse_adjust_method(&adjust.method)?;
        let reference = convert::build_reference(&adjust.reference);
        let adjusted = match method {
            AdjustMethod::LongRunAverage => {
                adjust_lra_to_gwa(series.values(), &job.locations, &adjust.gwa, &reference)
            }
            AdjustMethod::ContextMean => {
                adjust_context_mean_to_gwa(series.values(), &job.locations, &adjust.gwa, &reference)
            }
        }
        .with_context(|| format!("failed to adjust to {}", adjust.gwa.display()))?;
        series = series.with_values(adjusted)?;
    }

    // 4. Vertical projection
    let mut height = job.source.height;
    if let Some(projection) = &job.projection {
        series = project(series, &job.locations, job.source.height, projection)?;
        height = projection.target_height;
    }
    log_means(&series);

    // 5. Write
    write_output(&output, &series, height, &job.output)?;
    info!(path = %output.display(), "output written");
    Ok(())
}

fn project(
    series: WindSeries,
    locs: &[Location],
    measured: f64,
    projection: &ProjectionToml,
) -> Result<WindSeries> {
    let law = convert::parse_law(&projection.law)?;
    let surface = convert::build_surface(&projection.surface)?;
    let parameter = surface_parameter(law, &surface, locs)?;
    let measured = PerLocation::Uniform(measured);
    let target = PerLocation::Uniform(projection.target_height);

    let projected = match law {
        Law::Log => project_by_log_law(series.values(), &measured, &target, &parameter),
        Law::Power => project_by_power_law(series.values(), &measured, &target, &parameter),
    }
    .context("vertical projection failed")?;
    info!(?law, target = projection.target_height, "series projected");
    Ok(series.with_values(projected)?)
}

/// Roughness for the log law, alpha for the power law.
fn surface_parameter(law: Law, surface: &Surface, locs: &[Location]) -> Result<PerLocation> {
    let values = match (law, surface) {
        (_, Surface::Value(v)) => return Ok(v.clone()),
        (Law::Log, Surface::Clc { path, window }) => roughness_from_clc(path, locs, *window)
            .with_context(|| format!("failed to sample {}", path.display()))?,
        (
            Law::Log,
            Surface::LandCover {
                path,
                product,
                window,
            },
        ) => roughness_from_land_cover_raster(path, locs, *product, *window)
            .with_context(|| format!("failed to sample {}", path.display()))?,
        (Law::Log, Surface::Gwa { atlas, pair }) => roughness_from_gwa(atlas, locs, *pair)
            .context("failed to derive roughness from the GWA")?,
        (Law::Power, Surface::Gwa { atlas, pair }) => {
            alpha_from_gwa(atlas, locs, *pair).context("failed to derive alpha from the GWA")?
        }
        (Law::Power, Surface::Clc { .. } | Surface::LandCover { .. }) => {
            bail!("land-cover sources give roughness; the power law needs alpha")
        }
    };
    Ok(PerLocation::Each(values))
}

fn log_means(series: &WindSeries) {
    for (index, loc) in series.locations().iter().enumerate() {
        if let Some(col) = series.column(index) {
            let col = col.to_vec();
            debug!(
                index,
                %loc,
                mean = aeolus_stats::mean(&col),
                sd = aeolus_stats::sd(&col),
                "projected series"
            );
        }
    }
}

fn write_output(path: &Path, series: &WindSeries, height: f64, output: &OutputToml) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("nc") | Some("nc4") => {
            let cfg = convert::build_nc_writer_config(output)?;
            let height = height.to_string();
            let set = TimeseriesSet::from_series(
                &output.variable,
                series,
                &[("unit", "m s-1"), ("height", height.as_str())],
            );
            store_timeseries(path, &set, &cfg)
                .with_context(|| format!("failed to write NetCDF: {}", path.display()))
        }
        Some("parquet") => {
            let cfg = convert::build_writer_config(output)?;
            write_parquet(path, series, &cfg)
                .with_context(|| format!("failed to write Parquet: {}", path.display()))
        }
        _ => bail!(
            "unsupported output extension for {}: expected .nc, .nc4 or .parquet",
            path.display()
        ),
    }
}
