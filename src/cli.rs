use std::path::PathBuf;

use aeolus_landcover::LandCover;
use aeolus_raster::Location;
use clap::{Parser, Subcommand};

/// Aeolus wind-resource assessment toolkit.
#[derive(Parser)]
#[command(
    name = "aeolus",
    version,
    about = "Long-run adjustment, vertical extrapolation and surface roughness for wind series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Extract, adjust and project wind series described by a TOML job.
    Project(ProjectArgs),
    /// Roughness length at locations from land cover or the GWA.
    Roughness(RoughnessArgs),
    /// Shear exponent at locations from the GWA.
    Alpha(AlphaArgs),
    /// Simple levelised cost of electricity.
    Lcoe(LcoeArgs),
}

/// Arguments for the `project` subcommand.
#[derive(clap::Args)]
pub struct ProjectArgs {
    /// Path to the TOML job file.
    #[arg(short, long, default_value = "aeolus.toml")]
    pub config: PathBuf,

    /// Override the output path from the job file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// GWA raster selection shared by `roughness` and `alpha`.
#[derive(clap::Args)]
pub struct GwaArgs {
    /// Directory holding the GWA mean wind-speed rasters.
    #[arg(long)]
    pub gwa_dir: Option<PathBuf>,

    /// File-name pattern with a `{height}` or `{height:03}` placeholder.
    #[arg(long, requires = "gwa_dir")]
    pub gwa_pattern: Option<String>,

    /// Height pair: 0 = 50/100 m, 1 = 100/200 m, 2 = 50/200 m.
    #[arg(long, default_value_t = 0)]
    pub pair: u8,
}

/// Arguments for the `roughness` subcommand.
#[derive(clap::Args)]
pub struct RoughnessArgs {
    /// Location as `lon,lat`; repeat for several.
    #[arg(short, long = "location", required = true, allow_hyphen_values = true)]
    pub locations: Vec<Location>,

    /// Land-cover raster to sample.
    #[arg(long, conflicts_with = "gwa_dir", required_unless_present = "gwa_dir")]
    pub land_cover: Option<PathBuf>,

    /// Land-cover product of `--land-cover`.
    #[arg(long, default_value = "clc")]
    pub product: LandCover,

    /// Half-width of the averaging window in pixels.
    #[arg(short, long, default_value_t = 0)]
    pub window: u32,

    #[command(flatten)]
    pub gwa: GwaArgs,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `alpha` subcommand.
#[derive(clap::Args)]
pub struct AlphaArgs {
    /// Location as `lon,lat`; repeat for several.
    #[arg(short, long = "location", required = true, allow_hyphen_values = true)]
    pub locations: Vec<Location>,

    #[command(flatten)]
    pub gwa: GwaArgs,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `lcoe` subcommand.
#[derive(clap::Args)]
pub struct LcoeArgs {
    /// Total capital expenditure.
    #[arg(long)]
    pub capex: f64,

    /// Mean annual production.
    #[arg(long)]
    pub production: f64,

    /// Fixed annual opex as a fraction of capex.
    #[arg(long, default_value_t = 0.02)]
    pub opex_per_capex: f64,

    /// Economic lifetime in years.
    #[arg(long, default_value_t = 20)]
    pub lifetime: u32,

    /// Discount rate.
    #[arg(long, default_value_t = 0.08)]
    pub discount_rate: f64,
}
