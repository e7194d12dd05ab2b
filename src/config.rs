use std::path::PathBuf;

use aeolus_profile::PerLocation;
use aeolus_raster::Location;
use serde::Deserialize;

/// A `project` job: where the series come from, how they are adjusted and
/// projected, and where they go.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    /// Sites to extract.
    pub locations: Vec<Location>,

    /// Gridded weather source.
    pub source: SourceToml,

    /// Optional long-run adjustment to the GWA.
    #[serde(default)]
    pub adjust: Option<AdjustToml>,

    /// Vertical projection.
    #[serde(default)]
    pub projection: Option<ProjectionToml>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceToml {
    pub path: PathBuf,
    /// Height of the source wind speeds in metres.
    #[serde(default = "default_source_height")]
    pub height: f64,
    #[serde(default = "default_u_var")]
    pub u_var: String,
    #[serde(default = "default_v_var")]
    pub v_var: String,
    /// Read speed directly from this variable instead of `u_var`/`v_var`.
    #[serde(default)]
    pub speed_var: Option<String>,
    #[serde(default = "default_time_var")]
    pub time_var: String,
    #[serde(default)]
    pub remove_leap_days: bool,
}

fn default_source_height() -> f64 {
    50.0
}
fn default_u_var() -> String {
    "U50M".to_string()
}
fn default_v_var() -> String {
    "V50M".to_string()
}
fn default_time_var() -> String {
    "time".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdjustToml {
    /// `lra` or `context-mean`.
    #[serde(default = "default_adjust_method")]
    pub method: String,
    /// GWA raster at the source height.
    pub gwa: PathBuf,
    /// Mean speed the series is measured against.
    pub reference: ReferenceToml,
}

fn default_adjust_method() -> String {
    "lra".to_string()
}

/// A scalar, one value per location, or a raster path.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReferenceToml {
    Values(PerLocation),
    Raster(PathBuf),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectionToml {
    /// `log` or `power`.
    pub law: String,
    pub target_height: f64,
    pub surface: SurfaceToml,
}

/// Where the roughness (log law) or shear exponent (power law) comes from.
///
/// `source` selects which of the other fields are read:
/// - `value`: `value`
/// - `clc`: `path`, `window`
/// - `land-cover`: `path`, `product`, `window`
/// - `gwa`: `dir`, `pattern`, `pair`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurfaceToml {
    pub source: String,
    #[serde(default)]
    pub value: Option<PerLocation>,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub window: u32,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub pair: u8,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    pub path: Option<PathBuf>,
    #[serde(default = "default_variable")]
    pub variable: String,
    /// CF units of the NetCDF time axis.
    #[serde(default)]
    pub time_units: Option<String>,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            path: None,
            variable: default_variable(),
            time_units: None,
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_variable() -> String {
    "wind_speed".to_string()
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_job() {
        let job: JobConfig = toml::from_str(
            r#"
            locations = [{ lon = 6.1, lat = 50.7 }]

            [source]
            path = "merra.nc4"
            "#,
        )
        .unwrap();
        assert_eq!(job.locations.len(), 1);
        assert_eq!(job.source.height, 50.0);
        assert_eq!(job.source.u_var, "U50M");
        assert!(job.source.speed_var.is_none());
        assert!(job.adjust.is_none());
        assert!(job.projection.is_none());
        assert_eq!(job.output.variable, "wind_speed");
        assert_eq!(job.output.row_group_size, 1_000_000);
    }

    #[test]
    fn full_job() {
        let job: JobConfig = toml::from_str(
            r#"
            locations = [{ lon = 6.1, lat = 50.7 }, { lon = -3.2, lat = 40.4 }]

            [source]
            path = "merra.nc4"
            speed_var = "WS50M"
            remove_leap_days = true

            [adjust]
            method = "context-mean"
            gwa = "gwa_50m.tif"
            reference = "merra_mean.tif"

            [projection]
            law = "log"
            target_height = 100.0

            [projection.surface]
            source = "land-cover"
            path = "modis.tif"
            product = "modis"
            window = 2

            [output]
            path = "out.parquet"
            compression = "zstd"
            "#,
        )
        .unwrap();
        let adjust = job.adjust.unwrap();
        assert!(matches!(adjust.reference, ReferenceToml::Raster(_)));
        let projection = job.projection.unwrap();
        assert_eq!(projection.surface.window, 2);
        assert_eq!(projection.surface.product.as_deref(), Some("modis"));
        assert_eq!(job.output.compression, "zstd");
    }

    #[test]
    fn reference_values() {
        let adjust: AdjustToml = toml::from_str(
            r#"
            gwa = "gwa.tif"
            reference = [5.5, 6.0]
            "#,
        )
        .unwrap();
        assert_eq!(adjust.method, "lra");
        match adjust.reference {
            ReferenceToml::Values(PerLocation::Each(v)) => assert_eq!(v, [5.5, 6.0]),
            other => panic!("expected per-location values, got {other:?}"),
        }
    }

    #[test]
    fn unknown_field_rejected() {
        let result: Result<SourceToml, _> = toml::from_str(
            r#"
            path = "merra.nc4"
            hieght = 10.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn invalid_location_rejected() {
        let result: Result<JobConfig, _> = toml::from_str(
            r#"
            locations = [{ lon = 200.0, lat = 50.7 }]
            [source]
            path = "merra.nc4"
            "#,
        );
        assert!(result.is_err());
    }
}
