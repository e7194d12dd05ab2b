//! Pure conversion functions: TOML job structs -> crate API types.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use aeolus_gwa::{GwaAtlas, HeightPair, Reference};
use aeolus_io::{Compression, NcWriterConfig, SourceConfig, TimeAxis, WriterConfig};
use aeolus_landcover::LandCover;
use aeolus_profile::PerLocation;

use crate::config::*;

/// Vertical extrapolation law.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Law {
    Log,
    Power,
}

/// Which GWA-based adjustment to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustMethod {
    LongRunAverage,
    ContextMean,
}

/// Source of the per-location surface parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    /// Given directly in the job.
    Value(PerLocation),
    /// CORINE grid raster, roughness only.
    Clc { path: PathBuf, window: u32 },
    /// Another land-cover product, roughness only.
    LandCover {
        path: PathBuf,
        product: LandCover,
        window: u32,
    },
    /// GWA rasters at two heights.
    Gwa { atlas: GwaAtlas, pair: HeightPair },
}

/// Parses a projection law name.
pub fn parse_law(s: &str) -> Result<Law> {
    match s.to_lowercase().as_str() {
        "log" | "log-law" => Ok(Law::Log),
        "power" | "power-law" => Ok(Law::Power),
        other => bail!("unknown projection law: {other:?} (expected \"log\" or \"power\")"),
    }
}

/// Parses an adjustment method name.
pub fn parse_adjust_method(s: &str) -> Result<AdjustMethod> {
    match s.to_lowercase().as_str() {
        "lra" | "long-run-average" => Ok(AdjustMethod::LongRunAverage),
        "context-mean" | "context" => Ok(AdjustMethod::ContextMean),
        other => bail!("unknown adjustment method: {other:?}"),
    }
}

/// Builds a GWA atlas from a directory and optional file-name pattern.
pub fn build_atlas(dir: PathBuf, pattern: Option<&str>) -> Result<GwaAtlas> {
    let mut atlas = GwaAtlas::new(dir);
    if let Some(p) = pattern {
        atlas = atlas.with_pattern(p);
    }
    atlas.validate()?;
    Ok(atlas)
}

/// Builds a [`SourceConfig`] from the `[source]` table.
pub fn build_source_config(source: &SourceToml) -> Result<SourceConfig> {
    let cfg = SourceConfig::default().with_time_var(&source.time_var);
    let cfg = match &source.speed_var {
        Some(speed) => cfg.with_speed_var(speed),
        None => cfg.with_components(&source.u_var, &source.v_var),
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Converts the `[adjust]` reference into a [`Reference`].
pub fn build_reference(reference: &ReferenceToml) -> Reference {
    match reference {
        ReferenceToml::Values(v) => Reference::Values(v.clone()),
        ReferenceToml::Raster(p) => Reference::Raster(p.clone()),
    }
}

/// Converts `[projection.surface]` into a [`Surface`].
///
/// Exactly the fields belonging to `source` must be set.
pub fn build_surface(surface: &SurfaceToml) -> Result<Surface> {
    let require_path = || {
        surface
            .path
            .clone()
            .with_context(|| format!("surface source {:?} requires `path`", surface.source))
    };
    match surface.source.to_lowercase().as_str() {
        "value" => {
            let value = surface
                .value
                .clone()
                .context("surface source \"value\" requires `value`")?;
            Ok(Surface::Value(value))
        }
        "clc" => Ok(Surface::Clc {
            path: require_path()?,
            window: surface.window,
        }),
        "land-cover" => {
            let product: LandCover = surface
                .product
                .as_deref()
                .context("surface source \"land-cover\" requires `product`")?
                .parse()?;
            Ok(Surface::LandCover {
                path: require_path()?,
                product,
                window: surface.window,
            })
        }
        "gwa" => {
            let dir = surface
                .dir
                .clone()
                .context("surface source \"gwa\" requires `dir`")?;
            Ok(Surface::Gwa {
                atlas: build_atlas(dir, surface.pattern.as_deref())?,
                pair: HeightPair::try_from(surface.pair)?,
            })
        }
        other => bail!(
            "unknown surface source: {other:?} (expected \"value\", \"clc\", \"land-cover\" or \"gwa\")"
        ),
    }
}

/// Parses a Parquet compression name.
pub fn parse_compression(s: &str) -> Result<Compression> {
    Ok(s.parse()?)
}

/// Builds a [`WriterConfig`] from the `[output]` table.
pub fn build_writer_config(output: &OutputToml) -> Result<WriterConfig> {
    let compression = parse_compression(&output.compression)?;
    Ok(WriterConfig::default()
        .with_compression(compression)
        .with_row_group_size(output.row_group_size))
}

/// Builds an [`NcWriterConfig`] from the `[output]` table.
pub fn build_nc_writer_config(output: &OutputToml) -> Result<NcWriterConfig> {
    let mut cfg = NcWriterConfig::default();
    if let Some(units) = &output.time_units {
        cfg = cfg.with_time_axis(TimeAxis::parse(units)?);
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(source: &str) -> SurfaceToml {
        SurfaceToml {
            source: source.to_string(),
            value: None,
            path: None,
            product: None,
            window: 0,
            dir: None,
            pattern: None,
            pair: 0,
        }
    }

    #[test]
    fn laws() {
        assert_eq!(parse_law("Log").unwrap(), Law::Log);
        assert_eq!(parse_law("power-law").unwrap(), Law::Power);
        assert!(parse_law("cubic").is_err());
    }

    #[test]
    fn adjust_methods() {
        assert_eq!(
            parse_adjust_method("lra").unwrap(),
            AdjustMethod::LongRunAverage
        );
        assert_eq!(
            parse_adjust_method("context-mean").unwrap(),
            AdjustMethod::ContextMean
        );
        assert!(parse_adjust_method("mean").is_err());
    }

    #[test]
    fn value_surface() {
        let mut s = surface("value");
        assert!(build_surface(&s).is_err());
        s.value = Some(PerLocation::Uniform(0.1));
        assert_eq!(
            build_surface(&s).unwrap(),
            Surface::Value(PerLocation::Uniform(0.1))
        );
    }

    #[test]
    fn land_cover_surface() {
        let mut s = surface("land-cover");
        s.path = Some(PathBuf::from("cci.tif"));
        assert!(build_surface(&s).is_err(), "product is required");
        s.product = Some("ESA-CCI".to_string());
        s.window = 1;
        match build_surface(&s).unwrap() {
            Surface::LandCover {
                product, window, ..
            } => {
                assert_eq!(product, LandCover::Cci);
                assert_eq!(window, 1);
            }
            other => panic!("expected LandCover, got {other:?}"),
        }
    }

    #[test]
    fn gwa_surface_pair() {
        let mut s = surface("gwa");
        s.dir = Some(PathBuf::from("gwa"));
        s.pair = 2;
        match build_surface(&s).unwrap() {
            Surface::Gwa { pair, .. } => assert_eq!(pair, HeightPair::Wide),
            other => panic!("expected Gwa, got {other:?}"),
        }
        s.pair = 3;
        assert!(build_surface(&s).is_err());
    }

    #[test]
    fn unknown_surface() {
        assert!(build_surface(&surface("lidar")).is_err());
    }

    #[test]
    fn source_speed_var_wins() {
        let source = SourceToml {
            path: PathBuf::from("merra.nc4"),
            height: 50.0,
            u_var: "U50M".to_string(),
            v_var: "V50M".to_string(),
            speed_var: Some("WS50M".to_string()),
            time_var: "time".to_string(),
            remove_leap_days: false,
        };
        let cfg = build_source_config(&source).unwrap();
        assert_eq!(
            cfg.wind(),
            &aeolus_io::WindVariables::Speed("WS50M".to_string())
        );
    }

    #[test]
    fn bad_time_units() {
        let output = OutputToml {
            time_units: Some("fortnights since 2000-01-01".to_string()),
            ..OutputToml::default()
        };
        assert!(build_nc_writer_config(&output).is_err());
    }
}
