//! JSON reports for per-location results.

use std::path::Path;

use aeolus_raster::Location;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// One value at one location.
#[derive(Debug, Serialize)]
pub struct SiteValue {
    pub lon: f64,
    pub lat: f64,
    pub value: f64,
}

/// A named per-location quantity and where it came from.
#[derive(Debug, Serialize)]
pub struct Report {
    pub quantity: &'static str,
    pub source: String,
    pub sites: Vec<SiteValue>,
}

impl Report {
    pub fn new(quantity: &'static str, source: String, locs: &[Location], values: &[f64]) -> Self {
        let sites = locs
            .iter()
            .zip(values)
            .map(|(loc, &value)| SiteValue {
                lon: loc.lon(),
                lat: loc.lat(),
                value,
            })
            .collect();
        Self {
            quantity,
            source,
            sites,
        }
    }
}

/// Writes `report` as pretty JSON to `output`, or to stdout.
pub fn emit<T: Serialize>(report: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialise report")?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_pairs_locations_with_values() {
        let locs = [
            Location::new(6.0, 50.0).unwrap(),
            Location::new(7.0, 51.0).unwrap(),
        ];
        let report = Report::new("roughness", "clc".to_string(), &locs, &[0.03, 0.5]);
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["quantity"], "roughness");
        assert_eq!(json["sites"][1]["lon"], 7.0);
        assert_eq!(json["sites"][1]["value"], 0.5);
    }

    #[test]
    fn emit_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let locs = [Location::new(6.0, 50.0).unwrap()];
        emit(&Report::new("alpha", "gwa".to_string(), &locs, &[0.2]), Some(&path)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"alpha\""));
    }
}
