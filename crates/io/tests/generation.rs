//! Integration tests for reading tabulated generation profiles.

use std::path::{Path, PathBuf};

use aeolus_io::{IoError, read_generation};
use approx::assert_relative_eq;
use chrono::NaiveDate;
use tempfile::tempdir;

const CAPACITIES: [f64; 3] = [10.0, 20.0, 40.0];
const NT: usize = 3;

fn write_generation_file(dir: &Path, with_cost: bool) -> PathBuf {
    let path = dir.join("generation.nc");
    let mut file = netcdf::create(&path).expect("create NetCDF file");
    file.add_dimension("time", NT).expect("add dim time");
    file.add_dimension("capacity", CAPACITIES.len())
        .expect("add dim capacity");
    {
        let time: Vec<f64> = (0..NT).map(|t| t as f64).collect();
        let mut var = file.add_variable::<f64>("time", &["time"]).expect("add time");
        var.put_values(&time, ..).expect("put time");
        var.put_attribute("units", "hours since 2015-01-01 00:00:00")
            .expect("add time units");
    }
    {
        let mut var = file
            .add_variable::<f64>("total_capacity", &["capacity"])
            .expect("add total_capacity");
        var.put_values(&CAPACITIES, ..).expect("put capacities");
        var.put_attribute("unit", "MW").expect("add capacity unit");
    }
    {
        // generation[t, c] = (t + 1) * capacity
        let mut data = Vec::new();
        for t in 0..NT {
            for c in CAPACITIES {
                data.push((t + 1) as f64 * c);
            }
        }
        let mut var = file
            .add_variable::<f64>("generation", &["time", "capacity"])
            .expect("add generation");
        var.put_values(&data, ..).expect("put generation");
        var.put_attribute("unit", "MWh").expect("add generation unit");
        var.put_attribute("region", "DE").expect("add region");
        var.put_attribute("technology", "wind_onshore")
            .expect("add technology");
    }
    if with_cost {
        let mut var = file
            .add_variable::<f64>("total_cost", &["capacity"])
            .expect("add total_cost");
        var.put_values(&[100.0, 180.0, 300.0], ..).expect("put cost");
        var.put_attribute("unit", "EUR").expect("add cost unit");
    }
    path
}

#[test]
fn exact_and_interpolated_capacities() {
    let dir = tempdir().unwrap();
    let path = write_generation_file(dir.path(), true);
    let profile = read_generation(&path, &[20.0, 30.0, 10.0]).unwrap();

    assert_eq!(profile.capacities(), &[20.0, 30.0, 10.0]);
    let g = profile.generation();
    assert_eq!(g.dim(), (NT, 3));
    for t in 0..NT {
        let scale = (t + 1) as f64;
        assert_relative_eq!(g[[t, 0]], 20.0 * scale);
        assert_relative_eq!(g[[t, 1]], 30.0 * scale);
        assert_relative_eq!(g[[t, 2]], 10.0 * scale);
    }

    let capex = profile.capex().unwrap();
    assert_relative_eq!(capex[0], 180.0);
    assert_relative_eq!(capex[1], 240.0);
    assert_relative_eq!(capex[2], 100.0);
}

#[test]
fn attributes_and_times() {
    let dir = tempdir().unwrap();
    let path = write_generation_file(dir.path(), true);
    let profile = read_generation(&path, &[40.0]).unwrap();

    assert_eq!(profile.generation_unit(), Some("MWh"));
    assert_eq!(profile.capacity_unit(), Some("MW"));
    assert_eq!(profile.capex_unit(), Some("EUR"));
    assert_eq!(profile.region(), Some("DE"));
    assert_eq!(profile.technology(), Some("wind_onshore"));

    let start = NaiveDate::from_ymd_opt(2015, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(profile.times()[0], start);
    assert_eq!(profile.times()[2], start + chrono::TimeDelta::hours(2));
}

#[test]
fn cost_is_optional() {
    let dir = tempdir().unwrap();
    let path = write_generation_file(dir.path(), false);
    let profile = read_generation(&path, &[15.0]).unwrap();

    assert!(profile.capex().is_none());
    assert!(profile.capex_unit().is_none());
    assert_relative_eq!(profile.generation()[[0, 0]], 15.0);
}

#[test]
fn capacity_above_range() {
    let dir = tempdir().unwrap();
    let path = write_generation_file(dir.path(), true);
    match read_generation(&path, &[20.0, 50.0]).unwrap_err() {
        IoError::CapacityOutOfRange { capacity, min, max } => {
            assert_eq!(capacity, 50.0);
            assert_eq!((min, max), (10.0, 40.0));
        }
        other => panic!("expected CapacityOutOfRange, got {other:?}"),
    }
}
