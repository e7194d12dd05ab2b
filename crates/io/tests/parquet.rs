//! Integration tests for long-format Parquet output.

use std::fs::File;

use aeolus_io::{Compression, IoError, WindSeries, WriterConfig, write_parquet};
use aeolus_raster::Location;
use arrow::array::AsArray;
use arrow::datatypes::{Float64Type, Int64Type, UInt32Type};
use chrono::NaiveDate;
use ndarray::Array2;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempfile::tempdir;

fn series(n_times: usize) -> WindSeries {
    let start = NaiveDate::from_ymd_opt(2020, 2, 28)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let times = (0..n_times)
        .map(|h| start + chrono::TimeDelta::hours(h as i64))
        .collect();
    let locs = vec![
        Location::new(6.0, 50.0).unwrap(),
        Location::new(7.0, 51.0).unwrap(),
    ];
    let values = Array2::from_shape_fn((n_times, 2), |(t, l)| t as f64 + 100.0 * l as f64);
    WindSeries::new(times, locs, values).unwrap()
}

fn read_all(path: &std::path::Path) -> Vec<arrow::array::RecordBatch> {
    let file = File::open(path).unwrap();
    ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn rows_grouped_by_location() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ws.parquet");
    write_parquet(&path, &series(3), &WriterConfig::default()).unwrap();

    let batches = read_all(&path);
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, 6);

    let mut location = Vec::new();
    let mut speed = Vec::new();
    let mut time = Vec::new();
    for b in &batches {
        location.extend(b.column(1).as_primitive::<UInt32Type>().values().iter().copied());
        speed.extend(b.column(4).as_primitive::<Float64Type>().values().iter().copied());
        time.extend(b.column(0).as_primitive::<Int64Type>().values().iter().copied());
    }
    assert_eq!(location, [0, 0, 0, 1, 1, 1]);
    assert_eq!(speed, [0.0, 1.0, 2.0, 100.0, 101.0, 102.0]);
    // 2020-02-28T00:00:00Z
    assert_eq!(time[0], 1_582_848_000);
    assert_eq!(time[1] - time[0], 3600);
}

#[test]
fn zstd_and_small_row_groups() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ws.parquet");
    let config = WriterConfig::default()
        .with_compression(Compression::Zstd)
        .with_row_group_size(2);
    write_parquet(&path, &series(5), &config).unwrap();

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap()).unwrap();
    assert_eq!(reader.metadata().file_metadata().num_rows(), 10);
    assert!(reader.metadata().num_row_groups() >= 5);
}

#[test]
fn leap_day_removed_before_writing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("noleap.parquet");
    // 28 Feb to 1 Mar 2020, hourly.
    let trimmed = series(72).without_leap_days();
    assert_eq!(trimmed.n_times(), 48);
    write_parquet(&path, &trimmed, &WriterConfig::default()).unwrap();

    let rows: usize = read_all(&path).iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, 96);
}

#[test]
fn zero_row_group_size_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.parquet");
    let config = WriterConfig::default().with_row_group_size(0);
    let err = write_parquet(&path, &series(2), &config).unwrap_err();
    assert!(matches!(err, IoError::Validation { count: 1, .. }));
}
