//! Arrow batch building for long-format wind series.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, RecordBatch, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;
use crate::series::WindSeries;

/// Arrow schema of the long-format output: one row per time step and
/// location.
pub(crate) fn build_schema() -> Schema {
    Schema::new(vec![
        Field::new("time", DataType::Int64, false),
        Field::new("location", DataType::UInt32, false),
        Field::new("lon", DataType::Float64, false),
        Field::new("lat", DataType::Float64, false),
        Field::new("wind_speed", DataType::Float64, false),
    ])
}

/// One batch holding the full time series of location `index`.
///
/// `time` is stored as seconds since the Unix epoch.
pub(crate) fn location_to_record_batch(
    series: &WindSeries,
    index: usize,
    schema: &Schema,
) -> Result<RecordBatch, IoError> {
    let n = series.n_times();
    let (loc, column) = match (series.locations().get(index), series.column(index)) {
        (Some(loc), Some(column)) => (loc, column),
        _ => {
            return Err(IoError::DimensionMismatch {
                name: "location".to_string(),
                expected: series.n_locations(),
                got: index + 1,
            });
        }
    };
    let id = u32::try_from(index).map_err(|e| IoError::Parquet {
        reason: format!("location index {index}: {e}"),
    })?;

    let times: Vec<i64> = series
        .times()
        .iter()
        .map(|t| t.and_utc().timestamp())
        .collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(times)),
        Arc::new(UInt32Array::from(vec![id; n])),
        Arc::new(Float64Array::from(vec![loc.lon(); n])),
        Arc::new(Float64Array::from(vec![loc.lat(); n])),
        Arc::new(Float64Array::from(column.to_vec())),
    ];

    Ok(RecordBatch::try_new(Arc::new(schema.clone()), columns)?)
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Parquet`] if file creation, batch writing, or file
/// finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: &Schema,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Parquet {
        reason: format!("{}: {e}", path.display()),
    })?;
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeolus_raster::Location;
    use arrow::array::AsArray;
    use arrow::datatypes::{Float64Type, Int64Type, UInt32Type};
    use chrono::NaiveDate;
    use ndarray::array;

    fn series() -> WindSeries {
        let t0 = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let times = vec![t0, t0 + chrono::TimeDelta::hours(1)];
        let locs = vec![
            Location::new(6.0, 50.0).unwrap(),
            Location::new(7.5, 51.0).unwrap(),
        ];
        WindSeries::new(times, locs, array![[1.0, 2.0], [3.0, 4.0]]).unwrap()
    }

    #[test]
    fn schema_columns() {
        let schema = build_schema();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, ["time", "location", "lon", "lat", "wind_speed"]);
    }

    #[test]
    fn batch_for_second_location() {
        let schema = build_schema();
        let batch = location_to_record_batch(&series(), 1, &schema).unwrap();
        assert_eq!(batch.num_rows(), 2);

        let time = batch.column(0).as_primitive::<Int64Type>();
        assert_eq!(time.value(0), 946_684_800);
        assert_eq!(time.value(1), 946_688_400);
        assert_eq!(batch.column(1).as_primitive::<UInt32Type>().value(0), 1);
        assert_eq!(batch.column(2).as_primitive::<Float64Type>().value(1), 7.5);
        let ws = batch.column(4).as_primitive::<Float64Type>();
        assert_eq!((ws.value(0), ws.value(1)), (2.0, 4.0));
    }

    #[test]
    fn location_out_of_range() {
        let schema = build_schema();
        assert!(location_to_record_batch(&series(), 2, &schema).is_err());
    }
}
