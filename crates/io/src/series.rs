//! Wind-speed time series at a set of locations.

use aeolus_calendar::leap_day_mask;
use aeolus_raster::Location;
use chrono::NaiveDateTime;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::error::IoError;

/// Wind speeds `[n_time, n_locations]` with their timestamps and locations.
#[derive(Debug, Clone, PartialEq)]
pub struct WindSeries {
    times: Vec<NaiveDateTime>,
    locations: Vec<Location>,
    values: Array2<f64>,
}

impl WindSeries {
    /// Creates a series, checking that `values` has one row per timestamp
    /// and one column per location.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if the shapes disagree.
    pub fn new(
        times: Vec<NaiveDateTime>,
        locations: Vec<Location>,
        values: Array2<f64>,
    ) -> Result<Self, IoError> {
        let (rows, cols) = values.dim();
        if rows != times.len() {
            return Err(IoError::DimensionMismatch {
                name: "time".to_string(),
                expected: times.len(),
                got: rows,
            });
        }
        if cols != locations.len() {
            return Err(IoError::DimensionMismatch {
                name: "location".to_string(),
                expected: locations.len(),
                got: cols,
            });
        }
        Ok(Self {
            times,
            locations,
            values,
        })
    }

    /// Timestamps, one per row.
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Locations, one per column.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// The wind-speed matrix.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Wind speeds of location `index`.
    pub fn column(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.n_locations()).then(|| self.values.column(index))
    }

    /// Number of timestamps.
    pub fn n_times(&self) -> usize {
        self.times.len()
    }

    /// Number of locations.
    pub fn n_locations(&self) -> usize {
        self.locations.len()
    }

    /// Consumes the series, returning the wind-speed matrix.
    pub fn into_values(self) -> Array2<f64> {
        self.values
    }

    /// Replaces the wind speeds, keeping timestamps and locations.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DimensionMismatch`] if `values` has a different
    /// shape.
    pub fn with_values(self, values: Array2<f64>) -> Result<Self, IoError> {
        Self::new(self.times, self.locations, values)
    }

    /// Drops every row whose timestamp falls on February 29.
    pub fn without_leap_days(&self) -> Self {
        let keep: Vec<usize> = leap_day_mask(&self.times)
            .iter()
            .enumerate()
            .filter(|(_, leap)| !**leap)
            .map(|(i, _)| i)
            .collect();
        Self {
            times: keep.iter().map(|&i| self.times[i]).collect(),
            locations: self.locations.clone(),
            values: self.values.select(Axis(0), &keep),
        }
    }
}
