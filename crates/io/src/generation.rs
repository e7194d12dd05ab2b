//! Reading tabulated renewable generation profiles.
//!
//! A generation file holds hourly output for a set of installed capacities:
//! a `time` axis, a `total_capacity` axis, `generation(time, capacity)` and
//! optionally `total_cost(capacity)`. Profiles for capacities between two
//! tabulated ones are interpolated linearly.

use std::path::Path;

use chrono::NaiveDateTime;
use ndarray::Array2;
use tracing::{debug, info};

use crate::error::IoError;
use crate::netcdf_read;
use crate::validate::ValidationCollector;

const TIME_VAR: &str = "time";
const CAPACITY_VAR: &str = "total_capacity";
const GENERATION_VAR: &str = "generation";
const COST_VAR: &str = "total_cost";

/// Generation profiles for a list of requested capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationProfile {
    times: Vec<NaiveDateTime>,
    capacities: Vec<f64>,
    /// `[n_time, n_capacities]`.
    generation: Array2<f64>,
    capex: Option<Vec<f64>>,
    generation_unit: Option<String>,
    capacity_unit: Option<String>,
    capex_unit: Option<String>,
    region: Option<String>,
    technology: Option<String>,
}

impl GenerationProfile {
    /// Timestamps of the profile.
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Requested capacities, in request order.
    pub fn capacities(&self) -> &[f64] {
        &self.capacities
    }

    /// Generation, one column per requested capacity.
    pub fn generation(&self) -> &Array2<f64> {
        &self.generation
    }

    /// Total capital cost per requested capacity, if the file has costs.
    pub fn capex(&self) -> Option<&[f64]> {
        self.capex.as_deref()
    }

    /// `unit` attribute of `generation`.
    pub fn generation_unit(&self) -> Option<&str> {
        self.generation_unit.as_deref()
    }

    /// `unit` attribute of `total_capacity`.
    pub fn capacity_unit(&self) -> Option<&str> {
        self.capacity_unit.as_deref()
    }

    /// `unit` attribute of `total_cost`.
    pub fn capex_unit(&self) -> Option<&str> {
        self.capex_unit.as_deref()
    }

    /// `region` attribute of `generation`.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// `technology` attribute of `generation`.
    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }
}

/// Where a requested capacity falls on the tabulated axis.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bracket {
    Exact(usize),
    Between { low: usize, high: usize, factor: f64 },
}

impl Bracket {
    fn apply(self, values: impl Fn(usize) -> f64) -> f64 {
        match self {
            Bracket::Exact(i) => values(i),
            Bracket::Between { low, high, factor } => {
                let lo = values(low);
                lo + factor * (values(high) - lo)
            }
        }
    }
}

fn bracket(tabulated: &[f64], capacity: f64) -> Result<Bracket, IoError> {
    let (min, max) = match (tabulated.first(), tabulated.last()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => {
            return Err(IoError::DimensionMismatch {
                name: CAPACITY_VAR.to_string(),
                expected: 1,
                got: 0,
            });
        }
    };
    // Comparisons against a masked (NaN) bound are all false.
    if [capacity, min, max].iter().any(|v| v.is_nan()) || capacity < min || capacity > max {
        return Err(IoError::CapacityOutOfRange { capacity, min, max });
    }
    let high = tabulated.partition_point(|&c| c < capacity);
    if tabulated[high] == capacity {
        return Ok(Bracket::Exact(high));
    }
    let low = high - 1;
    let factor = (capacity - tabulated[low]) / (tabulated[high] - tabulated[low]);
    Ok(Bracket::Between { low, high, factor })
}

fn check_increasing(tabulated: &[f64]) -> Result<(), IoError> {
    let mut c = ValidationCollector::new();
    for (i, v) in tabulated.iter().enumerate() {
        if v.is_nan() {
            c.push(format!("{CAPACITY_VAR}[{i}] is missing"));
        }
    }
    for (i, w) in tabulated.windows(2).enumerate() {
        if w[1] <= w[0] {
            c.push(format!(
                "{CAPACITY_VAR} must be strictly increasing: [{i}] = {} then {}",
                w[0], w[1]
            ));
        }
    }
    c.finish()
}

/// Read the generation file at `path` and resolve a profile for each of
/// `capacities`.
///
/// Each capacity takes the exact tabulated column when present, otherwise
/// the linear interpolation between the bracketing columns. Capital cost is
/// interpolated the same way.
///
/// # Errors
///
/// Returns [`IoError::CapacityOutOfRange`] for a capacity outside the
/// tabulated range, [`IoError::DimensionMismatch`] if `generation` is not
/// `time x total_capacity`, [`IoError::Validation`] if the capacity axis is
/// not strictly increasing, or any NetCDF/time error from reading the file.
pub fn read_generation(path: &Path, capacities: &[f64]) -> Result<GenerationProfile, IoError> {
    let file = netcdf_read::open_file(path)?;

    let offsets = netcdf_read::read_1d_f64(&file, &[TIME_VAR], path)?;
    let times = netcdf_read::read_time_axis(&file, TIME_VAR, path)?.to_datetimes(&offsets)?;
    let tabulated = netcdf_read::read_1d_f64(&file, &[CAPACITY_VAR], path)?;
    check_increasing(&tabulated)?;

    let (data, shape, _) = netcdf_read::read_nd_f64(&file, GENERATION_VAR, path)?;
    let expected = [times.len(), tabulated.len()];
    if shape.len() != 2 {
        return Err(IoError::DimensionMismatch {
            name: format!("{GENERATION_VAR} rank"),
            expected: 2,
            got: shape.len(),
        });
    }
    for (axis, (&got, &want)) in [TIME_VAR, CAPACITY_VAR]
        .iter()
        .zip(shape.iter().zip(expected.iter()))
    {
        if got != want {
            return Err(IoError::DimensionMismatch {
                name: (*axis).to_string(),
                expected: want,
                got,
            });
        }
    }
    let ncap = tabulated.len();

    let cost = match file.variable(COST_VAR) {
        Some(_) => Some(netcdf_read::read_1d_f64(&file, &[COST_VAR], path)?),
        None => None,
    };
    if let Some(cost) = &cost {
        if cost.len() != ncap {
            return Err(IoError::DimensionMismatch {
                name: COST_VAR.to_string(),
                expected: ncap,
                got: cost.len(),
            });
        }
    }

    let brackets = capacities
        .iter()
        .map(|&c| bracket(&tabulated, c))
        .collect::<Result<Vec<_>, _>>()?;

    let mut generation = Array2::zeros((times.len(), capacities.len()));
    for (j, (b, cap)) in brackets.iter().zip(capacities).enumerate() {
        debug!(capacity = cap, bracket = ?b, "resolved capacity");
        for t in 0..times.len() {
            generation[[t, j]] = b.apply(|k| data[t * ncap + k]);
        }
    }
    let capex = cost
        .as_ref()
        .map(|cost| brackets.iter().map(|b| b.apply(|k| cost[k])).collect());

    let attr = |var: &str, name: &str| {
        file.variable(var)
            .and_then(|v| netcdf_read::string_attribute(&v, name))
    };

    info!(
        path = %path.display(),
        n_time = times.len(),
        n_tabulated = ncap,
        n_requested = capacities.len(),
        "read generation profiles"
    );

    Ok(GenerationProfile {
        generation_unit: attr(GENERATION_VAR, "unit"),
        capacity_unit: attr(CAPACITY_VAR, "unit"),
        capex_unit: attr(COST_VAR, "unit"),
        region: attr(GENERATION_VAR, "region"),
        technology: attr(GENERATION_VAR, "technology"),
        times,
        capacities: capacities.to_vec(),
        generation,
        capex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CAPS: [f64; 3] = [10.0, 20.0, 40.0];

    #[test]
    fn exact_capacity() {
        assert_eq!(bracket(&CAPS, 20.0).unwrap(), Bracket::Exact(1));
        assert_eq!(bracket(&CAPS, 10.0).unwrap(), Bracket::Exact(0));
        assert_eq!(bracket(&CAPS, 40.0).unwrap(), Bracket::Exact(2));
    }

    #[test]
    fn between_capacities() {
        match bracket(&CAPS, 25.0).unwrap() {
            Bracket::Between { low, high, factor } => {
                assert_eq!((low, high), (1, 2));
                assert_relative_eq!(factor, 0.25);
            }
            other => panic!("expected Between, got {other:?}"),
        }
    }

    #[test]
    fn apply_interpolates() {
        let b = Bracket::Between {
            low: 0,
            high: 1,
            factor: 0.5,
        };
        let v = [2.0, 6.0];
        assert_relative_eq!(b.apply(|k| v[k]), 4.0);
    }

    #[test]
    fn out_of_range() {
        for cap in [5.0, 41.0, f64::NAN] {
            assert!(matches!(
                bracket(&CAPS, cap),
                Err(IoError::CapacityOutOfRange { min, max, .. }) if min == 10.0 && max == 40.0
            ));
        }
    }

    #[test]
    fn non_increasing_axis_rejected() {
        let err = check_increasing(&[10.0, 30.0, 20.0, 20.0]).unwrap_err();
        assert!(matches!(err, IoError::Validation { count: 2, .. }));
    }

    #[test]
    fn masked_single_capacity() {
        assert!(matches!(
            bracket(&[f64::NAN], 10.0),
            Err(IoError::CapacityOutOfRange { .. })
        ));
        let err = check_increasing(&[f64::NAN]).unwrap_err();
        assert!(matches!(err, IoError::Validation { count: 1, .. }));
    }
}
