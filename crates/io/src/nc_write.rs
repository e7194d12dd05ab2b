//! Writing `time x key` time-series tables to NetCDF.

use std::path::Path;

use chrono::NaiveDateTime;
use ndarray::Array2;
use tracing::info;

use crate::cf_time::TimeAxis;
use crate::error::IoError;
use crate::series::WindSeries;
use crate::validate::ValidationCollector;

/// Per-key metadata values.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValues {
    /// Numeric values, stored as `f64`.
    Float(Vec<f64>),
    /// Text values, stored as NetCDF strings.
    Text(Vec<String>),
}

impl KeyValues {
    fn len(&self) -> usize {
        match self {
            KeyValues::Float(v) => v.len(),
            KeyValues::Text(v) => v.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DataVariable {
    name: String,
    values: Array2<f64>,
    attributes: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
struct KeyVariable {
    name: String,
    values: KeyValues,
    attributes: Vec<(String, String)>,
}

/// A set of `[n_time, n_keys]` variables sharing one time axis, plus
/// optional per-key metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeseriesSet {
    times: Vec<NaiveDateTime>,
    variables: Vec<DataVariable>,
    key_data: Vec<KeyVariable>,
}

fn owned_attributes(attributes: &[(&str, &str)]) -> Vec<(String, String)> {
    attributes
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl TimeseriesSet {
    /// An empty set on the given time axis.
    pub fn new(times: Vec<NaiveDateTime>) -> Self {
        Self {
            times,
            variables: Vec::new(),
            key_data: Vec::new(),
        }
    }

    /// A set holding `series` as variable `name`, with the longitude and
    /// latitude of every location as key data.
    pub fn from_series(name: &str, series: &WindSeries, attributes: &[(&str, &str)]) -> Self {
        let lons = series.locations().iter().map(|l| l.lon()).collect();
        let lats = series.locations().iter().map(|l| l.lat()).collect();
        Self::new(series.times().to_vec())
            .with_variable(name, series.values().to_owned(), attributes)
            .with_key_data("lon", KeyValues::Float(lons), &[("units", "degrees_east")])
            .with_key_data("lat", KeyValues::Float(lats), &[("units", "degrees_north")])
    }

    /// Adds a `[n_time, n_keys]` variable.
    pub fn with_variable(
        mut self,
        name: impl Into<String>,
        values: Array2<f64>,
        attributes: &[(&str, &str)],
    ) -> Self {
        self.variables.push(DataVariable {
            name: name.into(),
            values,
            attributes: owned_attributes(attributes),
        });
        self
    }

    /// Adds a per-key metadata variable.
    pub fn with_key_data(
        mut self,
        name: impl Into<String>,
        values: KeyValues,
        attributes: &[(&str, &str)],
    ) -> Self {
        self.key_data.push(KeyVariable {
            name: name.into(),
            values,
            attributes: owned_attributes(attributes),
        });
        self
    }

    /// Timestamps of the shared time axis.
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Number of keys, taken from the first variable.
    pub fn n_keys(&self) -> Option<usize> {
        self.variables.first().map(|v| v.values.ncols())
    }

    /// Checks that the set can be written.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every problem: no variables,
    /// variables whose shape differs from `[n_time, n_keys]`, key data of the
    /// wrong length, and duplicate or reserved names.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        let Some(n_keys) = self.n_keys() else {
            c.push("no variables to write");
            return c.finish();
        };
        let n_time = self.times.len();
        for v in &self.variables {
            if v.values.dim() != (n_time, n_keys) {
                c.push(format!(
                    "variable '{}' has shape {:?}, expected ({n_time}, {n_keys})",
                    v.name,
                    v.values.dim()
                ));
            }
        }
        for k in &self.key_data {
            if k.values.len() != n_keys {
                c.push(format!(
                    "key data '{}' has {} values, expected {n_keys}",
                    k.name,
                    k.values.len()
                ));
            }
        }
        let names = self
            .variables
            .iter()
            .map(|v| v.name.as_str())
            .chain(self.key_data.iter().map(|k| k.name.as_str()));
        c.check_unique("name", names.clone());
        for name in names {
            if name.is_empty() || name == "time" {
                c.push(format!("variable name '{name}' is reserved"));
            }
        }
        c.finish()
    }
}

/// Time-axis settings for [`store_timeseries`].
#[derive(Debug, Clone)]
pub struct NcWriterConfig {
    /// Units of the `time` variable.
    time_axis: TimeAxis,
    /// Value of the `tz` attribute on `time`.
    tz: String,
}

impl Default for NcWriterConfig {
    fn default() -> Self {
        Self {
            time_axis: TimeAxis::default(),
            tz: "unknown".to_string(),
        }
    }
}

impl NcWriterConfig {
    /// Sets the time axis.
    pub fn with_time_axis(mut self, axis: TimeAxis) -> Self {
        self.time_axis = axis;
        self
    }

    /// Sets the time-zone label.
    pub fn with_tz(mut self, tz: impl Into<String>) -> Self {
        self.tz = tz.into();
        self
    }

    /// The time axis.
    pub fn time_axis(&self) -> TimeAxis {
        self.time_axis
    }
}

/// Write `set` to a new NetCDF-4 file at `path`.
///
/// The file has dimensions `time` and `key`. `time` is stored as `u32`
/// offsets in the configured unit with `units` and `tz` attributes; each
/// variable is `f64 (time, key)`; key data are `(key)` variables.
///
/// # Errors
///
/// Returns [`IoError::Validation`] for an inconsistent set,
/// [`IoError::InvalidTime`] for timestamps not representable on the axis,
/// or [`IoError::Netcdf`] if writing fails.
pub fn store_timeseries(
    path: &Path,
    set: &TimeseriesSet,
    config: &NcWriterConfig,
) -> Result<(), IoError> {
    set.validate()?;
    let n_keys = set.n_keys().unwrap_or(0);
    let axis = config.time_axis;
    let offsets = set
        .times
        .iter()
        .map(|&t| axis.to_offset_u32(t))
        .collect::<Result<Vec<_>, _>>()?;

    let mut file = netcdf::create(path)?;
    file.add_dimension("time", set.times.len())?;
    file.add_dimension("key", n_keys)?;

    {
        let mut var = file.add_variable::<u32>("time", &["time"])?;
        var.put_attribute("units", axis.to_string())?;
        var.put_attribute("tz", config.tz.as_str())?;
        var.put_values(&offsets, ..)?;
    }

    for v in &set.variables {
        let mut var = file.add_variable::<f64>(&v.name, &["time", "key"])?;
        for (k, val) in &v.attributes {
            var.put_attribute(k, val.as_str())?;
        }
        let data: Vec<f64> = v.values.iter().copied().collect();
        var.put_values(&data, ..)?;
    }

    for k in &set.key_data {
        match &k.values {
            KeyValues::Float(values) => {
                let mut var = file.add_variable::<f64>(&k.name, &["key"])?;
                for (a, val) in &k.attributes {
                    var.put_attribute(a, val.as_str())?;
                }
                var.put_values(values, ..)?;
            }
            KeyValues::Text(values) => {
                let mut var = file.add_string_variable(&k.name, &["key"])?;
                for (a, val) in &k.attributes {
                    var.put_attribute(a, val.as_str())?;
                }
                for (i, s) in values.iter().enumerate() {
                    var.put_string(s, [i])?;
                }
            }
        }
    }

    info!(
        path = %path.display(),
        n_time = set.times.len(),
        n_keys,
        n_variables = set.variables.len(),
        "stored time series"
    );
    Ok(())
}
