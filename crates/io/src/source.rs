//! Gridded NetCDF weather sources (MERRA-2-style `time x lat x lon`).

use std::path::{Path, PathBuf};

use aeolus_raster::Location;
use chrono::NaiveDateTime;
use ndarray::Array2;
use tracing::{debug, info};

use crate::error::IoError;
use crate::netcdf_read;
use crate::series::WindSeries;
use crate::validate::ValidationCollector;

/// How wind speed is stored in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindVariables {
    /// Eastward and northward components; speed is `sqrt(u² + v²)`.
    Components {
        /// Eastward component variable.
        u: String,
        /// Northward component variable.
        v: String,
    },
    /// A variable that already holds the wind speed.
    Speed(String),
}

/// Configuration for reading wind speeds from a gridded NetCDF file.
///
/// The [`Default`] implementation matches MERRA-2 single-level diagnostics:
/// 50 m wind components `U50M` and `V50M` on `time x lat x lon`.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// NetCDF variable name for the time axis.
    time_var: String,
    /// Wind variables.
    wind: WindVariables,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            lon_aliases: vec!["lon".into(), "longitude".into(), "x".into()],
            lat_aliases: vec!["lat".into(), "latitude".into(), "y".into()],
            time_var: "time".into(),
            wind: WindVariables::Components {
                u: "U50M".into(),
                v: "V50M".into(),
            },
        }
    }
}

impl SourceConfig {
    /// Set the longitude aliases.
    pub fn with_lon_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lon_aliases = aliases;
        self
    }

    /// Set the latitude aliases.
    pub fn with_lat_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lat_aliases = aliases;
        self
    }

    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Read wind speed from eastward/northward components.
    pub fn with_components(mut self, u: impl Into<String>, v: impl Into<String>) -> Self {
        self.wind = WindVariables::Components {
            u: u.into(),
            v: v.into(),
        };
        self
    }

    /// Read wind speed directly from one variable.
    pub fn with_speed_var(mut self, name: impl Into<String>) -> Self {
        self.wind = WindVariables::Speed(name.into());
        self
    }

    /// The configured wind variables.
    pub fn wind(&self) -> &WindVariables {
        &self.wind
    }

    /// Validate that every name is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every empty name.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        if self.lon_aliases.iter().all(|a| a.is_empty()) {
            c.push("no longitude alias given");
        }
        if self.lat_aliases.iter().all(|a| a.is_empty()) {
            c.push("no latitude alias given");
        }
        if self.time_var.is_empty() {
            c.push("time variable name is empty");
        }
        match &self.wind {
            WindVariables::Components { u, v } => {
                if u.is_empty() || v.is_empty() {
                    c.push("wind component variable name is empty");
                }
            }
            WindVariables::Speed(name) => {
                if name.is_empty() {
                    c.push("wind speed variable name is empty");
                }
            }
        }
        c.finish()
    }
}

/// Wind speed on a regular `time x lat x lon` grid loaded from NetCDF.
#[derive(Debug, Clone)]
pub struct WeatherSource {
    path: PathBuf,
    times: Vec<NaiveDateTime>,
    lons: Vec<f64>,
    lats: Vec<f64>,
    /// Flat `[time, lat, lon]` wind speed.
    speed: Vec<f64>,
}

impl WeatherSource {
    /// Opens `path` and loads the wind-speed field.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`] on missing files or variables, unparsable time
    /// units, or wind variables whose shape is not `time x lat x lon`.
    pub fn open(path: &Path, config: &SourceConfig) -> Result<Self, IoError> {
        config.validate()?;
        let file = netcdf_read::open_file(path)?;

        let lon_refs: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();
        let lat_refs: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();
        let lons = netcdf_read::read_1d_f64(&file, &lon_refs, path)?;
        let lats = netcdf_read::read_1d_f64(&file, &lat_refs, path)?;

        let offsets = netcdf_read::read_1d_f64(&file, &[&config.time_var], path)?;
        let axis = netcdf_read::read_time_axis(&file, &config.time_var, path)?;
        let times = axis.to_datetimes(&offsets)?;

        let expected = [times.len(), lats.len(), lons.len()];
        let speed = match &config.wind {
            WindVariables::Components { u, v } => {
                let u = read_field(&file, u, path, expected)?;
                let v = read_field(&file, v, path, expected)?;
                u.iter().zip(&v).map(|(a, b)| a.hypot(*b)).collect()
            }
            WindVariables::Speed(name) => read_field(&file, name, path, expected)?,
        };

        info!(
            path = %path.display(),
            n_time = times.len(),
            n_lat = lats.len(),
            n_lon = lons.len(),
            "opened weather source"
        );

        Ok(Self {
            path: path.to_path_buf(),
            times,
            lons,
            lats,
            speed,
        })
    }

    /// Path of the source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Timestamps of the time axis.
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Longitude axis (cell centres).
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Latitude axis (cell centres).
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// `(lons, lats)` of the grid.
    pub fn grid(&self) -> (&[f64], &[f64]) {
        (&self.lons, &self.lats)
    }

    /// Grid cell `(lat_index, lon_index)` nearest to `loc`, or `None` if the
    /// location is more than half a cell beyond the grid.
    pub fn cell_of(&self, loc: &Location) -> Option<(usize, usize)> {
        Some((
            nearest_index(&self.lats, loc.lat())?,
            nearest_index(&self.lons, loc.lon())?,
        ))
    }

    /// Wind-speed series at the grid cell nearest to each location.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutsideGrid`] for a location beyond the grid.
    pub fn wind_speed(&self, locs: &[Location]) -> Result<WindSeries, IoError> {
        let (nt, ny, nx) = (self.times.len(), self.lats.len(), self.lons.len());
        let mut values = Array2::zeros((nt, locs.len()));
        for (index, loc) in locs.iter().enumerate() {
            let (yi, xi) = self.cell_of(loc).ok_or(IoError::OutsideGrid {
                index,
                lon: loc.lon(),
                lat: loc.lat(),
            })?;
            debug!(index, %loc, lat_index = yi, lon_index = xi, "matched grid cell");
            for t in 0..nt {
                values[[t, index]] = self.speed[(t * ny + yi) * nx + xi];
            }
        }
        WindSeries::new(self.times.clone(), locs.to_vec(), values)
    }
}

fn read_field(
    file: &netcdf::File,
    name: &str,
    path: &Path,
    expected: [usize; 3],
) -> Result<Vec<f64>, IoError> {
    let (data, shape, _) = netcdf_read::read_nd_f64(file, name, path)?;
    if shape.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{name} dimensions"),
            expected: 3,
            got: shape.len(),
        });
    }
    for (axis, (&got, &want)) in ["time", "lat", "lon"].iter().zip(shape.iter().zip(&expected)) {
        if got != want {
            return Err(IoError::DimensionMismatch {
                name: format!("{name} {axis}"),
                expected: want,
                got,
            });
        }
    }
    Ok(data)
}

/// Index of the axis value nearest to `x`, accepting points up to half a
/// cell beyond the outermost centres. Single-point axes accept anything.
fn nearest_index(axis: &[f64], x: f64) -> Option<usize> {
    let (index, dist) = axis
        .iter()
        .enumerate()
        .map(|(i, &a)| (i, (a - x).abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))?;
    if axis.len() < 2 {
        return Some(index);
    }
    let spacing = (axis[axis.len() - 1] - axis[0]).abs() / (axis.len() - 1) as f64;
    (dist <= spacing / 2.0 + 1e-9).then_some(index)
}
