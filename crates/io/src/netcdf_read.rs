//! Low-level NetCDF extraction helpers.

use std::path::Path;

use netcdf::AttributeValue;

use crate::cf_time::TimeAxis;
use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Look up a variable, trying each alias in order.
///
/// If none match, returns [`IoError::MissingVariable`] with the first alias
/// as the name.
pub(crate) fn find_variable<'f>(
    file: &'f netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<netcdf::Variable<'f>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var);
        }
    }
    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 1-D `f64` variable, trying each alias in order.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    let var = find_variable(file, aliases, path)?;
    read_masked(&var)
}

/// Read a variable of any rank as flat row-major `f64` data together with
/// its shape and dimension names.
pub(crate) fn read_nd_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<f64>, Vec<usize>, Vec<String>), IoError> {
    let var = find_variable(file, &[var_name], path)?;
    let dims = var.dimensions();
    let shape = dims.iter().map(|d| d.len()).collect();
    let names = dims.iter().map(|d| d.name()).collect();
    Ok((read_masked(&var)?, shape, names))
}

/// Reads all values, replacing `_FillValue` and `missing_value` with NaN.
fn read_masked(var: &netcdf::Variable<'_>) -> Result<Vec<f64>, IoError> {
    let mut data = var.get_values::<f64, _>(..)?;
    let fills: Vec<f64> = ["_FillValue", "missing_value"]
        .iter()
        .filter_map(|name| numeric_attribute(var, name))
        .collect();
    if !fills.is_empty() {
        for v in &mut data {
            if fills.contains(v) {
                *v = f64::NAN;
            }
        }
    }
    Ok(data)
}

/// A scalar numeric attribute as `f64`.
pub(crate) fn numeric_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        AttributeValue::Uint(v) => Some(f64::from(v)),
        AttributeValue::Short(v) => Some(f64::from(v)),
        AttributeValue::Ushort(v) => Some(f64::from(v)),
        AttributeValue::Schar(v) => Some(f64::from(v)),
        AttributeValue::Uchar(v) => Some(f64::from(v)),
        _ => None,
    }
}

/// A string attribute, or `None` if absent or not a string.
pub(crate) fn string_attribute(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

/// Read the `units` attribute of a time variable as a [`TimeAxis`].
pub(crate) fn read_time_axis(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<TimeAxis, IoError> {
    let var = find_variable(file, &[time_var], path)?;
    let units = string_attribute(&var, "units").ok_or_else(|| IoError::InvalidTime {
        reason: format!("time variable '{time_var}' has no string 'units' attribute"),
    })?;
    TimeAxis::parse(&units)
}
