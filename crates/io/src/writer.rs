//! Parquet output for wind series.

use std::path::Path;
use std::str::FromStr;

use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::error::IoError;
use crate::parquet_write;
use crate::series::WindSeries;

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level =
                    parquet::basic::ZstdLevel::try_new(3).map_err(|e| IoError::Parquet {
                        reason: e.to_string(),
                    })?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

impl FromStr for Compression {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "uncompressed" => Ok(Self::None),
            "snappy" => Ok(Self::Snappy),
            "zstd" => Ok(Self::Zstd),
            other => Err(IoError::Validation {
                count: 1,
                details: format!("unknown compression '{other}'; expected none, snappy or zstd"),
            }),
        }
    }
}

/// Parquet writer settings.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Compression algorithm to use.
    compression: Compression,
    /// Maximum number of rows per row group.
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Sets the compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the maximum number of rows per row group.
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` is zero.
    fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Write `series` to a Parquet file in long format.
///
/// Columns are `time` (seconds since the Unix epoch), `location` (column
/// index in the series), `lon`, `lat` and `wind_speed`. Rows are grouped by
/// location, each location's rows in time order.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the configuration is invalid, or
/// [`IoError::Parquet`] if batch conversion or file I/O fails.
pub fn write_parquet(path: &Path, series: &WindSeries, config: &WriterConfig) -> Result<(), IoError> {
    config.validate()?;

    let schema = parquet_write::build_schema();

    let compression = config.compression.to_parquet()?;
    let props = WriterProperties::builder()
        .set_compression(compression)
        .set_max_row_group_size(config.row_group_size)
        .build();

    let batches: Vec<_> = (0..series.n_locations())
        .map(|i| parquet_write::location_to_record_batch(series, i, &schema))
        .collect::<Result<Vec<_>, _>>()?;

    parquet_write::write_batches(path, &batches, &schema, props)?;

    info!(
        path = %path.display(),
        rows = series.n_times() * series.n_locations(),
        compression = ?config.compression,
        "wrote parquet"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = WriterConfig::default();
        assert_eq!(config.compression, Compression::Snappy);
        assert_eq!(config.row_group_size, 1_000_000);
    }

    #[test]
    fn builder_methods() {
        let config = WriterConfig::default()
            .with_compression(Compression::Zstd)
            .with_row_group_size(500);
        assert_eq!(config.compression, Compression::Zstd);
        assert_eq!(config.row_group_size, 500);
    }

    #[test]
    fn validate_ok() {
        let config = WriterConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_zero_row_group_size() {
        let config = WriterConfig::default().with_row_group_size(0);
        assert!(matches!(
            config.validate(),
            Err(IoError::Validation { count: 1, .. })
        ));
    }

    #[test]
    fn compression_from_str() {
        assert_eq!("ZSTD".parse::<Compression>().unwrap(), Compression::Zstd);
        assert_eq!("none".parse::<Compression>().unwrap(), Compression::None);
        assert!("lz4".parse::<Compression>().is_err());
    }

    #[test]
    fn zstd_maps_to_level_three() {
        let c = Compression::Zstd.to_parquet().unwrap();
        assert_eq!(
            c,
            parquet::basic::Compression::ZSTD(parquet::basic::ZstdLevel::try_new(3).unwrap())
        );
    }
}
