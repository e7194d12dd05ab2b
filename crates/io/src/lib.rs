//! # aeolus-io
//!
//! Load hourly wind fields from NetCDF weather-model output, write projected
//! series back out as NetCDF time-series tables or long-format Parquet, and
//! read tabulated generation profiles.

mod cf_time;
mod error;
mod generation;
mod nc_write;
mod netcdf_read;
mod parquet_write;
mod series;
mod source;
mod validate;
mod writer;

pub use cf_time::{TimeAxis, TimeUnit};
pub use error::IoError;
pub use generation::{GenerationProfile, read_generation};
pub use nc_write::{KeyValues, NcWriterConfig, TimeseriesSet, store_timeseries};
pub use series::WindSeries;
pub use source::{SourceConfig, WeatherSource, WindVariables};
pub use writer::{Compression, WriterConfig, write_parquet};
