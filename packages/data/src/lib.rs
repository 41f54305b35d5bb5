#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset loading and caching for the peony identifier.
//!
//! Two static datasets back every query: the field planting map and the
//! reference cultivar catalog. A [`DataSource`] knows how to read and
//! parse them; a [`DataCache`] sits in front of it and guarantees each
//! dataset is parsed at most once, even when many callers hit a cold
//! cache at the same time.
//!
//! # Usage
//!
//! ```rust,no_run
//! # async fn example() -> Result<(), peony_identifier_data::DataLoadError> {
//! use std::sync::Arc;
//! use peony_identifier_data::{DataCache, DataConfig, JsonFileSource};
//!
//! let source = JsonFileSource::new(DataConfig::from_env());
//! let cache = Arc::new(DataCache::new(Arc::new(source)));
//! cache.spawn_preload();
//!
//! let records = cache.field_records().await?;
//! println!("{} planted positions", records.len());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod paths;
pub mod source;

use std::path::PathBuf;

pub use cache::DataCache;
pub use config::DataConfig;
pub use source::{
    DataSource, JsonFileSource, MemorySource, parse_cultivar_records, parse_field_records,
};

/// Errors raised while reading or parsing a dataset.
///
/// A load failure is fatal to the request that triggered it. Nothing is
/// cached on failure, so the next request performs a fresh load.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The data file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The data file is not a JSON array of the expected records.
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The configuration file is invalid.
    #[error("Config error: {0}")]
    Config(String),

    /// A background parse task was aborted.
    #[error("Task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_file() {
        let error = DataLoadError::Io {
            path: PathBuf::from("data/fields.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let display = error.to_string();
        assert!(display.contains("data/fields.json"));
        assert!(display.contains("missing"));
    }

    #[test]
    fn parse_error_names_the_file() {
        let source = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let error = DataLoadError::Parse {
            path: PathBuf::from("cultivars.json"),
            source,
        };
        assert!(error.to_string().starts_with("Failed to parse cultivars.json"));
    }
}
