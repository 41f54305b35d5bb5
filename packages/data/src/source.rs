//! Dataset sources.
//!
//! Both datasets are JSON arrays of flat objects. [`JsonFileSource`]
//! reads them from disk; any other backing store (embedded resources, a
//! test double) implements [`DataSource`] directly.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use peony_identifier_catalog_models::CultivarRecord;
use peony_identifier_field_models::FieldRecord;
use serde::de::DeserializeOwned;

use crate::{DataConfig, DataLoadError};

/// Loads the two static datasets.
///
/// Implementations are called at most once per dataset per cache
/// generation by [`crate::DataCache`], so they do not need to cache.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Loads every field planting record, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the data cannot be read or parsed.
    async fn load_field_records(&self) -> Result<Vec<FieldRecord>, DataLoadError>;

    /// Loads every catalog record, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the data cannot be read or parsed.
    async fn load_cultivar_records(&self) -> Result<Vec<CultivarRecord>, DataLoadError>;
}

/// Parses a field planting map from JSON text.
///
/// # Errors
///
/// Returns the JSON error if the text is not an array of field records.
pub fn parse_field_records(json: &str) -> Result<Vec<FieldRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses a cultivar catalog from JSON text.
///
/// # Errors
///
/// Returns the JSON error if the text is not an array of catalog records.
pub fn parse_cultivar_records(json: &str) -> Result<Vec<CultivarRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads datasets from JSON files on disk.
///
/// Multiple field files are concatenated in configuration order. A failure
/// on any one of them fails the whole field load.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    config: DataConfig,
}

impl JsonFileSource {
    /// Creates a source reading the files named in `config`.
    #[must_use]
    pub const fn new(config: DataConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this source reads from.
    #[must_use]
    pub const fn config(&self) -> &DataConfig {
        &self.config
    }
}

#[async_trait]
impl DataSource for JsonFileSource {
    async fn load_field_records(&self) -> Result<Vec<FieldRecord>, DataLoadError> {
        let mut records = Vec::new();
        for path in &self.config.field_paths {
            let entries: Vec<FieldRecord> = read_json_array(path).await?;
            log::debug!("Read {} field records from {}", entries.len(), path.display());
            records.extend(entries);
        }
        Ok(records)
    }

    async fn load_cultivar_records(&self) -> Result<Vec<CultivarRecord>, DataLoadError> {
        let path = &self.config.catalog_path;
        let records: Vec<CultivarRecord> = read_json_array(path).await?;
        log::debug!("Read {} catalog records from {}", records.len(), path.display());
        Ok(records)
    }
}

/// Serves datasets already held in memory (embedded resources, fixtures).
///
/// Counts how many times each dataset was requested, which makes cache
/// behavior observable from the outside.
#[derive(Debug, Default)]
pub struct MemorySource {
    fields: Vec<FieldRecord>,
    cultivars: Vec<CultivarRecord>,
    field_loads: AtomicUsize,
    cultivar_loads: AtomicUsize,
}

impl MemorySource {
    /// Creates a source over the given records.
    #[must_use]
    pub const fn new(fields: Vec<FieldRecord>, cultivars: Vec<CultivarRecord>) -> Self {
        Self {
            fields,
            cultivars,
            field_loads: AtomicUsize::new(0),
            cultivar_loads: AtomicUsize::new(0),
        }
    }

    /// Number of field loads served so far.
    #[must_use]
    pub fn field_load_count(&self) -> usize {
        self.field_loads.load(Ordering::SeqCst)
    }

    /// Number of catalog loads served so far.
    #[must_use]
    pub fn cultivar_load_count(&self) -> usize {
        self.cultivar_loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn load_field_records(&self) -> Result<Vec<FieldRecord>, DataLoadError> {
        self.field_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.fields.clone())
    }

    async fn load_cultivar_records(&self) -> Result<Vec<CultivarRecord>, DataLoadError> {
        self.cultivar_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.cultivars.clone())
    }
}

/// Reads a file and parses it as a JSON array on the blocking pool.
async fn read_json_array<T>(path: &Path) -> Result<Vec<T>, DataLoadError>
where
    T: DeserializeOwned + Send + 'static,
{
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let path: PathBuf = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        serde_json::from_slice(&bytes).map_err(|source| DataLoadError::Parse { path, source })
    })
    .await?
}
