//! Single-flight dataset cache.
//!
//! Each dataset sits behind its own async mutex wrapping an optional
//! snapshot. The first caller to take the lock on a cold slot performs the
//! load while every other caller waits on the lock and then reads the
//! populated slot. The two datasets have independent locks, so loading one
//! never blocks the other.
//!
//! A load that fails, or whose future is dropped mid-flight, leaves the
//! slot empty and releases the lock; the next caller retries.

use std::future::Future;
use std::sync::Arc;

use peony_identifier_catalog_models::CultivarRecord;
use peony_identifier_field_models::FieldRecord;
use tokio::sync::Mutex;

use crate::{DataLoadError, DataSource};

/// A lazily loaded, immutable dataset snapshot.
struct CacheSlot<T> {
    name: &'static str,
    records: Mutex<Option<Arc<[T]>>>,
}

impl<T> CacheSlot<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            records: Mutex::new(None),
        }
    }

    async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<[T]>, DataLoadError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, DataLoadError>>,
    {
        let mut slot = self.records.lock().await;

        if let Some(records) = slot.as_ref() {
            log::trace!("Serving {} {} records from cache", records.len(), self.name);
            return Ok(Arc::clone(records));
        }

        log::debug!("Loading {} records...", self.name);
        let records: Arc<[T]> = load().await?.into();
        log::info!("Loaded {} {} records", records.len(), self.name);

        *slot = Some(Arc::clone(&records));
        Ok(records)
    }

    async fn clear(&self) {
        *self.records.lock().await = None;
    }

    /// Returns `false` while a load is in flight.
    fn is_cached(&self) -> bool {
        self.records
            .try_lock()
            .is_ok_and(|slot| slot.is_some())
    }
}

/// Process-lifetime cache over a [`DataSource`].
pub struct DataCache {
    source: Arc<dyn DataSource>,
    fields: CacheSlot<FieldRecord>,
    cultivars: CacheSlot<CultivarRecord>,
}

impl DataCache {
    /// Creates an empty cache in front of `source`.
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            fields: CacheSlot::new("field"),
            cultivars: CacheSlot::new("catalog"),
        }
    }

    /// Returns the field planting records, loading them on first access.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the source fails to load.
    pub async fn field_records(&self) -> Result<Arc<[FieldRecord]>, DataLoadError> {
        self.fields
            .get_or_load(|| self.source.load_field_records())
            .await
    }

    /// Returns the catalog records, loading them on first access.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the source fails to load.
    pub async fn cultivar_records(&self) -> Result<Arc<[CultivarRecord]>, DataLoadError> {
        self.cultivars
            .get_or_load(|| self.source.load_cultivar_records())
            .await
    }

    /// Warms both datasets concurrently.
    ///
    /// Failures are logged and swallowed; the same data is loaded on
    /// demand at first real use.
    pub async fn preload_all(&self) {
        let (fields, cultivars) = tokio::join!(self.field_records(), self.cultivar_records());

        if let Err(e) = fields {
            log::warn!("Background preload of field data failed: {e}");
        }
        if let Err(e) = cultivars {
            log::warn!("Background preload of catalog data failed: {e}");
        }
    }

    /// Spawns one fire-and-forget task per dataset to warm the cache.
    ///
    /// Does nothing (beyond a warning) when called outside a tokio
    /// runtime.
    pub fn spawn_preload(self: &Arc<Self>) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            log::warn!("No async runtime available, skipping background preload");
            return;
        };

        let cache = Arc::clone(self);
        handle.spawn(async move {
            if let Err(e) = cache.field_records().await {
                log::warn!("Background preload of field data failed: {e}");
            }
        });

        let cache = Arc::clone(self);
        handle.spawn(async move {
            if let Err(e) = cache.cultivar_records().await {
                log::warn!("Background preload of catalog data failed: {e}");
            }
        });
    }

    /// Drops both cached snapshots. The next read reloads from the source.
    pub async fn clear_cache(&self) {
        self.cultivars.clear().await;
        self.fields.clear().await;
        log::debug!("Dataset cache cleared");
    }

    /// Returns `true` if the field records are loaded.
    #[must_use]
    pub fn is_field_data_cached(&self) -> bool {
        self.fields.is_cached()
    }

    /// Returns `true` if the catalog records are loaded.
    #[must_use]
    pub fn is_catalog_data_cached(&self) -> bool {
        self.cultivars.is_cached()
    }
}

impl std::fmt::Debug for DataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataCache")
            .field("field_data_cached", &self.is_field_data_cached())
            .field("catalog_data_cached", &self.is_catalog_data_cached())
            .finish_non_exhaustive()
    }
}
