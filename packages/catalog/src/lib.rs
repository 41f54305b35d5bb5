#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference cultivar catalog lookups.
//!
//! The catalog holds a few hundred registered cultivars. Lookups are plain
//! linear scans over the cached snapshot: exact (case-insensitive) name
//! match, fuzzy name match ranked by
//! [`peony_identifier_similarity::similarity`], and point lookup by id.

use std::sync::Arc;

use peony_identifier_catalog_models::CultivarRecord;
use peony_identifier_data::{DataCache, DataLoadError};
use peony_identifier_similarity::rank_by_similarity;

/// Minimum similarity for a fuzzy catalog match unless the caller says
/// otherwise.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.7;

/// Fuzzy lookups never return more than this many records.
pub const MAX_FUZZY_RESULTS: usize = 10;

/// First record whose name equals `name`, ignoring case.
#[must_use]
pub fn find_by_name<'a>(records: &'a [CultivarRecord], name: &str) -> Option<&'a CultivarRecord> {
    let wanted = name.to_lowercase();
    records
        .iter()
        .find(|c| c.cultivar_name.to_lowercase() == wanted)
}

/// Records scoring at least `threshold` against `name`, best first, capped
/// at [`MAX_FUZZY_RESULTS`]. Equal scores keep catalog order.
#[must_use]
pub fn rank_fuzzy<'a>(
    records: &'a [CultivarRecord],
    name: &str,
    threshold: f64,
) -> Vec<(&'a CultivarRecord, f64)> {
    let mut ranked = rank_by_similarity(
        name,
        records,
        |c| Some(c.cultivar_name.as_str()),
        threshold,
    );
    ranked.truncate(MAX_FUZZY_RESULTS);
    ranked
}

#[must_use]
pub fn find_by_id(records: &[CultivarRecord], id: u32) -> Option<&CultivarRecord> {
    records.iter().find(|c| c.id == id)
}

/// Read-only view over the cached cultivar catalog.
#[derive(Debug, Clone)]
pub struct CultivarCatalog {
    cache: Arc<DataCache>,
}

impl CultivarCatalog {
    #[must_use]
    pub const fn new(cache: Arc<DataCache>) -> Self {
        Self { cache }
    }

    /// Every catalog record, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the catalog cannot be loaded.
    pub async fn get_all(&self) -> Result<Arc<[CultivarRecord]>, DataLoadError> {
        self.cache.cultivar_records().await
    }

    /// Case-insensitive exact name lookup.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the catalog cannot be loaded.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<CultivarRecord>, DataLoadError> {
        let records = self.get_all().await?;
        Ok(find_by_name(&records, name).cloned())
    }

    /// Fuzzy name lookup, best match first, at most [`MAX_FUZZY_RESULTS`].
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the catalog cannot be loaded.
    pub async fn find_fuzzy(
        &self,
        name: &str,
        threshold: f64,
    ) -> Result<Vec<CultivarRecord>, DataLoadError> {
        Ok(self
            .find_fuzzy_scored(name, threshold)
            .await?
            .into_iter()
            .map(|(record, _)| record)
            .collect())
    }

    /// Same as [`Self::find_fuzzy`], keeping each record's score.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the catalog cannot be loaded.
    pub async fn find_fuzzy_scored(
        &self,
        name: &str,
        threshold: f64,
    ) -> Result<Vec<(CultivarRecord, f64)>, DataLoadError> {
        let records = self.get_all().await?;
        let ranked: Vec<(CultivarRecord, f64)> = rank_fuzzy(&records, name, threshold)
            .into_iter()
            .map(|(record, score)| (record.clone(), score))
            .collect();

        log::debug!(
            "Fuzzy catalog lookup for {name:?} at {threshold}: {} match(es)",
            ranked.len()
        );

        Ok(ranked)
    }

    /// Point lookup by catalog id.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the catalog cannot be loaded.
    pub async fn find_by_id(&self, id: u32) -> Result<Option<CultivarRecord>, DataLoadError> {
        let records = self.get_all().await?;
        Ok(find_by_id(&records, id).cloned())
    }

    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cache.is_catalog_data_cached()
    }
}
