#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Field planting map queries.
//!
//! The field map addresses every planted position by field, parcel, row,
//! and position. [`FieldIndex`] answers the drill-down queries a picker
//! needs (which fields exist, which parcels a field has, and so on) plus
//! exact point lookups, all over the cached snapshot held by
//! [`DataCache`]. The underlying pure functions live in [`query`] and
//! work on any record slice.

pub mod query;

use std::sync::Arc;

use peony_identifier_data::{DataCache, DataLoadError};
use peony_identifier_field_models::FieldRecord;

/// Read-only view over the cached field planting map.
#[derive(Debug, Clone)]
pub struct FieldIndex {
    cache: Arc<DataCache>,
}

impl FieldIndex {
    #[must_use]
    pub const fn new(cache: Arc<DataCache>) -> Self {
        Self { cache }
    }

    /// The full snapshot, in load order.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the field data cannot be loaded.
    pub async fn all_records(&self) -> Result<Arc<[FieldRecord]>, DataLoadError> {
        self.cache.field_records().await
    }

    /// Distinct field identifiers, lexicographically sorted.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the field data cannot be loaded.
    pub async fn distinct_fields(&self) -> Result<Vec<String>, DataLoadError> {
        let records = self.all_records().await?;
        Ok(query::distinct_fields(&records))
    }

    /// Distinct parcels of `field`, lexicographically sorted.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the field data cannot be loaded.
    pub async fn distinct_parcels(&self, field: &str) -> Result<Vec<String>, DataLoadError> {
        let records = self.all_records().await?;
        Ok(query::distinct_parcels(&records, field))
    }

    /// Distinct rows of a parcel, in numeric order.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the field data cannot be loaded.
    pub async fn distinct_rows(
        &self,
        field: &str,
        parcel: &str,
    ) -> Result<Vec<String>, DataLoadError> {
        let records = self.all_records().await?;
        Ok(query::distinct_rows(&records, field, parcel))
    }

    /// Distinct positions of a row, in numeric order.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the field data cannot be loaded.
    pub async fn distinct_positions(
        &self,
        field: &str,
        parcel: &str,
        row: &str,
    ) -> Result<Vec<String>, DataLoadError> {
        let records = self.all_records().await?;
        Ok(query::distinct_positions(&records, field, parcel, row))
    }

    /// The record planted at an exact address, if any. Duplicate addresses
    /// resolve to the first record in load order.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the field data cannot be loaded.
    pub async fn record_at(
        &self,
        field: &str,
        parcel: &str,
        row: &str,
        position: &str,
    ) -> Result<Option<FieldRecord>, DataLoadError> {
        let records = self.all_records().await?;
        let found = query::record_at(&records, field, parcel, row, position).cloned();

        if found.is_none() {
            log::debug!("No planting at {field}/{parcel}/{row}/{position}");
        }

        Ok(found)
    }

    /// Every record of a row, in numeric position order.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the field data cannot be loaded.
    pub async fn row_records(
        &self,
        field: &str,
        parcel: &str,
        row: &str,
    ) -> Result<Vec<FieldRecord>, DataLoadError> {
        let records = self.all_records().await?;
        Ok(query::row_records(&records, field, parcel, row))
    }

    /// Every record of a field, in load order.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the field data cannot be loaded.
    pub async fn field_records(&self, field: &str) -> Result<Vec<FieldRecord>, DataLoadError> {
        let records = self.all_records().await?;
        Ok(query::field_records(&records, field))
    }

    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cache.is_field_data_cached()
    }
}
