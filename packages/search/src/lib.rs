#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location search: where in the fields is a given variety planted?
//!
//! Queries are matched against the variety label as written on the
//! planting map, not against the catalog, so a search for a misspelled
//! label still finds the positions carrying that misspelling.

use std::collections::BTreeSet;

use peony_identifier_data::DataLoadError;
use peony_identifier_field::FieldIndex;
use peony_identifier_field_models::{FieldRecord, LocationMatch};
use peony_identifier_similarity::rank_by_similarity;

/// Minimum similarity between the query and a planted variety label.
///
/// Looser than the catalog's fuzzy default since hand-written planting
/// labels drift further from canonical names.
pub const SEARCH_THRESHOLD: f64 = 0.6;

/// Every record whose variety scores at least [`SEARCH_THRESHOLD`]
/// against `query`, best first. A blank query matches nothing.
#[must_use]
pub fn search_records(records: &[FieldRecord], query: &str) -> Vec<LocationMatch> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    rank_by_similarity(query, records, |r| r.variety.as_deref(), SEARCH_THRESHOLD)
        .into_iter()
        .map(|(record, _)| LocationMatch::from_record(record))
        .collect()
}

/// Distinct non-blank variety labels, sorted.
#[must_use]
pub fn unique_varieties(records: &[FieldRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.variety.as_deref())
        .filter(|v| !v.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Variety search over the field planting map.
#[derive(Debug, Clone)]
pub struct LocationSearch {
    index: FieldIndex,
}

impl LocationSearch {
    #[must_use]
    pub const fn new(index: FieldIndex) -> Self {
        Self { index }
    }

    /// Finds planted positions whose variety resembles `query`.
    ///
    /// Returns an empty list for a blank query without loading any data.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the field data cannot be loaded.
    pub async fn search(&self, query: &str) -> Result<Vec<LocationMatch>, DataLoadError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records = self.index.all_records().await?;
        let matches = search_records(&records, query);

        log::debug!("Location search for {query:?}: {} match(es)", matches.len());

        Ok(matches)
    }

    /// Distinct non-blank variety labels across every field, sorted. Used
    /// for search suggestions.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if the field data cannot be loaded.
    pub async fn all_unique_varieties(&self) -> Result<Vec<String>, DataLoadError> {
        let records = self.index.all_records().await?;
        Ok(unique_varieties(&records))
    }
}
