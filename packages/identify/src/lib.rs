#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Single entry point for the peony identifier core.
//!
//! [`Identifier`] owns one [`DataCache`] and hands out the field index,
//! cultivar catalog, and location search that share it. Its
//! [`Identifier::identify`] runs the full position identification flow:
//! find the planting at an address, then resolve its variety label against
//! the catalog, exactly first and fuzzily as a fallback.

use std::sync::Arc;

use peony_identifier_catalog::CultivarCatalog;
use peony_identifier_catalog_models::CultivarRecord;
use peony_identifier_data::{DataCache, DataConfig, DataLoadError, DataSource, JsonFileSource};
use peony_identifier_field::FieldIndex;
use peony_identifier_field_models::FieldRecord;
use peony_identifier_search::LocationSearch;
use strum_macros::{AsRefStr, Display};

/// Similarity floor for catalog suggestions when a planted label has no
/// exact catalog match.
pub const FUZZY_IDENTIFY_THRESHOLD: f64 = 0.6;

/// How a planted variety label resolved against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MatchStatus {
    /// The label names a catalog cultivar, ignoring case.
    Exact,
    /// No exact match, but similar catalog names were found.
    Fuzzy,
    /// Nothing in the catalog resembles the label, or there is no label.
    NoMatch,
}

/// Everything known about one planted position.
#[derive(Debug, Clone, PartialEq)]
pub struct Identification {
    /// The planting record at the requested address.
    pub record: FieldRecord,
    /// Exact catalog match for the planted variety.
    pub cultivar: Option<CultivarRecord>,
    /// Catalog suggestions, best first. Only populated when there is a
    /// variety label but no exact match.
    pub fuzzy_matches: Vec<CultivarRecord>,
}

impl Identification {
    #[must_use]
    pub fn status(&self) -> MatchStatus {
        if self.cultivar.is_some() {
            MatchStatus::Exact
        } else if self.fuzzy_matches.is_empty() {
            MatchStatus::NoMatch
        } else {
            MatchStatus::Fuzzy
        }
    }
}

/// Field index, catalog, and search over one shared dataset cache.
#[derive(Debug, Clone)]
pub struct Identifier {
    cache: Arc<DataCache>,
    fields: FieldIndex,
    catalog: CultivarCatalog,
    search: LocationSearch,
}

impl Identifier {
    /// Creates an identifier reading from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let cache = Arc::new(DataCache::new(source));
        let fields = FieldIndex::new(Arc::clone(&cache));

        Self {
            catalog: CultivarCatalog::new(Arc::clone(&cache)),
            search: LocationSearch::new(fields.clone()),
            fields,
            cache,
        }
    }

    /// Creates an identifier reading the JSON files named in `config`.
    #[must_use]
    pub fn from_config(config: DataConfig) -> Self {
        log::debug!(
            "Using field data {:?} and catalog {}",
            config.field_paths,
            config.catalog_path.display()
        );
        Self::new(Arc::new(JsonFileSource::new(config)))
    }

    #[must_use]
    pub const fn fields(&self) -> &FieldIndex {
        &self.fields
    }

    #[must_use]
    pub const fn catalog(&self) -> &CultivarCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn search(&self) -> &LocationSearch {
        &self.search
    }

    /// Identifies the planting at an address.
    ///
    /// Returns `None` when nothing is planted there. Otherwise the record's
    /// variety is looked up in the catalog by exact name; if that fails,
    /// catalog names scoring at least [`FUZZY_IDENTIFY_THRESHOLD`] are
    /// returned as suggestions.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError`] if either dataset cannot be loaded.
    pub async fn identify(
        &self,
        field: &str,
        parcel: &str,
        row: &str,
        position: &str,
    ) -> Result<Option<Identification>, DataLoadError> {
        let Some(record) = self.fields.record_at(field, parcel, row, position).await? else {
            return Ok(None);
        };

        let Some(variety) = record.variety.clone() else {
            log::debug!("Position {field}/{parcel}/{row}/{position} has no variety label");
            return Ok(Some(Identification {
                record,
                cultivar: None,
                fuzzy_matches: Vec::new(),
            }));
        };

        let cultivar = self.catalog.find_by_name(&variety).await?;
        let fuzzy_matches = if cultivar.is_none() {
            self.catalog
                .find_fuzzy(&variety, FUZZY_IDENTIFY_THRESHOLD)
                .await?
        } else {
            Vec::new()
        };

        let identification = Identification {
            record,
            cultivar,
            fuzzy_matches,
        };
        log::debug!("Identified {variety:?} as {}", identification.status());

        Ok(Some(identification))
    }

    /// Warms both dataset caches. Failures are logged, never returned.
    pub async fn preload_all(&self) {
        self.cache.preload_all().await;
    }

    /// Warms both dataset caches on background tasks.
    pub fn spawn_preload(&self) {
        self.cache.spawn_preload();
    }

    /// Drops both cached datasets.
    pub async fn clear_cache(&self) {
        self.cache.clear_cache().await;
    }

    #[must_use]
    pub fn is_field_data_cached(&self) -> bool {
        self.cache.is_field_data_cached()
    }

    #[must_use]
    pub fn is_catalog_data_cached(&self) -> bool {
        self.cache.is_catalog_data_cached()
    }
}

#[cfg(test)]
mod tests {
    use peony_identifier_data::{MemorySource, parse_cultivar_records, parse_field_records};

    use super::*;

    const FIELDS_JSON: &str = r#"[
        {"champ": "1", "parcelle": "A", "rang": "3", "trou": "7", "variete": "Sarah Bernhardt"},
        {"champ": "1", "parcelle": "A", "rang": "3", "trou": "8", "variete": "Coral Charme"},
        {"champ": "1", "parcelle": "A", "rang": "3", "trou": "9", "variete": "Bowl of Beauty"},
        {"champ": "1", "parcelle": "A", "rang": "3", "trou": "10"}
    ]"#;

    const CATALOG_JSON: &str = r#"[
        {"id": 1, "cultivar": "Sarah Bernhardt", "originator": "Lemoine", "date": "1906",
         "group": "Herbaceous", "description": "<p>Pink double.</p>", "image": false,
         "url": "https://example.org/1"},
        {"id": 2, "cultivar": "Coral Charm", "originator": "Wissing", "date": "1964",
         "group": "Hybrid", "description": "", "image": "https://example.org/2.jpg",
         "url": "https://example.org/2"}
    ]"#;

    fn setup() -> (Arc<MemorySource>, Identifier) {
        let source = Arc::new(MemorySource::new(
            parse_field_records(FIELDS_JSON).unwrap(),
            parse_cultivar_records(CATALOG_JSON).unwrap(),
        ));
        let identifier = Identifier::new(Arc::clone(&source) as Arc<dyn DataSource>);
        (source, identifier)
    }

    #[tokio::test]
    async fn looks_up_position_and_exact_cultivar() {
        let (_, identifier) = setup();

        let record = identifier
            .fields()
            .record_at("1", "A", "3", "7")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.variety.as_deref(), Some("Sarah Bernhardt"));

        for name in ["sarah bernhardt", "SARAH BERNHARDT", "Sarah Bernhardt"] {
            let cultivar = identifier.catalog().find_by_name(name).await.unwrap().unwrap();
            assert_eq!(cultivar.id, 1);
        }
    }

    #[test]
    fn match_status_renders_snake_case() {
        assert_eq!(MatchStatus::Exact.to_string(), "exact");
        assert_eq!(MatchStatus::NoMatch.as_ref(), "no_match");
    }

    #[tokio::test]
    async fn identifies_exact_match() {
        let (_, identifier) = setup();

        let found = identifier.identify("1", "A", "3", "7").await.unwrap().unwrap();
        assert_eq!(found.status(), MatchStatus::Exact);
        assert_eq!(found.cultivar.unwrap().plain_description(), "Pink double.");
        assert!(found.fuzzy_matches.is_empty());
    }

    #[tokio::test]
    async fn falls_back_to_fuzzy_suggestions() {
        let (_, identifier) = setup();

        let found = identifier.identify("1", "A", "3", "8").await.unwrap().unwrap();
        assert_eq!(found.status(), MatchStatus::Fuzzy);
        assert_eq!(found.cultivar, None);
        assert_eq!(found.fuzzy_matches.len(), 1);
        assert_eq!(found.fuzzy_matches[0].id, 2);
        assert!(found.fuzzy_matches[0].has_image());
    }

    #[tokio::test]
    async fn unmatched_and_unlabeled_positions() {
        let (_, identifier) = setup();

        let unmatched = identifier.identify("1", "A", "3", "9").await.unwrap().unwrap();
        assert_eq!(unmatched.status(), MatchStatus::NoMatch);

        let unlabeled = identifier.identify("1", "A", "3", "10").await.unwrap().unwrap();
        assert_eq!(unlabeled.status(), MatchStatus::NoMatch);
        assert_eq!(unlabeled.record.variety, None);

        assert!(identifier.identify("1", "A", "3", "11").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn components_share_one_cache() {
        let (source, identifier) = setup();

        identifier.preload_all().await;
        assert!(identifier.is_field_data_cached());
        assert!(identifier.is_catalog_data_cached());

        identifier.fields().distinct_rows("1", "A").await.unwrap();
        identifier.search().search("sarah").await.unwrap();
        identifier.identify("1", "A", "3", "8").await.unwrap();
        assert_eq!(source.field_load_count(), 1);
        assert_eq!(source.cultivar_load_count(), 1);

        identifier.clear_cache().await;
        assert!(!identifier.is_field_data_cached());
        identifier.search().all_unique_varieties().await.unwrap();
        assert_eq!(source.field_load_count(), 2);
    }

    #[tokio::test]
    async fn identifies_against_bundled_data() {
        let identifier = Identifier::from_config(DataConfig::new(
            peony_identifier_data::paths::default_field_path(),
            peony_identifier_data::paths::default_catalog_path(),
        ));

        assert_eq!(identifier.fields().distinct_fields().await.unwrap(), vec!["1", "2"]);
        assert_eq!(
            identifier.fields().distinct_rows("1", "PP").await.unwrap(),
            vec!["1", "2", "10"]
        );

        let exact = identifier.identify("1", "PP", "1", "1").await.unwrap().unwrap();
        assert_eq!(exact.cultivar.map(|c| c.id), Some(1));

        let fuzzy = identifier.identify("1", "PP", "1", "3").await.unwrap().unwrap();
        assert_eq!(fuzzy.status(), MatchStatus::Fuzzy);
        assert_eq!(fuzzy.fuzzy_matches[0].cultivar_name, "Coral Charm");

        let placeholder = identifier.identify("1", "PP", "2", "2").await.unwrap().unwrap();
        assert_eq!(placeholder.record.variety, None);

        let varieties = identifier.search().all_unique_varieties().await.unwrap();
        assert!(!varieties.iter().any(|v| v.trim().is_empty()));
        assert_eq!(identifier.search().search("sarah bernhardt").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_files_surface_as_load_errors() {
        let dir = std::env::temp_dir().join(format!("peony_identify_{}", std::process::id()));
        let identifier = Identifier::from_config(DataConfig::new(
            dir.join("fields.json"),
            dir.join("cultivars.json"),
        ));

        identifier.preload_all().await;
        assert!(matches!(
            identifier.fields().distinct_fields().await.unwrap_err(),
            DataLoadError::Io { .. }
        ));
        assert!(identifier.catalog().get_all().await.is_err());
    }
}
