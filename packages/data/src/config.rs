//! Dataset location configuration.
//!
//! Locations come from, in increasing priority: the bundled defaults under
//! `data/`, an optional TOML file, and the `PEONY_FIELD_DATA` /
//! `PEONY_CATALOG_DATA` environment variables.
//!
//! ```toml
//! field_paths = ["Champ1PP.json", "Champ1GP.json"]
//! catalog_path = "peony-database.json"
//! ```
//!
//! Relative paths in a TOML file are resolved against the file's
//! directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{DataLoadError, paths};

/// Environment variable overriding the field data files (comma-separated).
pub const FIELD_DATA_ENV: &str = "PEONY_FIELD_DATA";

/// Environment variable overriding the catalog data file.
pub const CATALOG_DATA_ENV: &str = "PEONY_CATALOG_DATA";

/// Where the field planting map and cultivar catalog are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Field planting map files, concatenated in order.
    #[serde(default = "default_field_paths")]
    pub field_paths: Vec<PathBuf>,
    /// Cultivar catalog file.
    #[serde(default = "paths::default_catalog_path")]
    pub catalog_path: PathBuf,
}

fn default_field_paths() -> Vec<PathBuf> {
    vec![paths::default_field_path()]
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            field_paths: default_field_paths(),
            catalog_path: paths::default_catalog_path(),
        }
    }
}

impl DataConfig {
    /// Creates a configuration for a single field file and a catalog file.
    #[must_use]
    pub fn new(field_path: impl Into<PathBuf>, catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            field_paths: vec![field_path.into()],
            catalog_path: catalog_path.into(),
        }
    }

    /// Returns the bundled defaults with environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Parses a configuration from TOML text. Keys that are absent keep
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError::Config`] if the text is not valid TOML or
    /// has unexpected value types.
    pub fn from_toml_str(content: &str) -> Result<Self, DataLoadError> {
        toml::de::from_str(content).map_err(|e| DataLoadError::Config(e.to_string()))
    }

    /// Reads a TOML configuration file and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError::Io`] if the file cannot be read and
    /// [`DataLoadError::Config`] if it cannot be parsed.
    pub fn from_toml_file(path: &Path) -> Result<Self, DataLoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));

        log::debug!("Loaded data config from {}", path.display());

        Ok(config.relative_to(base).with_env_overrides())
    }

    /// Applies `PEONY_FIELD_DATA` and `PEONY_CATALOG_DATA` if set.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(FIELD_DATA_ENV).ok().as_deref(),
            std::env::var(CATALOG_DATA_ENV).ok().as_deref(),
        )
    }

    fn with_overrides(mut self, field_paths: Option<&str>, catalog_path: Option<&str>) -> Self {
        if let Some(list) = field_paths {
            let parsed: Vec<PathBuf> = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
            if !parsed.is_empty() {
                self.field_paths = parsed;
            }
        }

        if let Some(path) = catalog_path.map(str::trim).filter(|s| !s.is_empty()) {
            self.catalog_path = PathBuf::from(path);
        }

        self
    }

    fn relative_to(mut self, base: &Path) -> Self {
        self.field_paths = self.field_paths.iter().map(|p| base.join(p)).collect();
        self.catalog_path = base.join(&self.catalog_path);
        self
    }
}
