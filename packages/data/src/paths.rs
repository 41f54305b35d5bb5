//! Canonical file paths for the bundled datasets.
//!
//! All paths are relative to the project root's `data/` directory.

use std::path::{Path, PathBuf};

/// File name of the default field planting map.
pub const FIELD_DATA_FILE_NAME: &str = "fields.json";

/// File name of the default cultivar catalog.
pub const CATALOG_DATA_FILE_NAME: &str = "cultivars.json";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`. Falls back to the
/// manifest directory itself if it has fewer than two ancestors.
#[must_use]
pub fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the path of the default field planting map.
#[must_use]
pub fn default_field_path() -> PathBuf {
    data_dir().join(FIELD_DATA_FILE_NAME)
}

/// Returns the path of the default cultivar catalog.
#[must_use]
pub fn default_catalog_path() -> PathBuf {
    data_dir().join(CATALOG_DATA_FILE_NAME)
}
