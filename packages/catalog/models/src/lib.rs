#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reference cultivar catalog types.
//!
//! The catalog is an encyclopedia export of registered peony cultivars.
//! Descriptions are stored with their original HTML markup; use
//! [`CultivarRecord::plain_description`] for display.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Matches a single markup tag such as `<p>` or `<a href="...">`.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// One registered cultivar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CultivarRecord {
    /// Unique catalog identifier.
    pub id: u32,
    /// Canonical cultivar name.
    #[serde(rename = "cultivar", alias = "cultivarName")]
    pub cultivar_name: String,
    /// Breeder or introducer.
    pub originator: String,
    /// Registration date, free-form text.
    #[serde(rename = "date", alias = "registrationDate")]
    pub registration_date: String,
    /// Classification group (e.g. `"Herbaceous"`, `"Itoh"`).
    #[serde(rename = "group", alias = "classificationGroup")]
    pub classification_group: String,
    /// Registry reference code.
    #[serde(rename = "reference", alias = "referenceCode", default)]
    pub reference_code: Option<String>,
    /// Country of origin.
    #[serde(default)]
    pub country: Option<String>,
    /// Description, may contain HTML markup.
    pub description: String,
    /// Image URL. Legacy exports encode "no image" as `false`.
    #[serde(
        rename = "image",
        alias = "imageUrl",
        default,
        deserialize_with = "deserialize_image"
    )]
    pub image_url: Option<String>,
    /// Page the entry was taken from.
    #[serde(rename = "url", alias = "sourceUrl")]
    pub source_url: String,
}

impl CultivarRecord {
    /// Returns the description with markup tags removed.
    #[must_use]
    pub fn plain_description(&self) -> String {
        TAG_RE.replace_all(&self.description, "").trim().to_string()
    }

    /// Returns `true` if the record links to an image.
    #[must_use]
    pub const fn has_image(&self) -> bool {
        self.image_url.is_some()
    }
}

/// Shapes the `image` key has taken across catalog exports.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawImage {
    Url(String),
    Flag(bool),
    Other(IgnoredAny),
}

/// Normalizes the `image` key: `false`, `"false"`, `null`, `""` and any
/// non-text value all mean "no image".
fn deserialize_image<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawImage>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawImage::Url(url)) => normalize_image_url(url),
        Some(RawImage::Flag(_) | RawImage::Other(_)) | None => None,
    })
}

/// Maps legacy "no image" encodings of a textual image value to `None`.
#[must_use]
pub fn normalize_image_url(url: String) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() || trimmed == "false" {
        None
    } else if trimmed.len() == url.len() {
        Some(url)
    } else {
        Some(trimmed.to_string())
    }
}
