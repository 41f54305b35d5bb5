#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Field planting record types.
//!
//! A planted location is addressed hierarchically: field, parcel, row and
//! position. The JSON exports of the planting map keep every value as text
//! (rows and positions may carry leading zeros or letters), so all address
//! components are stored as `String` and only parsed numerically when
//! sorting.

mod text;

use serde::{Deserialize, Serialize};

/// One planted position as recorded in the field planting map.
///
/// Only `field` is guaranteed to be present. Sparse rows (gaps, removed
/// plants) show up as records with a missing `row`, `position` or
/// `variety`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Field identifier (e.g. `"1"`).
    #[serde(rename = "champ", alias = "field", deserialize_with = "text::required")]
    pub field: String,
    /// Parcel identifier within the field (e.g. `"PP"`).
    #[serde(
        rename = "parcelle",
        alias = "parcel",
        default,
        deserialize_with = "text::optional"
    )]
    pub parcel: Option<String>,
    /// Row within the parcel, numeric-looking text.
    #[serde(
        rename = "rang",
        alias = "row",
        default,
        deserialize_with = "text::optional"
    )]
    pub row: Option<String>,
    /// Position (hole) within the row, numeric-looking text.
    #[serde(
        rename = "trou",
        alias = "position",
        default,
        deserialize_with = "text::optional"
    )]
    pub position: Option<String>,
    /// Variety label as written on the planting map. Spelling may differ
    /// from the reference catalog.
    #[serde(
        rename = "variete",
        alias = "variety",
        default,
        deserialize_with = "text::optional"
    )]
    pub variety: Option<String>,
    /// Year the plant was put in the ground.
    #[serde(
        rename = "annee_plantation",
        alias = "plantingYear",
        default,
        deserialize_with = "text::optional"
    )]
    pub planting_year: Option<String>,
    /// Plant size class.
    #[serde(
        rename = "taille",
        alias = "size",
        default,
        deserialize_with = "text::optional"
    )]
    pub size: Option<String>,
    /// Tag / label text.
    #[serde(
        rename = "etiquette",
        alias = "tag",
        default,
        deserialize_with = "text::optional"
    )]
    pub tag: Option<String>,
    /// Sale marker.
    #[serde(
        rename = "vente",
        alias = "forSale",
        default,
        deserialize_with = "text::optional"
    )]
    pub for_sale: Option<String>,
}

impl FieldRecord {
    /// Returns `true` if this record sits at exactly the given address.
    ///
    /// Records with a missing parcel, row or position never match.
    #[must_use]
    pub fn is_at(&self, field: &str, parcel: &str, row: &str, position: &str) -> bool {
        self.is_in_row(field, parcel, row) && self.position.as_deref() == Some(position)
    }

    /// Returns `true` if this record belongs to the given row.
    #[must_use]
    pub fn is_in_row(&self, field: &str, parcel: &str, row: &str) -> bool {
        self.is_in_parcel(field, parcel) && self.row.as_deref() == Some(row)
    }

    /// Returns `true` if this record belongs to the given parcel.
    #[must_use]
    pub fn is_in_parcel(&self, field: &str, parcel: &str) -> bool {
        self.field == field && self.parcel.as_deref() == Some(parcel)
    }
}

/// A planted position whose variety matched a location search.
///
/// Missing address components are rendered as empty strings, both in the
/// individual fields and in [`LocationMatch::label`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMatch {
    /// Field identifier.
    pub field: String,
    /// Parcel identifier.
    pub parcel: String,
    /// Row.
    pub row: String,
    /// Position within the row.
    pub position: String,
    /// Variety label as planted.
    pub variety: Option<String>,
    /// Plant size class.
    pub size: Option<String>,
    /// Human-readable address, e.g. `"Field 1, Parcel A, Row 3, Position 7"`.
    pub label: String,
}

impl LocationMatch {
    /// Projects a field record into a location match.
    #[must_use]
    pub fn from_record(record: &FieldRecord) -> Self {
        let parcel = record.parcel.clone().unwrap_or_default();
        let row = record.row.clone().unwrap_or_default();
        let position = record.position.clone().unwrap_or_default();
        let label = format!(
            "Field {}, Parcel {parcel}, Row {row}, Position {position}",
            record.field
        );

        Self {
            field: record.field.clone(),
            parcel,
            row,
            position,
            variety: record.variety.clone(),
            size: record.size.clone(),
            label,
        }
    }
}

impl From<&FieldRecord> for LocationMatch {
    fn from(record: &FieldRecord) -> Self {
        Self::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FieldRecord {
        FieldRecord {
            field: "1".to_string(),
            parcel: Some("A".to_string()),
            row: Some("3".to_string()),
            position: Some("7".to_string()),
            variety: Some("Sarah Bernhardt".to_string()),
            size: Some("2-3".to_string()),
            ..FieldRecord::default()
        }
    }

    #[test]
    fn parses_export_keys() {
        let json = r#"{
            "champ": "1",
            "parcelle": "PP",
            "rang": "12",
            "trou": "03",
            "variete": "Coral Charm",
            "annee_plantation": "2019",
            "taille": "3-5",
            "etiquette": null,
            "vente": "oui"
        }"#;
        let parsed: FieldRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.field, "1");
        assert_eq!(parsed.parcel.as_deref(), Some("PP"));
        assert_eq!(parsed.row.as_deref(), Some("12"));
        assert_eq!(parsed.position.as_deref(), Some("03"));
        assert_eq!(parsed.variety.as_deref(), Some("Coral Charm"));
        assert_eq!(parsed.planting_year.as_deref(), Some("2019"));
        assert_eq!(parsed.size.as_deref(), Some("3-5"));
        assert_eq!(parsed.tag, None);
        assert_eq!(parsed.for_sale.as_deref(), Some("oui"));
    }

    #[test]
    fn parses_english_aliases() {
        let json = r#"{"field": "2", "parcel": "GP", "row": "1", "position": "4", "variety": "Bowl of Beauty"}"#;
        let parsed: FieldRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.field, "2");
        assert_eq!(parsed.parcel.as_deref(), Some("GP"));
        assert_eq!(parsed.variety.as_deref(), Some("Bowl of Beauty"));
    }

    #[test]
    fn missing_and_unknown_keys_are_tolerated() {
        let json = r#"{"champ": "1", "parcelle": "A", "color": "pink"}"#;
        let parsed: FieldRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.row, None);
        assert_eq!(parsed.position, None);
        assert_eq!(parsed.variety, None);
    }

    #[test]
    fn numbers_are_kept_as_text() {
        let json = r#"{"champ": 1, "parcelle": "A", "rang": 3, "trou": 7}"#;
        let parsed: FieldRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.field, "1");
        assert_eq!(parsed.row.as_deref(), Some("3"));
        assert_eq!(parsed.position.as_deref(), Some("7"));
    }

    #[test]
    fn placeholders_become_none() {
        let json = r#"{"champ": "1", "parcelle": "A", "rang": "", "variete": "na"}"#;
        let parsed: FieldRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.row, None);
        assert_eq!(parsed.variety, None);
    }

    #[test]
    fn missing_field_fails() {
        let json = r#"{"parcelle": "A"}"#;
        assert!(serde_json::from_str::<FieldRecord>(json).is_err());
    }

    #[test]
    fn address_predicates() {
        let r = record();
        assert!(r.is_at("1", "A", "3", "7"));
        assert!(!r.is_at("1", "A", "3", "8"));
        assert!(r.is_in_row("1", "A", "3"));
        assert!(!r.is_in_row("1", "B", "3"));
        assert!(r.is_in_parcel("1", "A"));
        assert!(!r.is_in_parcel("2", "A"));
    }

    #[test]
    fn location_label() {
        let m = LocationMatch::from_record(&record());
        assert_eq!(m.label, "Field 1, Parcel A, Row 3, Position 7");
        assert_eq!(m.variety.as_deref(), Some("Sarah Bernhardt"));
        assert_eq!(m.size.as_deref(), Some("2-3"));
    }

    #[test]
    fn location_label_with_gaps() {
        let r = FieldRecord {
            field: "1".to_string(),
            variety: Some("Karl Rosenfield".to_string()),
            ..FieldRecord::default()
        };
        let m = LocationMatch::from(&r);
        assert_eq!(m.parcel, "");
        assert_eq!(m.label, "Field 1, Parcel , Row , Position ");
    }
}
