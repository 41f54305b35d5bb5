//! Lenient text deserializers for planting map exports.
//!
//! The exports are produced from spreadsheets, so a cell that should hold
//! text sometimes arrives as a bare JSON number or boolean. Empty cells and
//! the `na` marker are treated as missing.

use serde::{Deserialize, Deserializer};

/// Any scalar JSON value that can stand in for a text cell.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl RawText {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Integer(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Returns `true` for cell contents that mean "no value".
fn is_placeholder(value: &str) -> bool {
    value.is_empty() || value == "na"
}

/// Deserializes a mandatory text cell.
pub fn required<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawText::deserialize(deserializer).map(RawText::into_text)
}

/// Deserializes an optional text cell, mapping `null`, `""` and `"na"` to
/// `None`.
pub fn optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawText>::deserialize(deserializer)?;
    Ok(raw.map(RawText::into_text).filter(|s| !is_placeholder(s)))
}
