//! Pure queries over a loaded field planting snapshot.
//!
//! Every query is a linear filter, then distinct, then sort. Field and
//! parcel identifiers sort lexicographically; rows and positions sort by
//! their integer value, with unparsable text sorting as `0`. All sorts are
//! stable, so entries with equal keys keep their load order.

use std::collections::BTreeSet;

use peony_identifier_field_models::FieldRecord;

/// Sort key for numeric-looking text: the parsed integer, or `0` when the
/// text is not an integer.
#[must_use]
pub fn numeric_key(value: &str) -> i32 {
    value.parse().unwrap_or(0)
}

/// Collects distinct values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

fn sort_numeric(values: &mut [String]) {
    values.sort_by_key(|v| numeric_key(v));
}

/// Distinct field identifiers, lexicographically sorted.
#[must_use]
pub fn distinct_fields(records: &[FieldRecord]) -> Vec<String> {
    let mut fields = distinct(records.iter().map(|r| r.field.as_str()));
    fields.sort();
    fields
}

/// Distinct parcels of `field`, lexicographically sorted.
#[must_use]
pub fn distinct_parcels(records: &[FieldRecord], field: &str) -> Vec<String> {
    let mut parcels = distinct(
        records
            .iter()
            .filter(|r| r.field == field)
            .filter_map(|r| r.parcel.as_deref()),
    );
    parcels.sort();
    parcels
}

/// Distinct rows of a parcel, sorted by numeric value.
#[must_use]
pub fn distinct_rows(records: &[FieldRecord], field: &str, parcel: &str) -> Vec<String> {
    let mut rows = distinct(
        records
            .iter()
            .filter(|r| r.is_in_parcel(field, parcel))
            .filter_map(|r| r.row.as_deref()),
    );
    sort_numeric(&mut rows);
    rows
}

/// Distinct positions of a row, sorted by numeric value.
#[must_use]
pub fn distinct_positions(
    records: &[FieldRecord],
    field: &str,
    parcel: &str,
    row: &str,
) -> Vec<String> {
    let mut positions = distinct(
        records
            .iter()
            .filter(|r| r.is_in_row(field, parcel, row))
            .filter_map(|r| r.position.as_deref()),
    );
    sort_numeric(&mut positions);
    positions
}

/// The first record, in load order, at exactly this address.
#[must_use]
pub fn record_at<'a>(
    records: &'a [FieldRecord],
    field: &str,
    parcel: &str,
    row: &str,
    position: &str,
) -> Option<&'a FieldRecord> {
    records
        .iter()
        .find(|r| r.is_at(field, parcel, row, position))
}

/// Every record of a row, sorted by numeric position. Records without a
/// position sort as position `0`.
#[must_use]
pub fn row_records(records: &[FieldRecord], field: &str, parcel: &str, row: &str) -> Vec<FieldRecord> {
    let mut entries: Vec<FieldRecord> = records
        .iter()
        .filter(|r| r.is_in_row(field, parcel, row))
        .cloned()
        .collect();
    entries.sort_by_key(|r| r.position.as_deref().map_or(0, numeric_key));
    entries
}

/// Every record of a field, in load order.
#[must_use]
pub fn field_records(records: &[FieldRecord], field: &str) -> Vec<FieldRecord> {
    records.iter().filter(|r| r.field == field).cloned().collect()
}
