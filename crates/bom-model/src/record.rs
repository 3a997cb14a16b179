//! Component records as handed over by the EDA parsers.

use std::collections::BTreeMap;

/// Field name → value map describing one designator.
pub type Record = BTreeMap<String, String>;

/// Designator → record map. Designators are unique within a set.
pub type RecordSet = BTreeMap<String, Record>;

/// Returns the value of a field, treating an empty string as absent.
pub fn non_empty<'a>(record: &'a Record, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// Returns the per-instance override of a field if present, else the field.
pub fn local_or_global<'a>(record: &'a Record, field: &str) -> Option<&'a str> {
    record
        .get(&crate::fields::local_field(field))
        .or_else(|| record.get(field))
        .map(String::as_str)
}
