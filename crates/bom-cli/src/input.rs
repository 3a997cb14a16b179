//! Loading parsed record sets from disk.
//!
//! Two layouts are accepted:
//!
//! - **JSON**: an object mapping each designator to an object of field values
//! - **CSV**: one row per designator (or designator list such as `R1-R4`)
//!   with a `ref`, `reference` or `designator` column; every other column is
//!   a field
//!
//! Records without a `reference` field get the designator prefix (`R` for
//! `R12`), the field the group sorter orders by.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use bom_core::expand_refs;
use bom_model::fields::REFERENCE;
use bom_model::{Record, RecordSet, designator_prefix};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Header names accepted for the designator column, in order of preference.
const DESIGNATOR_COLUMNS: &[&str] = &["ref", "refs", "designator", "designators", "reference"];

/// Supported input layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Detects the layout from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Loads a record set, choosing the layout by file extension.
pub fn load_records(path: &Path) -> Result<RecordSet> {
    let format = InputFormat::from_path(path).ok_or_else(|| {
        anyhow!(
            "unsupported input {}: expected a .json or .csv file",
            path.display()
        )
    })?;
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut records = match format {
        InputFormat::Json => parse_json_records(&text),
        InputFormat::Csv => parse_csv_records(&text),
    }
    .with_context(|| format!("parse {}", path.display()))?;
    fill_reference_prefix(&mut records);
    info!(
        path = %path.display(),
        components = records.len(),
        "loaded record set"
    );
    Ok(records)
}

fn json_field(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(if *flag { "1" } else { "0" }.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parses a JSON object of designator → field object.
///
/// Numbers become their text form and booleans `1`/`0`, so flags such as
/// `"dnp": false` keep their meaning. Nulls, arrays and nested objects are
/// skipped.
pub fn parse_json_records(text: &str) -> Result<RecordSet> {
    let raw: BTreeMap<String, BTreeMap<String, Value>> =
        serde_json::from_str(text).context("expected an object of designator → fields")?;
    let records = raw
        .into_iter()
        .map(|(designator, fields)| {
            let record: Record = fields
                .iter()
                .filter_map(|(name, value)| {
                    let text = json_field(value);
                    if text.is_none() {
                        debug!(designator = %designator, field = %name, "skipping non-scalar field");
                    }
                    text.map(|text| (name.clone(), text))
                })
                .collect();
            (designator, record)
        })
        .collect();
    Ok(records)
}

/// Parses a CSV table with one designator (list) per row.
pub fn parse_csv_records(text: &str) -> Result<RecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let headers = reader.headers().context("read CSV header")?.clone();
    let designator_column = DESIGNATOR_COLUMNS
        .iter()
        .find_map(|wanted| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(wanted))
        })
        .ok_or_else(|| {
            anyhow!("no designator column (expected one of: {})", DESIGNATOR_COLUMNS.join(", "))
        })?;

    let mut records = RecordSet::new();
    for (row_idx, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("read CSV row {}", row_idx + 2))?;
        let designators = row.get(designator_column).unwrap_or_default();
        if designators.is_empty() {
            warn!(row = row_idx + 2, "skipping row without designator");
            continue;
        }
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .enumerate()
            .filter(|(column, (header, _))| *column != designator_column && !header.is_empty())
            .map(|(_, (header, value))| (header.to_string(), value.to_string()))
            .collect();
        for designator in expand_refs(designators)? {
            if records.contains_key(&designator) {
                bail!("duplicate designator {designator} in CSV row {}", row_idx + 2);
            }
            records.insert(designator, record.clone());
        }
    }
    Ok(records)
}

/// Sets the `reference` field from the designator where it is missing.
pub fn fill_reference_prefix(records: &mut RecordSet) {
    for (designator, record) in records.iter_mut() {
        let has_reference = record
            .keys()
            .any(|name| name.eq_ignore_ascii_case(REFERENCE));
        let prefix = designator_prefix(designator);
        if !has_reference && !prefix.is_empty() {
            record.insert(REFERENCE.to_string(), prefix.to_string());
        }
    }
}
