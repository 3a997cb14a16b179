//! Sub-part splitting.
//!
//! One schematic symbol may stand for several purchasable parts, listed in
//! its code fields (`manf# = PARTG1;PARTG2`). Each such designator becomes
//! one synthetic designator per sub-part (`U1#1`, `U1#2`, ...) carrying the
//! code at that position and its quantity multiplier.

use bom_model::fields::{MANF, REPLICATE_MANF, VALUE, qty_field};
use bom_model::{
    DistributorRegistry, OrganizeError, Record, RecordSet, Result, subpart_designator,
};
use tracing::{debug, info, trace, warn};

use crate::code::{decode_compound_code, split_part_list};

/// Code fields of one record with their sub-part entries.
struct PartCodes {
    fields: Vec<(String, Vec<String>)>,
    count: usize,
}

impl PartCodes {
    fn collect(designator: &str, record: &Record, registry: &DistributorRegistry) -> Self {
        let mut fields = Vec::new();
        let mut count = 0;
        for field in registry.part_code_fields() {
            let Some(value) = record.get(&field) else {
                continue;
            };
            let entries = split_part_list(value);
            if entries.len() > 1 && entries.iter().any(String::is_empty) {
                warn!(
                    designator = %designator,
                    field = %field,
                    value = %value,
                    "Empty entry in sub-part code list"
                );
            }
            count = count.max(entries.len());
            fields.push((field, entries));
        }
        Self { fields, count }
    }
}

/// Manufacturer names for each sub-part position.
///
/// A single name applies to every sub-part; a shorter list is padded with
/// empty names; `~` repeats the name resolved at the previous position.
fn resolve_manufacturers(record: &Record, count: usize) -> Vec<String> {
    let mut names = match record.get(MANF) {
        Some(value) => split_part_list(value),
        None => vec![String::new(); count],
    };
    if names.len() == 1 && count > 1 {
        names = vec![names[0].clone(); count];
    } else if names.len() < count {
        names.resize(count, String::new());
    }

    let mut previous = String::new();
    for name in &mut names {
        if name == REPLICATE_MANF {
            name.clone_from(&previous);
        } else {
            previous.clone_from(name);
        }
    }
    names
}

/// Adds a record, refusing to replace one already in the set.
fn insert_unique(into: &mut RecordSet, designator: String, record: Record) -> Result<()> {
    if into.contains_key(&designator) {
        return Err(OrganizeError::DuplicateDesignator { designator });
    }
    into.insert(designator, record);
    Ok(())
}

fn split_record(
    designator: &str,
    record: &Record,
    codes: &PartCodes,
    into: &mut RecordSet,
) -> Result<()> {
    let manufacturers = resolve_manufacturers(record, codes.count);
    let value = record.get(VALUE).map(String::as_str).unwrap_or_default();

    for idx in 0..codes.count {
        let position = idx + 1;
        let mut subpart = record.clone();
        let annotation = format!("p{position}/{}", codes.count);
        let annotated = if value.is_empty() {
            annotation
        } else {
            format!("{value} - {annotation}")
        };
        subpart.insert(VALUE.to_string(), annotated);

        for (field, entries) in &codes.fields {
            match entries.get(idx) {
                Some(entry) => {
                    let decoded = decode_compound_code(entry);
                    subpart.insert(field.clone(), decoded.code);
                    subpart.insert(qty_field(field), decoded.qty);
                }
                None => {
                    trace!(
                        designator = %designator,
                        field = %field,
                        position,
                        "No code at sub-part position"
                    );
                    subpart.remove(field);
                    subpart.remove(&qty_field(field));
                }
            }
        }

        match manufacturers.get(idx).filter(|name| !name.is_empty()) {
            Some(name) => {
                subpart.insert(MANF.to_string(), name.clone());
            }
            None => {
                subpart.remove(MANF);
            }
        }

        insert_unique(into, subpart_designator(designator, position), subpart)?;
    }
    Ok(())
}

fn decode_single(record: &mut Record, codes: &PartCodes) {
    for (field, entries) in &codes.fields {
        let Some(entry) = entries.first().filter(|entry| !entry.is_empty()) else {
            continue;
        };
        let decoded = decode_compound_code(entry);
        record.insert(field.clone(), decoded.code);
        record.insert(qty_field(field), decoded.qty);
    }
}

/// Splits every record with several manufacturer/distributor codes into
/// sub-part records and decodes quantity multipliers.
///
/// Records without any code field pass through unchanged. No record is ever
/// dropped: a sub-part designator that is also an input designator fails
/// with [`OrganizeError::DuplicateDesignator`].
pub fn subpart_split(records: RecordSet, registry: &DistributorRegistry) -> Result<RecordSet> {
    let total = records.len();
    let mut split = RecordSet::new();
    let mut multi = 0usize;

    for (designator, mut record) in records {
        let codes = PartCodes::collect(&designator, &record, registry);
        if codes.fields.is_empty() {
            insert_unique(&mut split, designator, record)?;
            continue;
        }
        if codes.count > 1 {
            debug!(
                designator = %designator,
                subparts = codes.count,
                "Splitting sub-parts"
            );
            multi += 1;
            split_record(&designator, &record, &codes, &mut split)?;
        } else {
            decode_single(&mut record, &codes);
            insert_unique(&mut split, designator, record)?;
        }
    }

    info!(
        input = total,
        output = split.len(),
        split_designators = multi,
        "Split sub-parts"
    );
    Ok(split)
}
