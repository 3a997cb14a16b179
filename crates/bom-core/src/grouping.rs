//! Identical-component grouping.
//!
//! Components whose descriptive fields (value, footprint, reference prefix,
//! ...) are all equal are one purchasable line item. Grouping runs in three
//! phases:
//!
//! 1. **Accumulate**: hash the descriptive fields and collect designators and
//!    manufacturer numbers per hash.
//! 2. **Refine**: split groups whose members carry different manufacturer
//!    numbers.
//! 3. **Reconcile**: merge the requested fields and build one field map valid
//!    for every member.

use std::collections::{BTreeSet, HashMap};

use bom_model::fields::{FIELD_SEPARATOR, GROUP_LINE_SEPARATOR, MANF_NUM};
use bom_model::{
    ComponentGroup, DistributorRegistry, OrganizeError, Record, RecordSet, Result, natural_cmp,
    non_empty,
};
use bom_normalization::FieldNormalizer;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::refs::collapse_refs;

/// Digest of the fields that decide whether two components are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(String);

impl GroupKey {
    /// Hashes every `(name, value)` pair of `record` accepted by `include`.
    ///
    /// Names and values are length-prefixed so no two different field maps
    /// share an encoding.
    pub fn from_record(record: &Record, include: impl Fn(&str) -> bool) -> Self {
        let mut hasher = Sha256::new();
        for (name, value) in record.iter().filter(|(name, _)| include(name)) {
            for part in [name, value] {
                hasher.update((part.len() as u64).to_le_bytes());
                hasher.update(part.as_bytes());
            }
        }
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Field names that are never part of the grouping key.
struct KeyExclusions {
    identity: BTreeSet<String>,
    merged: Vec<String>,
}

impl KeyExclusions {
    fn includes(&self, name: &str) -> bool {
        !name.contains(FIELD_SEPARATOR)
            && !self.identity.contains(name)
            && !self.merged.iter().any(|field| field == name)
    }
}

/// Designators and manufacturer numbers collected for one group.
#[derive(Debug, Clone, Default)]
pub struct GroupBuilder {
    refs: Vec<String>,
    manf_nums: BTreeSet<Option<String>>,
}

impl GroupBuilder {
    /// Adds a member designator.
    pub fn push(&mut self, designator: &str, record: &Record) {
        self.refs.push(designator.to_string());
        self.manf_nums.insert(manf_num(record));
    }

    /// Splits the group when its members disagree on the manufacturer number.
    ///
    /// A single number, or one number plus members without any, stays
    /// together. Otherwise every distinct number (absence included) becomes
    /// its own group, ordered by first member.
    pub fn refine(self, records: &RecordSet) -> Vec<GroupBuilder> {
        let keep = match self.manf_nums.len() {
            1 => true,
            2 => self.manf_nums.contains(&None),
            _ => false,
        };
        if keep {
            return vec![self];
        }

        debug!(
            refs = ?self.refs,
            manf_nums = self.manf_nums.len(),
            "Splitting group by manufacturer number"
        );
        let mut split: Vec<(Option<String>, GroupBuilder)> = Vec::new();
        for designator in self.refs {
            let Some(record) = records.get(&designator) else {
                continue;
            };
            let number = manf_num(record);
            let position = split.iter().position(|(key, _)| *key == number);
            let builder = match position {
                Some(idx) => &mut split[idx].1,
                None => {
                    split.push((number, GroupBuilder::default()));
                    let last = split.len() - 1;
                    &mut split[last].1
                }
            };
            builder.push(&designator, record);
        }
        split.into_iter().map(|(_, builder)| builder).collect()
    }

    /// Merges `merge_fields` and reconciles every other field of the members.
    pub fn build(self, records: &RecordSet, merge_fields: &[String]) -> Result<ComponentGroup> {
        let mut members: Vec<(&str, Record)> = self
            .refs
            .iter()
            .filter_map(|designator| {
                records
                    .get(designator)
                    .map(|record| (designator.as_str(), record.clone()))
            })
            .collect();

        for field in merge_fields {
            if let Some(composite) = merged_value(&members, field)? {
                for (_, record) in &mut members {
                    record.insert(field.clone(), composite.clone());
                }
            }
        }

        let fields = reconcile(&members)?;
        Ok(ComponentGroup {
            refs: self.refs,
            manf_nums: self.manf_nums,
            fields,
        })
    }
}

fn manf_num(record: &Record) -> Option<String> {
    non_empty(record, MANF_NUM).map(str::to_string)
}

/// Builds the line-per-value text of a merged field, if the members disagree.
///
/// Each line lists the collapsed designators holding one value:
/// `R1,R3: 1%` / `R2: 5%`. Missing values count as empty.
fn merged_value(members: &[(&str, Record)], field: &str) -> Result<Option<String>> {
    let mut occurrences: Vec<(&str, Vec<&str>)> = Vec::new();
    for (designator, record) in members {
        let value = record.get(field).map(String::as_str).unwrap_or_default();
        match occurrences.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, refs)) => refs.push(*designator),
            None => occurrences.push((value, vec![*designator])),
        }
    }
    if occurrences.len() < 2 {
        return Ok(None);
    }

    let lines = occurrences
        .iter()
        .map(|(value, refs)| {
            collapse_refs(refs).map(|collapsed| format!("{collapsed}{FIELD_SEPARATOR} {value}"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(lines.join(GROUP_LINE_SEPARATOR)))
}

/// Collects the field values of every member into one map.
///
/// The first non-empty value of a field wins; a later, different non-empty
/// value is a conflict. Empty values never conflict, in any member order.
fn reconcile(members: &[(&str, Record)]) -> Result<Record> {
    let mut fields = Record::new();
    for (designator, record) in members {
        for (name, value) in record {
            match fields.get_mut(name) {
                None => {
                    fields.insert(name.clone(), value.clone());
                }
                Some(existing) if existing.is_empty() => existing.clone_from(value),
                Some(existing) => {
                    if !value.is_empty() && existing != value {
                        return Err(OrganizeError::FieldConflict {
                            designator: (*designator).to_string(),
                            field: name.clone(),
                            value: value.clone(),
                            group_value: existing.clone(),
                        });
                    }
                }
            }
        }
    }
    Ok(fields)
}

/// Canonical merge-field names, rejecting manufacturer/distributor fields.
pub fn validate_merge_fields(
    merge_fields: &[String],
    registry: &DistributorRegistry,
) -> Result<Vec<String>> {
    let normalizer = FieldNormalizer::new(registry);
    let identity = registry.identity_fields();
    merge_fields
        .iter()
        .map(|field| {
            let canonical = normalizer.canonical(field);
            if identity.contains(&canonical) {
                Err(OrganizeError::DisallowedMergeField { field: canonical })
            } else {
                Ok(canonical)
            }
        })
        .collect()
}

/// Partitions a record set into groups of identical components.
///
/// Every designator ends up in exactly one group. Groups come out in the
/// natural order of their first member, except that the parts of a group
/// split by manufacturer number stay next to each other. Members are in
/// natural order.
pub fn group_parts(
    records: &RecordSet,
    merge_fields: &[String],
    registry: &DistributorRegistry,
) -> Result<Vec<ComponentGroup>> {
    let merge_fields = validate_merge_fields(merge_fields, registry)?;
    let exclusions = KeyExclusions {
        identity: registry.identity_fields(),
        merged: merge_fields.clone(),
    };

    let mut designators: Vec<&String> = records.keys().collect();
    designators.sort_by(|a, b| natural_cmp(a, b));

    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut provisional: Vec<GroupBuilder> = Vec::new();
    for designator in designators {
        let record = &records[designator];
        let key = GroupKey::from_record(record, |name| exclusions.includes(name));
        let slot = *index.entry(key).or_insert_with(|| {
            provisional.push(GroupBuilder::default());
            provisional.len() - 1
        });
        provisional[slot].push(designator, record);
    }
    debug!(provisional = provisional.len(), "Accumulated identical components");

    let groups = provisional
        .into_iter()
        .flat_map(|builder| builder.refine(records))
        .map(|builder| builder.build(records, &merge_fields))
        .collect::<Result<Vec<_>>>()?;

    info!(
        components = records.len(),
        groups = groups.len(),
        merged_fields = merge_fields.len(),
        "Grouped identical components"
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn entry(designator: &str, pairs: &[(&str, &str)]) -> (String, Record) {
        (designator.to_string(), record(pairs))
    }

    fn refs(groups: &[ComponentGroup]) -> Vec<Vec<&str>> {
        groups
            .iter()
            .map(|group| group.refs.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_key_ignores_excluded_fields() {
        let a = record(&[("value", "10k"), ("manf#", "A"), ("kicad:x", "1")]);
        let b = record(&[("value", "10k"), ("manf#", "B"), ("kicad:x", "2")]);
        let include = |name: &str| name == "value";
        assert_eq!(
            GroupKey::from_record(&a, include),
            GroupKey::from_record(&b, include)
        );
    }

    #[test]
    fn test_key_is_unambiguous() {
        let a = record(&[("ab", "c")]);
        let b = record(&[("a", "bc")]);
        assert_ne!(
            GroupKey::from_record(&a, |_| true),
            GroupKey::from_record(&b, |_| true)
        );
        assert_eq!(GroupKey::from_record(&a, |_| true).as_str().len(), 64);
    }

    #[test]
    fn test_identical_components_group_together() {
        let records = RecordSet::from([
            entry("R10", &[("value", "10k"), ("reference", "R")]),
            entry("R2", &[("value", "10k"), ("reference", "R")]),
            entry("R3", &[("value", "1k"), ("reference", "R")]),
        ]);
        let groups = group_parts(&records, &[], &DistributorRegistry::default()).unwrap();
        assert_eq!(refs(&groups), vec![vec!["R2", "R10"], vec!["R3"]]);
    }

    #[test]
    fn test_absent_manf_num_joins_single_number() {
        let records = RecordSet::from([
            entry("C1", &[("value", "100n"), ("manf#", "GRM188")]),
            entry("C2", &[("value", "100n")]),
        ]);
        let groups = group_parts(&records, &[], &DistributorRegistry::default()).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].fields["manf#"], "GRM188");
        assert_eq!(
            groups[0].manf_nums,
            BTreeSet::from([None, Some("GRM188".to_string())])
        );
    }

    #[test]
    fn test_two_numbers_split() {
        let records = RecordSet::from([
            entry("C1", &[("value", "100n"), ("manf#", "A")]),
            entry("C2", &[("value", "100n"), ("manf#", "B")]),
            entry("C3", &[("value", "100n"), ("manf#", "A")]),
        ]);
        let groups = group_parts(&records, &[], &DistributorRegistry::default()).unwrap();
        assert_eq!(refs(&groups), vec![vec!["C1", "C3"], vec!["C2"]]);
    }

    #[test]
    fn test_three_numbers_keep_absent_apart() {
        let records = RecordSet::from([
            entry("C1", &[("value", "100n"), ("manf#", "A")]),
            entry("C2", &[("value", "100n")]),
            entry("C3", &[("value", "100n"), ("manf#", "B")]),
        ]);
        let groups = group_parts(&records, &[], &DistributorRegistry::default()).unwrap();
        assert_eq!(refs(&groups), vec![vec!["C1"], vec!["C2"], vec!["C3"]]);
        assert_eq!(groups[1].manf_nums, BTreeSet::from([None]));
    }

    #[test]
    fn test_merge_field_composite() {
        let records = RecordSet::from([
            entry("R1", &[("value", "10k"), ("desc", "1%")]),
            entry("R2", &[("value", "10k"), ("desc", "5%")]),
            entry("R3", &[("value", "10k"), ("desc", "1%")]),
            entry("R4", &[("value", "10k")]),
        ]);
        let groups = group_parts(
            &records,
            &["Description".to_string()],
            &DistributorRegistry::default(),
        )
        .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].fields["desc"], "R1,R3: 1%\nR2: 5%\nR4: ");
    }

    #[test]
    fn test_merge_field_equal_values_untouched() {
        let records = RecordSet::from([
            entry("R1", &[("value", "10k"), ("desc", "1%")]),
            entry("R2", &[("value", "10k"), ("desc", "1%")]),
        ]);
        let groups = group_parts(&records, &["desc".to_string()], &DistributorRegistry::default())
            .unwrap();
        assert_eq!(groups[0].fields["desc"], "1%");
    }

    #[test]
    fn test_disallowed_merge_field() {
        let records = RecordSet::from([entry("R1", &[("value", "10k")])]);
        for field in ["MPN", "manf", "digikey#", "manf#_qty"] {
            let err = group_parts(&records, &[field.to_string()], &DistributorRegistry::default())
                .unwrap_err();
            assert!(
                matches!(err, OrganizeError::DisallowedMergeField { .. }),
                "field {field}"
            );
        }
    }

    #[test]
    fn test_conflicting_identity_field_is_fatal() {
        let records = RecordSet::from([
            entry("R1", &[("value", "10k"), ("manf#", "RC0603"), ("manf", "Yageo")]),
            entry("R2", &[("value", "10k"), ("manf#", "RC0603"), ("manf", "Vishay")]),
        ]);
        let err = group_parts(&records, &[], &DistributorRegistry::default()).unwrap_err();
        match err {
            OrganizeError::FieldConflict {
                designator,
                field,
                value,
                group_value,
            } => {
                assert_eq!(designator, "R2");
                assert_eq!(field, "manf");
                assert_eq!(value, "Vishay");
                assert_eq!(group_value, "Yageo");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_values_do_not_conflict() {
        let records = RecordSet::from([
            entry("R1", &[("value", "10k"), ("manf", "")]),
            entry("R2", &[("value", "10k"), ("manf", "Yageo")]),
            entry("R3", &[("value", "10k"), ("manf", "")]),
        ]);
        let groups = group_parts(&records, &[], &DistributorRegistry::default()).unwrap();
        assert_eq!(groups[0].fields["manf"], "Yageo");
    }

    #[test]
    fn test_private_fields_do_not_split() {
        let records = RecordSet::from([
            entry("R1", &[("value", "10k"), ("kicad:sheet", "1")]),
            entry("R2", &[("value", "10k"), ("kicad:sheet", "2")]),
        ]);
        let err = group_parts(&records, &[], &DistributorRegistry::default()).unwrap_err();
        // Same group, so the differing private field must be reconciled.
        assert!(matches!(err, OrganizeError::FieldConflict { .. }));
    }
}
