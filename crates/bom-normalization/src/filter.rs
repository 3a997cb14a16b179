//! Do-not-populate and variant filtering.
//!
//! A component is dropped when it is flagged DNP or when it is assigned to
//! variants none of which is the active one. Components without a variant
//! assignment belong to every variant.

use bom_model::fields::{DNP, VARIANT};
use bom_model::{OrganizeError, RecordSet, Result, local_or_global};
use regex::{Regex, RegexBuilder};
use tracing::{debug, info};

/// Compiled active-variant pattern.
#[derive(Debug, Clone)]
pub struct VariantFilter {
    pattern: Regex,
}

impl VariantFilter {
    /// Compiles the active variant pattern.
    ///
    /// The pattern is case-insensitive and anchored at the start of each
    /// listed variant; an empty pattern accepts everything.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(&format!("^(?:{pattern})"))
            .case_insensitive(true)
            .build()
            .map_err(|source| OrganizeError::InvalidVariantPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self { pattern })
    }

    /// Returns true if any variant of a `,;/ `-separated list matches.
    pub fn accepts(&self, variants: &str) -> bool {
        variants
            .split([',', ';', '/', ' '])
            .any(|variant| self.pattern.is_match(variant))
    }
}

/// Returns true if a DNP flag value means "do not populate".
///
/// Numbers count when non-zero; any other non-empty text counts as set.
pub fn dnp_flag_set(value: &str) -> bool {
    match value.trim().parse::<f64>() {
        Ok(number) => number != 0.0,
        Err(_) => !value.is_empty(),
    }
}

/// Removes DNP components and components not assigned to the active variant.
///
/// Per-instance `local:` fields take precedence over the general ones.
pub fn remove_dnp_parts(records: RecordSet, filter: &VariantFilter) -> RecordSet {
    let total = records.len();
    let accepted: RecordSet = records
        .into_iter()
        .filter(|(designator, record)| {
            if local_or_global(record, DNP).is_some_and(dnp_flag_set) {
                debug!(designator = %designator, "Dropping do-not-populate part");
                return false;
            }
            match local_or_global(record, VARIANT) {
                Some(variants) if !variants.is_empty() && !filter.accepts(variants) => {
                    debug!(
                        designator = %designator,
                        variants = %variants,
                        "Dropping part outside the active variant"
                    );
                    false
                }
                _ => true,
            }
        })
        .collect();
    info!(
        total,
        kept = accepted.len(),
        removed = total - accepted.len(),
        "Filtered DNP and variant parts"
    );
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use bom_model::Record;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_dnp_flag_values() {
        assert!(dnp_flag_set("1"));
        assert!(dnp_flag_set(" 2.5 "));
        assert!(dnp_flag_set("yes"));
        assert!(!dnp_flag_set("0"));
        assert!(!dnp_flag_set("0.0"));
        assert!(!dnp_flag_set(""));
    }

    #[test]
    fn test_variant_prefix_match() {
        let filter = VariantFilter::new("prod").unwrap();
        assert!(filter.accepts("PROD"));
        assert!(filter.accepts("test,production"));
        assert!(!filter.accepts("test;debug"));
        assert!(!filter.accepts("preprod"));
    }

    #[test]
    fn test_empty_pattern_accepts_all() {
        let filter = VariantFilter::new("").unwrap();
        assert!(filter.accepts("anything"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = VariantFilter::new("(").unwrap_err();
        assert!(matches!(err, OrganizeError::InvalidVariantPattern { .. }));
    }

    #[test]
    fn test_remove_dnp_parts() {
        let mut records = RecordSet::new();
        records.insert("R1".to_string(), record(&[("value", "10k")]));
        records.insert("R2".to_string(), record(&[("dnp", "1")]));
        records.insert("R3".to_string(), record(&[("dnp", "1"), ("local:dnp", "0")]));
        records.insert("R4".to_string(), record(&[("variant", "debug")]));
        records.insert("R5".to_string(), record(&[("variant", "debug/prod")]));
        records.insert("R6".to_string(), record(&[("variant", "")]));
        records.insert(
            "R7".to_string(),
            record(&[("variant", "prod"), ("local:variant", "debug")]),
        );

        let filter = VariantFilter::new("prod").unwrap();
        let kept = remove_dnp_parts(records, &filter);
        let designators: Vec<&str> = kept.keys().map(String::as_str).collect();
        assert_eq!(designators, vec!["R1", "R3", "R5", "R6"]);
    }
}
