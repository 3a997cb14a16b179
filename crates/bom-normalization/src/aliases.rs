//! Field-name normalization.
//!
//! Designers spell the same field many ways (`MPN`, `Mfr#`, `Manufacturer`,
//! `Digikey_PN`, ...). Every alias maps to one canonical name; names that are
//! not aliases pass through lower-cased.

use std::collections::HashMap;
use std::sync::LazyLock;

use bom_model::fields::{DESC, DNP, FIELD_SEPARATOR, MANF, MANF_NUM, VARIANT};
use bom_model::{DistributorRegistry, Record, RecordSet};
use tracing::warn;

/// Aliases of the manufacturer part number.
const MANF_NUM_ALIASES: &[&str] = &[
    "mpn", "pn", "manf_num", "manf-num", "mfg_num", "mfg-num", "mfg#", "man_num", "man-num",
    "man#", "mnf_num", "mnf-num", "mnf#", "mfr_num", "mfr-num", "mfr#", "part-num", "part_num",
    "p#", "part#",
];

/// Aliases of the manufacturer name.
const MANF_ALIASES: &[&str] = &["manf", "manufacturer", "mnf", "man", "mfg", "mfr"];

/// Suffixes combined with each distributor name (`digikey_pn`, `mouser-vp#`).
const DISTRIBUTOR_STUBS: &[&str] = &["part#", "#", "p#", "pn", "vendor#", "vp#", "vpn", "num"];

/// Joiners placed between a distributor name and a stub.
const DISTRIBUTOR_JOINERS: &[&str] = &["", "_", "-"];

static DEFAULT_NORMALIZER: LazyLock<FieldNormalizer> =
    LazyLock::new(|| FieldNormalizer::new(&DistributorRegistry::default()));

/// Case-insensitive alias table built for a distributor registry.
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    aliases: HashMap<String, String>,
}

impl FieldNormalizer {
    /// Builds the alias table for the given distributors.
    pub fn new(registry: &DistributorRegistry) -> Self {
        let mut aliases = HashMap::new();
        for alias in MANF_NUM_ALIASES {
            aliases.insert((*alias).to_string(), MANF_NUM.to_string());
        }
        for alias in MANF_ALIASES {
            aliases.insert((*alias).to_string(), MANF.to_string());
        }
        for stub in DISTRIBUTOR_STUBS {
            for distributor in registry.names() {
                for joiner in DISTRIBUTOR_JOINERS {
                    aliases.insert(format!("{distributor}{joiner}{stub}"), format!("{distributor}#"));
                }
            }
        }
        for (alias, canonical) in [
            ("variant", VARIANT),
            ("version", VARIANT),
            ("dnp", DNP),
            ("nopop", DNP),
            ("description", DESC),
        ] {
            aliases.insert(alias.to_string(), canonical.to_string());
        }
        Self { aliases }
    }

    /// Shared normalizer for the default distributor registry.
    pub fn default_instance() -> &'static Self {
        &DEFAULT_NORMALIZER
    }

    /// Returns the canonical form of a field name.
    ///
    /// Tool-private names keep their namespace and only the part after the
    /// last separator is translated (`Local:Version` → `local:variant`).
    pub fn canonical(&self, name: &str) -> String {
        let lowered = name.trim().to_lowercase();
        match lowered.rsplit_once(FIELD_SEPARATOR) {
            Some((namespace, field)) => {
                format!("{namespace}{FIELD_SEPARATOR}{}", self.translate(field))
            }
            None => self.translate(&lowered),
        }
    }

    fn translate(&self, lowered: &str) -> String {
        self.aliases
            .get(lowered)
            .cloned()
            .unwrap_or_else(|| lowered.to_string())
    }

    /// Rewrites every key of a record to its canonical name.
    ///
    /// When several keys collapse onto the same name the first non-empty
    /// value wins.
    pub fn normalize_record(&self, record: &Record) -> Record {
        let mut normalized = Record::new();
        for (name, value) in record {
            let canonical = self.canonical(name);
            match normalized.get_mut(&canonical) {
                None => {
                    normalized.insert(canonical, value.clone());
                }
                Some(existing) if existing.is_empty() => *existing = value.clone(),
                Some(existing) => {
                    if !value.is_empty() && existing != value {
                        warn!(
                            field = %canonical,
                            kept = %existing,
                            ignored = %value,
                            "Conflicting values for aliased field"
                        );
                    }
                }
            }
        }
        normalized
    }

    /// Normalizes the field names of every record in a set.
    pub fn normalize_record_set(&self, records: &RecordSet) -> RecordSet {
        records
            .iter()
            .map(|(designator, record)| (designator.clone(), self.normalize_record(record)))
            .collect()
    }
}

/// Canonical field name using the default distributor registry.
pub fn canonical_field_name(name: &str) -> String {
    DEFAULT_NORMALIZER.canonical(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manufacturer_code_aliases() {
        for alias in ["MPN", "Mfr#", "part_num", "P#", "manf#"] {
            assert_eq!(canonical_field_name(alias), "manf#", "alias {alias}");
        }
    }

    #[test]
    fn test_manufacturer_name_aliases() {
        for alias in ["Manufacturer", "MFG", "mnf", "manf"] {
            assert_eq!(canonical_field_name(alias), "manf", "alias {alias}");
        }
    }

    #[test]
    fn test_distributor_cross_product() {
        let normalizer = FieldNormalizer::new(&DistributorRegistry::new(["mouser"]));
        for alias in ["mouser#", "Mouser_PN", "mouser-vp#", "MOUSERVPN", "mouser_num"] {
            assert_eq!(normalizer.canonical(alias), "mouser#", "alias {alias}");
        }
        // Unregistered distributors are plain fields.
        assert_eq!(normalizer.canonical("digikey_pn"), "digikey_pn");
    }

    #[test]
    fn test_other_aliases() {
        assert_eq!(canonical_field_name("Version"), "variant");
        assert_eq!(canonical_field_name("NOPOP"), "dnp");
        assert_eq!(canonical_field_name("Description"), "desc");
    }

    #[test]
    fn test_unknown_passes_through_lowercased() {
        assert_eq!(canonical_field_name("Footprint"), "footprint");
        assert_eq!(canonical_field_name("  Value "), "value");
    }

    #[test]
    fn test_namespaced_fields() {
        assert_eq!(canonical_field_name("local:Version"), "local:variant");
        assert_eq!(canonical_field_name("KiCad:Footprint"), "kicad:footprint");
    }

    #[test]
    fn test_normalize_record_first_non_empty_wins() {
        let normalizer = FieldNormalizer::default_instance();
        let record: Record = [("MPN", ""), ("manf#", "RC0603"), ("pn", "OTHER")]
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let normalized = normalizer.normalize_record(&record);
        assert_eq!(normalized.len(), 1);
        // Keys are visited in map order: "MPN", "manf#", "pn".
        assert_eq!(normalized["manf#"], "RC0603");
    }
}
