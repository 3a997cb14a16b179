//! Registry of the distributors whose catalog codes may appear in records.
//!
//! Each distributor contributes a `<name>#` code field (and its `_qty`
//! sibling) to the vocabulary. The registry is supplied by the distributor
//! lookup collaborator and read-only during processing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::fields::{MANF, MANF_NUM, qty_field};

/// Distributors known when no registry is configured.
pub const DEFAULT_DISTRIBUTORS: &[&str] = &[
    "arrow", "digikey", "farnell", "lcsc", "mouser", "newark", "rs", "tme",
];

/// Ordered, de-duplicated list of lower-case distributor names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct DistributorRegistry {
    names: Vec<String>,
}

impl Default for DistributorRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_DISTRIBUTORS.iter().copied())
    }
}

impl From<Vec<String>> for DistributorRegistry {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<DistributorRegistry> for Vec<String> {
    fn from(registry: DistributorRegistry) -> Self {
        registry.names
    }
}

impl DistributorRegistry {
    /// Creates a registry from distributor names (trimmed, lower-cased).
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let names = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty() && seen.insert(name.clone()))
            .collect();
        Self { names }
    }

    /// Distributor names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of registered distributors.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no distributor is registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Code field of every distributor (`digikey#`, `mouser#`, ...).
    pub fn code_fields(&self) -> Vec<String> {
        self.names.iter().map(|name| format!("{name}#")).collect()
    }

    /// Fields that carry part identity: manufacturer name and code, every
    /// distributor code and their quantity siblings.
    ///
    /// These always take part in splitting groups and can never be merged.
    pub fn identity_fields(&self) -> BTreeSet<String> {
        let mut fields = BTreeSet::from([
            MANF_NUM.to_string(),
            qty_field(MANF_NUM),
            MANF.to_string(),
        ]);
        for code in self.code_fields() {
            fields.insert(qty_field(&code));
            fields.insert(code);
        }
        fields
    }

    /// Manufacturer code field followed by every distributor code field, the
    /// fields whose values may hold several sub-part codes.
    pub fn part_code_fields(&self) -> Vec<String> {
        let mut fields = self.code_fields();
        fields.push(MANF_NUM.to_string());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_names() {
        let registry = DistributorRegistry::new([" Mouser", "digikey", "MOUSER", ""]);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["mouser", "digikey"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_identity_fields() {
        let registry = DistributorRegistry::new(["mouser"]);
        let fields = registry.identity_fields();
        let expected: BTreeSet<String> = ["manf#", "manf#_qty", "manf", "mouser#", "mouser#_qty"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        assert_eq!(fields, expected);
    }

    #[test]
    fn test_part_code_fields_end_with_manf() {
        let registry = DistributorRegistry::new(["digikey", "mouser"]);
        assert_eq!(
            registry.part_code_fields(),
            vec!["digikey#", "mouser#", "manf#"]
        );
    }

    #[test]
    fn test_default_has_common_distributors() {
        let registry = DistributorRegistry::default();
        assert!(registry.names().any(|name| name == "digikey"));
        assert!(registry.names().any(|name| name == "mouser"));
    }
}
