//! Options controlling how a record set is organized.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distributor::DistributorRegistry;
use crate::error::{OrganizeError, Result};
use crate::fields::DEFAULT_BOM_ORDER;

/// Options for `bom_core::organize_parts`.
///
/// Every key is optional in a TOML file:
///
/// ```toml
/// variant = "prod"
/// merge_fields = ["desc", "footprint"]
/// bom_order = "u,q,d,c,r"
/// distributors = ["digikey", "mouser"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizeOptions {
    /// Active variant, matched case-insensitively as a regular expression
    /// against the start of each variant a component is assigned to.
    /// Empty matches every variant.
    pub variant: String,

    /// Fields merged into one line-per-value text instead of splitting
    /// otherwise identical components into separate groups.
    pub merge_fields: Vec<String>,

    /// Comma-separated reference prefixes giving the group order.
    pub bom_order: String,

    /// Distributors whose code fields are recognized.
    pub distributors: DistributorRegistry,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            variant: String::new(),
            merge_fields: Vec::new(),
            bom_order: DEFAULT_BOM_ORDER.to_string(),
            distributors: DistributorRegistry::default(),
        }
    }
}

impl OrganizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| OrganizeError::Config {
            message: format!("failed to read {}: {err}", path.display()),
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    pub fn with_merge_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.merge_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_bom_order(mut self, order: impl Into<String>) -> Self {
        self.bom_order = order.into();
        self
    }

    pub fn with_distributors(mut self, distributors: DistributorRegistry) -> Self {
        self.distributors = distributors;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = OrganizeOptions::default();
        assert!(options.variant.is_empty());
        assert!(options.merge_fields.is_empty());
        assert_eq!(options.bom_order, DEFAULT_BOM_ORDER);
    }

    #[test]
    fn test_from_toml_partial() {
        let options = OrganizeOptions::from_toml_str(
            r#"
            variant = "prod"
            distributors = ["Mouser"]
            "#,
        )
        .unwrap();
        assert_eq!(options.variant, "prod");
        assert_eq!(options.bom_order, DEFAULT_BOM_ORDER);
        assert_eq!(options.distributors.names().collect::<Vec<_>>(), vec!["mouser"]);
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        assert!(OrganizeOptions::from_toml_str("merge_fields = 3").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = OrganizeOptions::load(Path::new("/nonexistent/bomgroup.toml")).unwrap_err();
        assert!(matches!(err, OrganizeError::Config { .. }));
    }

    #[test]
    fn test_builders() {
        let options = OrganizeOptions::new()
            .with_variant("v1")
            .with_merge_fields(["desc"])
            .with_bom_order("r,c")
            .with_distributors(DistributorRegistry::new(["lcsc"]));
        assert_eq!(options.variant, "v1");
        assert_eq!(options.merge_fields, vec!["desc".to_string()]);
        assert_eq!(options.bom_order, "r,c");
        assert_eq!(options.distributors.names().collect::<Vec<_>>(), vec!["lcsc"]);
    }
}
