//! Error types for BOM part organization.

use thiserror::Error;

/// Errors that stop the organization of a record set.
///
/// There is no partial-success mode: any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum OrganizeError {
    // === Grouping Errors ===
    /// A manufacturer/distributor identity field was requested for merging.
    #[error(
        "manufacturer/distributor code and manufacturer name field \"{field}\" can't be ignored to create the component groups"
    )]
    DisallowedMergeField { field: String },

    /// Two members of one group disagree on a non-mergeable field.
    ///
    /// Only two different non-empty values conflict. An empty or missing
    /// value never does, whatever the member order, so a member without
    /// `manf` joins a group whose other members name one.
    #[error("field value mismatch: ref={designator} field={field} value='{value}' group='{group_value}'")]
    FieldConflict {
        designator: String,
        field: String,
        value: String,
        group_value: String,
    },

    /// A sub-part designator (`U1#1`) is also present as an input designator.
    #[error("designator {designator} appears both as a sub-part and as an input component")]
    DuplicateDesignator { designator: String },

    // === Reference Errors ===
    /// A designator contains characters the reference pattern does not accept.
    #[error("unrecognized characters used in <{reference}> reference, edit it in your BOM/schematic")]
    UnrecognizedReference { reference: String },

    /// A reference range whose bounds are not integers.
    #[error("invalid reference range '{token}'")]
    InvalidReferenceRange { token: String },

    // === Configuration Errors ===
    /// The active variant pattern is not a valid regular expression.
    #[error("invalid variant pattern '{pattern}': {source}")]
    InvalidVariantPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Options could not be parsed.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl From<toml::de::Error> for OrganizeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

/// Result type for organization operations.
pub type Result<T> = std::result::Result<T, OrganizeError>;
