//! Data model for BOM part organization.
//!
//! Records extracted from schematics and BOMs are plain field maps keyed by
//! designator. This crate defines those maps, the canonical field vocabulary,
//! the distributor registry, the groups produced by organization and the
//! options and errors shared by the processing crates.

pub mod designator;
pub mod distributor;
pub mod error;
pub mod fields;
pub mod group;
pub mod options;
pub mod record;

pub use designator::{
    compare_designator_lists, designator_prefix, natural_cmp, sort_designators, subpart_designator,
};
pub use distributor::{DEFAULT_DISTRIBUTORS, DistributorRegistry};
pub use error::{OrganizeError, Result};
pub use group::ComponentGroup;
pub use options::OrganizeOptions;
pub use record::{Record, RecordSet, local_or_global, non_empty};
