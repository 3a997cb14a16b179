//! Grouping, ordering and reference utilities for BOM part organization.
//!
//! [`organize_parts`] runs the whole pipeline on a parsed record set. The
//! individual stages and the per-group helpers are public as well:
//!
//! - [`group_parts`]: partition records into groups of identical components
//! - [`groups_sort`]: order groups by reference prefix
//! - [`subpart_qty`]: spreadsheet quantity formula of a group
//! - [`collapse_refs`] / [`expand_refs`]: `R1,R2,R3` ⇄ `R1-R3`

pub mod grouping;
pub mod pipeline;
pub mod quantity;
pub mod refs;
pub mod sort;

pub use grouping::{GroupBuilder, GroupKey, group_parts, validate_merge_fields};
pub use pipeline::organize_parts;
pub use quantity::subpart_qty;
pub use refs::{collapse_refs, expand_refs};
pub use sort::groups_sort;
