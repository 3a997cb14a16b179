//! Component organization pipeline with explicit stages.
//!
//! The stages run in this order:
//! 1. **Normalize**: Map aliased field names to the canonical vocabulary
//! 2. **Filter**: Drop do-not-populate parts and parts of other variants
//! 3. **Split**: Expand multi-code designators into sub-parts
//! 4. **Group**: Partition identical components into groups
//! 5. **Sort**: Order groups by reference prefix
//!
//! Each stage takes the output of the previous one.

use std::time::Instant;

use bom_model::{ComponentGroup, OrganizeOptions, RecordSet, Result};
use bom_normalization::{FieldNormalizer, VariantFilter, remove_dnp_parts, subpart_split};
use tracing::{debug, info, info_span};

use crate::grouping::{group_parts, validate_merge_fields};
use crate::sort::groups_sort;

/// Organizes a parsed record set into ordered groups of identical parts.
///
/// Configuration errors (invalid variant pattern, disallowed merge field)
/// are reported before any record is processed.
pub fn organize_parts(records: &RecordSet, options: &OrganizeOptions) -> Result<Vec<ComponentGroup>> {
    let span = info_span!(
        "organize",
        components = records.len(),
        variant = %options.variant
    );
    let _guard = span.enter();
    let start = Instant::now();

    let registry = &options.distributors;
    let filter = VariantFilter::new(&options.variant)?;
    validate_merge_fields(&options.merge_fields, registry)?;

    let normalized = info_span!("normalize")
        .in_scope(|| FieldNormalizer::new(registry).normalize_record_set(records));
    debug!(components = normalized.len(), "normalized field names");

    let accepted = info_span!("filter").in_scope(|| remove_dnp_parts(normalized, &filter));
    let split = info_span!("split").in_scope(|| subpart_split(accepted, registry))?;
    let groups = info_span!("group")
        .in_scope(|| group_parts(&split, &options.merge_fields, registry))?;
    let sorted = info_span!("sort").in_scope(|| groups_sort(groups, &options.bom_order));

    info!(
        components = records.len(),
        groups = sorted.len(),
        duration_ms = start.elapsed().as_millis(),
        "organization complete"
    );
    Ok(sorted)
}
