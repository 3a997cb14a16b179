//! Presentation order of component groups.

use bom_model::fields::{MANF_NUM, REFERENCE};
use bom_model::{ComponentGroup, compare_designator_lists, non_empty};
use tracing::debug;

/// Splits a comma-separated priority list into lower-case categories.
fn categories(bom_order: &str) -> Vec<String> {
    bom_order
        .split(',')
        .map(|category| category.trim().to_lowercase())
        .filter(|category| !category.is_empty())
        .collect()
}

fn in_category(slot: &Option<ComponentGroup>, category: &str) -> bool {
    slot.as_ref()
        .and_then(|group| group.field(REFERENCE))
        .is_some_and(|reference| reference.to_lowercase() == category)
}

/// Orders groups by reference prefix following `bom_order` (`"u,q,d,c,r"`).
///
/// Within one prefix, groups with a manufacturer number come first, then
/// groups are ordered by their designator lists in natural order. Groups with
/// a prefix not in the list, or without any, keep their relative order at the
/// end.
pub fn groups_sort(groups: Vec<ComponentGroup>, bom_order: &str) -> Vec<ComponentGroup> {
    let mut remaining: Vec<Option<ComponentGroup>> = groups.into_iter().map(Some).collect();
    let mut sorted = Vec::with_capacity(remaining.len());

    for category in categories(bom_order) {
        let mut matched: Vec<ComponentGroup> = remaining
            .iter_mut()
            .filter(|slot| in_category(slot, &category))
            .filter_map(Option::take)
            .collect();
        if matched.is_empty() {
            continue;
        }
        debug!(category = %category, groups = matched.len(), "Sorted groups for prefix");
        matched.sort_by(|a, b| {
            let a_missing = non_empty(&a.fields, MANF_NUM).is_none();
            let b_missing = non_empty(&b.fields, MANF_NUM).is_none();
            a_missing
                .cmp(&b_missing)
                .then_with(|| compare_designator_lists(&a.refs, &b.refs))
        });
        sorted.extend(matched);
    }

    sorted.extend(remaining.into_iter().flatten());
    sorted
}
