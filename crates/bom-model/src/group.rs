//! Groups of identical components, the unit of BOM output.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::fields::{MANF_NUM, REFERENCE, qty_field};
use crate::record::Record;

/// A maximal set of designators sharing identical non-identity fields and a
/// reconcilable manufacturer number.
///
/// Groups are produced by the grouping engine and are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentGroup {
    /// Member designators in natural order.
    pub refs: Vec<String>,
    /// Distinct `manf#` values seen among the members (`None` = absent).
    pub manf_nums: BTreeSet<Option<String>>,
    /// Field values valid for every member.
    pub fields: Record,
}

impl ComponentGroup {
    /// Number of member designators.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Returns true if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Returns a reconciled field value.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Reconciled manufacturer part number, if any.
    pub fn manf_num(&self) -> Option<&str> {
        self.field(MANF_NUM)
    }

    /// Quantity multiplier attached to the manufacturer part number.
    pub fn manf_qty(&self) -> Option<&str> {
        self.fields.get(&qty_field(MANF_NUM)).map(String::as_str)
    }

    /// Reference prefix shared by the members (`R`, `C`, ...).
    pub fn reference_prefix(&self) -> Option<&str> {
        self.field(REFERENCE)
    }
}
