//! Spreadsheet quantity formulas.

use bom_model::ComponentGroup;

/// Builds the quantity formula of a group.
///
/// `{}` is left in place for the spreadsheet writer to substitute with the
/// number of boards. A `manf#_qty` multiplier other than `1` rounds the
/// product up to whole parts.
pub fn subpart_qty(group: &ComponentGroup) -> String {
    let count = group.len();
    match group.manf_qty() {
        Some(qty) if qty != "1" => format!("=CEILING({{}}*({qty})*{count},1)"),
        _ => format!("={{}}*{count}"),
    }
}
