use bom_core::{collapse_refs, subpart_qty};
use bom_model::{ComponentGroup, Result};
use serde::Serialize;

/// One output line: an organized group with its presentation columns.
#[derive(Debug, Serialize)]
pub struct GroupRow {
    pub collapsed_refs: String,
    pub count: usize,
    pub qty: String,
    #[serde(flatten)]
    pub group: ComponentGroup,
}

impl GroupRow {
    pub fn from_group(group: ComponentGroup) -> Result<Self> {
        Ok(Self {
            collapsed_refs: collapse_refs(&group.refs)?,
            count: group.len(),
            qty: subpart_qty(&group),
            group,
        })
    }
}

/// Builds the output rows, keeping the group order.
pub fn build_rows(groups: Vec<ComponentGroup>) -> Result<Vec<GroupRow>> {
    groups.into_iter().map(GroupRow::from_group).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use bom_model::Record;

    use super::*;

    #[test]
    fn test_row_columns() {
        let mut fields = Record::new();
        fields.insert("manf#_qty".to_string(), "2".to_string());
        let group = ComponentGroup {
            refs: vec!["R1".to_string(), "R2".to_string(), "R3".to_string()],
            manf_nums: BTreeSet::from([None]),
            fields,
        };
        let row = GroupRow::from_group(group).unwrap();
        assert_eq!(row.collapsed_refs, "R1-R3");
        assert_eq!(row.count, 3);
        assert_eq!(row.qty, "=CEILING({}*(2)*3,1)");
    }
}
