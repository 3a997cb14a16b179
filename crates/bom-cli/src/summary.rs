use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use bom_cli::types::GroupRow;
use bom_model::fields::{MANF, VALUE};

const FOOTPRINT: &str = "footprint";

pub fn print_groups(rows: &[GroupRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Refs"),
        header_cell("Count"),
        header_cell("Value"),
        header_cell("Footprint"),
        header_cell("Manf"),
        header_cell("Manf#"),
        header_cell("Qty"),
    ]);
    apply_group_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    let mut total = 0usize;
    for row in rows {
        total += row.count;
        table.add_row(vec![
            refs_cell(&row.collapsed_refs),
            Cell::new(row.count),
            text_cell(row.group.field(VALUE)),
            text_cell(row.group.field(FOOTPRINT)),
            text_cell(row.group.field(MANF)),
            manf_num_cell(row.group.manf_num()),
            dim_cell(&row.qty),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
        Cell::new(format!("{} groups", rows.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_list(header: &str, items: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell(header)]);
    apply_table_style(&mut table);
    for item in items {
        table.add_row(vec![Cell::new(item)]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_group_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(15)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn refs_cell(refs: &str) -> Cell {
    Cell::new(refs)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn manf_num_cell(manf_num: Option<&str>) -> Cell {
    match manf_num {
        Some(value) => Cell::new(value),
        None => Cell::new("missing").fg(Color::Yellow),
    }
}

fn text_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
