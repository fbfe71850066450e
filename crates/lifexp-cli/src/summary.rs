use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use lifexp_model::Region;

use crate::commands::CleanResult;

pub fn print_summary(result: &CleanResult) {
    println!("Region: {} ({})", result.region.code(), result.region.name());
    println!("Source: {} [{}]", result.source, result.format);
    println!("{}", stage_table(result));
    println!("Output: {}", result.written.path.display());
    println!("SHA-256: {}", result.written.sha256);
}

fn stage_table(result: &CleanResult) -> Table {
    let counts = &result.counts;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows"), header_cell("Note")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let year_note = if counts.year_columns > 0 {
        format!("{} year columns", counts.year_columns)
    } else {
        "already long".to_string()
    };
    table.add_row(vec![Cell::new("load"), Cell::new(counts.raw_rows), dim_cell("")]);
    table.add_row(vec![
        Cell::new("preprocess"),
        Cell::new(counts.split_rows),
        dim_cell(""),
    ]);
    table.add_row(vec![
        Cell::new("reshape"),
        Cell::new(counts.long_rows),
        dim_cell(year_note),
    ]);
    table.add_row(vec![
        Cell::new("filter")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(counts.final_rows),
        dim_cell(result.region.code()),
    ]);
    table
}

/// Renders the region set, marking aggregates.
pub fn region_table(regions: &[Region]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Name"), header_cell("Kind")]);
    apply_table_style(&mut table);
    for region in regions {
        let kind = if region.is_aggregate() {
            Cell::new("aggregate").fg(Color::Yellow)
        } else {
            dim_cell("country")
        };
        table.add_row(vec![
            Cell::new(region.code()).add_attribute(Attribute::Bold),
            Cell::new(region.name()),
            kind,
        ]);
    }
    table
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::Yellow)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
