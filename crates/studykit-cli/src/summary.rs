use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::commands::ValidateResult;

pub fn print_summary(result: &ValidateResult) {
    println!("Study: {}", result.study_id);
    if let Some(path) = &result.report_path {
        println!("Validation report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Resource"),
        header_cell("Localizations"),
        header_cell("Base"),
        header_cell("Issues"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for family in &result.report.families {
        let localizations = family
            .localizations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(family.reference.to_string()),
            Cell::new(localizations),
            Cell::new(family.base.to_string()),
            Cell::new(family.issues.len().to_string()),
        ]);
    }
    println!("{table}");

    for failure in &result.report.failures {
        println!("failed: {}: {}", failure.reference, failure.error);
    }
    if result.report.issue_count() > 0 {
        println!();
        println!("{}", result.report.render_issues());
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
