//! Terminal rendering of a report as comfy-table tables

use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::consts::TOTAL;
use crate::core::{CostSummary, PivotTable, SummaryRow};
use crate::utils::format::{format_cost, format_percent};

use super::Report;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    pub(crate) use_color: bool,
}

pub(crate) fn print_report(report: &Report, options: TableOptions) {
    println!("\n  {}\n", report.meta.title);

    print_pivot(&report.breakdown, options);
    if let Some(comparison) = &report.comparison {
        print_pivot(comparison, options);
    }
    print_summary(
        &report.summary,
        report.meta.dimension.column_name(),
        &report.meta.summary_title,
        options,
    );
    print_top(report.top(), report.meta.dimension.column_name(), options);
    print_meta(report);
}

fn print_pivot(pivot: &PivotTable, options: TableOptions) {
    println!("  {}\n", pivot.title);
    if pivot.is_empty() {
        println!("  (no cost data)\n");
        return;
    }

    let mut table = new_table();
    let mut header = vec![header_cell(pivot.period_header, options.use_color)];
    header.extend(
        pivot
            .columns
            .iter()
            .map(|column| header_cell(column, options.use_color)),
    );
    table.set_header(header);

    for row in &pivot.rows {
        let mut cells = vec![Cell::new(&row.bucket.label)];
        for cell in &row.cells {
            cells.push(match cell {
                Some(cost) => right_cell(&format_cost(*cost), None, false),
                // Absent means no activity, not zero spend
                None => Cell::new(""),
            });
        }
        table.add_row(cells);
    }

    println!("{table}\n");
}

fn print_summary(summary: &CostSummary, dimension: &str, title: &str, options: TableOptions) {
    println!("  {title}\n");

    let cyan = options.use_color.then_some(Color::Cyan);
    let green = options.use_color.then_some(Color::Green);

    let mut table = new_table();
    table.set_header(vec![
        header_cell(dimension, options.use_color),
        header_cell("Total Cost", options.use_color),
        header_cell("Percentage", options.use_color),
    ]);

    for row in &summary.rows {
        table.add_row(vec![
            Cell::new(&row.dimension_value),
            right_cell(&format_cost(row.total_cost), None, false),
            right_cell(&format_percent(row.percentage), None, false),
        ]);
    }

    let grand_share = if summary.grand_total > 0.0 { 1.0 } else { 0.0 };
    table.add_row(vec![
        styled_cell(TOTAL, cyan, true),
        right_cell(&format_cost(summary.grand_total), green, true),
        right_cell(&format_percent(grand_share), cyan, true),
    ]);

    println!("{table}\n");
}

fn print_top(top: &[SummaryRow], dimension: &str, options: TableOptions) {
    if top.is_empty() {
        return;
    }
    println!("  Top {} Cost Drivers\n", top.len());

    let mut table = new_table();
    table.set_header(vec![
        header_cell(dimension, options.use_color),
        header_cell("Cost", options.use_color),
        header_cell("Percentage", options.use_color),
    ]);
    for row in top {
        table.add_row(vec![
            Cell::new(&row.dimension_value),
            right_cell(&format_cost(row.total_cost), None, false),
            right_cell(&format_percent(row.percentage), None, false),
        ]);
    }
    println!("{table}\n");
}

fn print_meta(report: &Report) {
    let meta = &report.meta;
    println!(
        "  Report generated: {}",
        meta.generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Report period:    {} to {}",
        meta.range.start, meta.range.end
    );
    println!("  Grouped by:       {}", meta.dimension.column_name());
    println!("  Granularity:      {}", meta.granularity.adjective());
    match &meta.currency {
        Some(currency) => println!(
            "  Total cost:       {} ({currency})",
            format_cost(report.summary.grand_total)
        ),
        None => println!(
            "  Total cost:       {}",
            format_cost(report.summary.grand_total)
        ),
    }
    println!();
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

fn styled_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    styled_cell(text, color, bold).set_alignment(CellAlignment::Right)
}

fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}
