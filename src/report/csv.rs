//! CSV rendering of a report
//!
//! One section per named table, separated by a blank line and introduced
//! by a `# Title` line — the flat-file analog of the workbook's sheets.

use std::fmt::Write;

use crate::consts::TOTAL;
use crate::core::{CostSummary, PivotTable};

use super::Report;

pub(crate) fn report_csv(report: &Report) -> String {
    let mut out = String::new();

    section(&mut out, &report.breakdown.title);
    out.push_str(&pivot_csv(&report.breakdown));

    if let Some(comparison) = &report.comparison {
        out.push('\n');
        section(&mut out, &comparison.title);
        out.push_str(&pivot_csv(comparison));
    }

    out.push('\n');
    section(&mut out, &report.meta.summary_title);
    out.push_str(&summary_csv(
        &report.summary,
        report.meta.dimension.column_name(),
    ));

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "# {title}");
}

fn pivot_csv(pivot: &PivotTable) -> String {
    let mut out = String::new();
    let mut header = vec![pivot.period_header.to_string()];
    header.extend(pivot.columns.iter().map(|c| csv_escape(c)));
    let _ = writeln!(out, "{}", header.join(","));

    for row in &pivot.rows {
        let mut fields = vec![csv_escape(&row.bucket.label)];
        for cell in &row.cells {
            fields.push(match cell {
                Some(cost) => format!("{cost:.2}"),
                None => String::new(),
            });
        }
        let _ = writeln!(out, "{}", fields.join(","));
    }
    out
}

fn summary_csv(summary: &CostSummary, dimension: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{dimension},total_cost,percentage");
    for row in &summary.rows {
        let _ = writeln!(
            out,
            "{},{:.2},{:.4}",
            csv_escape(&row.dimension_value),
            row.total_cost,
            row.percentage
        );
    }
    let grand_share = if summary.grand_total > 0.0 { 1.0 } else { 0.0 };
    let _ = writeln!(
        out,
        "{TOTAL},{:.2},{grand_share:.4}",
        summary.grand_total
    );
    out
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
