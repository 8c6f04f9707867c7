//! Report rendering: the tall (human) layout and the tabular layout
//! suited for concatenating many sources into one flat file. Both read
//! the same `ColumnReport` snapshots, so their distinct counts and
//! frequency contents always agree.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::stats::{ColumnReport, DistinctCount, TableStats};

/// Shared column labels of the tabular report, appended after any
/// caller-supplied prefix labels.
pub const TABULAR_LABELS: [&str; 14] = [
    "Column name",
    "Column index",
    "Data type",
    "Empty count",
    "Nonempty count",
    "Density",
    "Max length str",
    "Min length str",
    "Max number",
    "Min number",
    "Max date",
    "Min date",
    "Unique count",
    "Unique values",
];

/// Multi-line report for direct display: row count, the configured
/// distinct-value cap, then one section per column in index order.
pub fn tall_report(table: &TableStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Row count = {}", table.row_count());
    let _ = writeln!(out, "Note: unique value limit = {}", table.unique_max());
    for column in table.columns() {
        render_tall_column(&mut out, &column.report());
    }
    out
}

fn render_tall_column(out: &mut String, report: &ColumnReport) {
    let _ = match &report.name {
        Some(name) => writeln!(out, "Column '{}' (index {})", name, report.index),
        None => writeln!(out, "Column (index {})", report.index),
    };
    let _ = writeln!(out, "\tData type      = {}", report.datatype);
    let _ = writeln!(out, "\tEmpty count    = {}", report.empty);
    let _ = writeln!(out, "\tNonempty count = {}", report.nonempty);
    let _ = writeln!(out, "\tDensity        = {}", format_density(report.density));
    if let (Some(max), Some(min)) = (report.max_length, report.min_length) {
        let _ = writeln!(out, "\tMax length str = {max}");
        let _ = writeln!(out, "\tMin length str = {min}");
    }
    if let (Some(max), Some(min)) = (report.max_number, report.min_number) {
        let _ = writeln!(out, "\tMax number     = {}", format_number(max));
        let _ = writeln!(out, "\tMin number     = {}", format_number(min));
    }
    if let (Some(max), Some(min)) = (report.max_date, report.min_date) {
        let _ = writeln!(out, "\tMax date       = {}", max.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(out, "\tMin date       = {}", min.format("%Y-%m-%d %H:%M:%S"));
    }
    match report.distinct {
        DistinctCount::Exact(count) => {
            let _ = writeln!(out, "\tUnique count   = {count}");
            if let Some(frequencies) = &report.frequencies {
                let _ = writeln!(out, "\tUnique values  = {}", render_frequencies(frequencies));
            }
        }
        DistinctCount::OverLimit(cap) => {
            let _ = writeln!(out, "\tUnique count   > {cap}");
        }
    }
}

/// Header row of the tabular report: caller prefix labels first (for
/// example source name and index), then the shared column labels.
pub fn tabular_header(prefix: &[String]) -> Vec<String> {
    prefix
        .iter()
        .cloned()
        .chain(TABULAR_LABELS.iter().map(|label| label.to_string()))
        .collect()
}

/// One tabular row per column, each led by the caller-supplied constant
/// prefix fields. Absent bounds render as empty fields; an overflowed
/// frequency map renders as `Unknown`.
pub fn tabular_rows(table: &TableStats, prefix: &[String]) -> Vec<Vec<String>> {
    table
        .columns()
        .iter()
        .map(|column| {
            let report = column.report();
            let mut row: Vec<String> = prefix.to_vec();
            row.push(report.name.clone().unwrap_or_default());
            row.push(report.index.to_string());
            row.push(report.datatype.to_string());
            row.push(report.empty.to_string());
            row.push(report.nonempty.to_string());
            row.push(format_density(report.density));
            row.push(render_bound(report.max_length, |v| v.to_string()));
            row.push(render_bound(report.min_length, |v| v.to_string()));
            row.push(render_bound(report.max_number, format_number));
            row.push(render_bound(report.min_number, format_number));
            row.push(render_bound(report.max_date, |v| {
                v.format("%Y-%m-%d %H:%M:%S").to_string()
            }));
            row.push(render_bound(report.min_date, |v| {
                v.format("%Y-%m-%d %H:%M:%S").to_string()
            }));
            row.push(report.distinct.to_string());
            row.push(match &report.frequencies {
                Some(frequencies) => render_frequencies(frequencies),
                None => "Unknown".to_string(),
            });
            row
        })
        .collect()
}

fn render_bound<T>(bound: Option<T>, render: impl Fn(T) -> String) -> String {
    bound.map(render).unwrap_or_default()
}

fn render_frequencies(frequencies: &BTreeMap<String, u64>) -> String {
    // BTreeMap serializes in key order, keeping the field deterministic.
    serde_json::to_string(frequencies).unwrap_or_default()
}

fn format_density(density: Option<f64>) -> String {
    match density {
        Some(value) => format!("{value:.6}"),
        None => "n/a".to_string(),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}
