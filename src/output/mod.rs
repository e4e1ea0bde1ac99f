pub mod report;

use crate::record::{PredictionRecord, RecordRow, TABLE_COLUMNS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut parts = Vec::with_capacity(cells.len());
    for (cell, width) in cells.iter().zip(widths) {
        let width = *width;
        parts.push(format!("{cell:<width$}"));
    }
    parts.join("  ").trim_end().to_string()
}

fn separator(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("  ")
}

fn header_widths() -> Vec<usize> {
    TABLE_COLUMNS.iter().map(|c| c.chars().count()).collect()
}

fn header_block(widths: &[usize]) -> String {
    let header: Vec<String> = TABLE_COLUMNS.iter().map(|c| c.to_string()).collect();
    format!("{}\n{}", format_row(&header, widths), separator(widths))
}

/// Header plus a single message row spanning every column.
fn table_with_notice(message: &str) -> String {
    let widths = header_widths();
    let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let mut out = header_block(&widths);
    out.push('\n');
    out.push_str(&format!("{message:^total$}").trim_end().to_string());
    out.push('\n');
    out
}

/// Renders one row per record in fixed column order. Zero records render a
/// single informational row rather than an empty table.
pub fn render_table_text(records: &[PredictionRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| RecordRow::from_record(r).render_cells())
        .collect();
    if rows.is_empty() {
        return table_with_notice("No records found");
    }

    let mut widths = header_widths();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = header_block(&widths);
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }
    out
}

/// Listing failure: one error row spanning all columns.
pub fn render_error_table(message: &str) -> String {
    table_with_notice(&format!("Error loading data: {message}"))
}

pub fn render_json(records: &[PredictionRecord]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}
