use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use locus_core::{Metric, MetricKind, Record, RecordId, ReportStatus, Trend};

use crate::view::export::ExportFormat;

/// A record as exported, with the favorite flag the session currently shows.
#[derive(Debug, Clone, Copy)]
pub struct ExportRow<'a> {
    pub record: &'a Record,
    pub favorite: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonLocation<'a> {
    id: &'a RecordId,
    name: &'a str,
    address: &'a str,
    detailed_info: &'a str,
    metrics: &'a BTreeMap<MetricKind, Metric>,
    report_status: ReportStatus,
    is_favorite: bool,
}

/// Export rows to the given path in `format`.
pub fn export_records(rows: &[ExportRow<'_>], format: ExportFormat, path: &Path) -> Result<(), String> {
    let content = render(rows, format)?;

    let mut file =
        std::fs::File::create(path).map_err(|e| format!("Failed to create file: {}", e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| format!("Failed to write: {}", e))?;
    tracing::info!(path = %path.display(), count = rows.len(), format = format.label(), "exported locations");
    Ok(())
}

/// Render rows to a string in `format`.
pub fn render(rows: &[ExportRow<'_>], format: ExportFormat) -> Result<String, String> {
    match format {
        ExportFormat::Json => export_json(rows),
        ExportFormat::Csv => Ok(export_csv(rows)),
        ExportFormat::Markdown => Ok(export_markdown(rows)),
    }
}

fn export_json(rows: &[ExportRow<'_>]) -> Result<String, String> {
    let locations: Vec<JsonLocation<'_>> = rows
        .iter()
        .map(|row| JsonLocation {
            id: &row.record.id,
            name: &row.record.name,
            address: &row.record.address,
            detailed_info: &row.record.detailed_info,
            metrics: &row.record.metrics,
            report_status: row.record.report_status,
            is_favorite: row.favorite,
        })
        .collect();
    serde_json::to_string_pretty(&locations).map_err(|e| format!("Failed to serialize: {}", e))
}

fn csv_escape(s: &str) -> String {
    if s.contains('"') || s.contains(',') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn sign(trend: Trend) -> char {
    match trend {
        Trend::Up => '+',
        Trend::Down => '-',
    }
}

/// Raw value and signed change, e.g. `"1234,+5"`, or two empty cells.
fn csv_metric(record: &Record, kind: MetricKind) -> String {
    match record.metric(kind) {
        Some(m) => format!("{},{}{}", m.value, sign(m.trend), m.percentage),
        None => ",".to_string(),
    }
}

fn export_csv(rows: &[ExportRow<'_>]) -> String {
    let mut out = String::from("Id,Name,Address");
    for kind in MetricKind::all() {
        out.push_str(&format!(",{0},{0} Change %", kind.label()));
    }
    out.push_str(",Report,Favorite\n");

    for row in rows {
        let r = row.record;
        out.push_str(&format!(
            "{},{},{}",
            csv_escape(r.id.as_str()),
            csv_escape(&r.name),
            csv_escape(&r.address),
        ));
        for &kind in MetricKind::all() {
            out.push(',');
            out.push_str(&csv_metric(r, kind));
        }
        out.push_str(&format!(",{},{}\n", r.report_status.label(), row.favorite));
    }
    out
}

fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
}

fn md_metric(record: &Record, kind: MetricKind) -> String {
    match record.metric(kind) {
        Some(m) => format!(
            "{} {} {}%",
            kind.format_value(m.value),
            m.trend.arrow(),
            m.percentage
        ),
        None => "\u{2014}".to_string(),
    }
}

fn export_markdown(rows: &[ExportRow<'_>]) -> String {
    let mut out = String::from("# Locations\n\n");
    let favorites = rows.iter().filter(|r| r.favorite).count();
    out.push_str(&format!(
        "{} locations, {} favorites.\n\n",
        rows.len(),
        favorites
    ));

    out.push_str("| | Location | Address |");
    for kind in MetricKind::all() {
        out.push_str(&format!(" {} |", kind.label()));
    }
    out.push_str(" Report |\n|---|---|---|");
    for _ in MetricKind::all() {
        out.push_str("---|");
    }
    out.push_str("---|\n");

    for row in rows {
        let r = row.record;
        let star = if row.favorite { "\u{2605}" } else { "" };
        out.push_str(&format!(
            "| {} | {} | {} |",
            star,
            md_escape(&r.name),
            md_escape(&r.address)
        ));
        for &kind in MetricKind::all() {
            out.push_str(&format!(" {} |", md_metric(r, kind)));
        }
        out.push_str(&format!(" {} |\n", r.report_status.label()));
    }
    out
}
