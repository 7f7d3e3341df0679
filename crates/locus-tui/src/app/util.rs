use std::io::Write;

use locus_core::{MetricKind, Record};

/// Copy text to the system clipboard via OSC 52 escape sequence.
/// Works in Ghostty, iTerm2, kitty, WezTerm, and most modern terminals.
pub(super) fn osc52_copy(text: &str) {
    use base64::Engine;
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    // Write directly to stdout, bypassing the terminal backend buffer
    let _ = std::io::stdout().write_all(format!("\x1b]52;c;{}\x07", encoded).as_bytes());
    let _ = std::io::stdout().flush();
}

/// Plain-text summary of one record, one metric per line.
pub(super) fn record_summary(record: &Record) -> String {
    let mut out = format!("{}\n{}\n", record.name, record.address);
    for &kind in MetricKind::all() {
        if let Some(m) = record.metric(kind) {
            out.push_str(&format!(
                "{}: {} ({}{}%)\n",
                kind.label(),
                kind.format_value(m.value),
                m.trend.arrow(),
                m.percentage
            ));
        }
    }
    out
}

/// Summaries of several records separated by blank lines.
pub(super) fn records_summary<'a>(records: impl IntoIterator<Item = &'a Record>) -> String {
    records
        .into_iter()
        .map(record_summary)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default export file stem: `locations-<timestamp>` in the working directory.
pub(super) fn export_default_path() -> String {
    let now = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("locations-{now}")
}
