use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::App;
use crate::view::centered_rect;

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Json, ExportFormat::Csv, ExportFormat::Markdown]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Csv => "CSV",
            Self::Markdown => "Markdown",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "md",
        }
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|&f| f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

/// Which records to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    /// Every record matching the current search, across all pages.
    Filtered,
    /// Only the selected records.
    Selected,
}

impl ExportScope {
    pub fn label(self) -> &'static str {
        match self {
            Self::Filtered => "All matching locations",
            Self::Selected => "Selected locations",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Filtered => Self::Selected,
            Self::Selected => Self::Filtered,
        }
    }
}

/// State for the export modal.
#[derive(Debug, Clone)]
pub struct ExportState {
    pub active: bool,
    pub format: ExportFormat,
    pub scope: ExportScope,
    /// Output path without extension.
    pub output_path: String,
    pub cursor: usize, // 0=format, 1=scope, 2=confirm
    pub message: Option<String>,
}

impl Default for ExportState {
    fn default() -> Self {
        Self {
            active: false,
            format: ExportFormat::Json,
            scope: ExportScope::Filtered,
            output_path: "locations".to_string(),
            cursor: 0,
            message: None,
        }
    }
}

impl ExportState {
    pub const LAST_ITEM: usize = 2;

    /// Full output file name, including the format's extension.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.output_path, self.format.extension())
    }
}

/// Render the export modal overlay.
pub fn render(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let export = &app.export_state;
    let area = f.area();
    let popup = centered_rect(56, 13, area);

    let mut lines = vec![
        Line::from(Span::styled(
            " Export Locations ",
            Style::default()
                .fg(theme.header_fg)
                .bg(theme.header_bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let indicator = |i: usize| if export.cursor == i { "> " } else { "  " };

    lines.push(Line::from(vec![
        Span::styled(
            format!("  {}Format:  ", indicator(0)),
            Style::default().fg(theme.text),
        ),
        Span::styled(export.format.label(), Style::default().fg(theme.active)),
    ]));
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {}Scope:   ", indicator(1)),
            Style::default().fg(theme.text),
        ),
        Span::styled(export.scope.label(), Style::default().fg(theme.active)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("    Output:  ", Style::default().fg(theme.text)),
        Span::styled(export.file_name(), Style::default().fg(theme.dim)),
    ]));

    lines.push(Line::from(""));

    let confirm_style = if export.cursor == 2 {
        Style::default()
            .fg(theme.header_fg)
            .bg(theme.active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.active)
    };
    lines.push(Line::from(vec![
        Span::styled("          ", Style::default()),
        Span::styled(" Export ", confirm_style),
    ]));

    if let Some(msg) = &export.message {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", msg),
            Style::default().fg(theme.trend_up),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  j/k:navigate  Enter:select/cycle  Esc:cancel",
        Style::default().fg(theme.dim),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.active))
            .title(" Export "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
