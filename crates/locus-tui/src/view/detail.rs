use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use locus_core::{MetricKind, Record, RecordId, ReportStatus};

use crate::app::App;
use crate::theme::Theme;
use crate::view::truncate;

/// Render the location detail screen into the given area.
pub fn render_in(f: &mut Frame, app: &App, id: &RecordId, area: Rect, footer_area: Rect) {
    let theme = &app.theme;

    let chunks = Layout::vertical([
        Constraint::Length(1), // breadcrumb
        Constraint::Length(4), // name + address
        Constraint::Min(3),    // details
        Constraint::Length(5), // metric tiles
        Constraint::Length(3), // report
    ])
    .split(area);

    let Some(record) = app.controller.record(id.as_str()) else {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Location not found",
                Style::default().fg(theme.danger).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "  Esc: return to dashboard",
                Style::default().fg(theme.dim),
            )),
        ]);
        f.render_widget(msg, area);
        return;
    };
    let favorite = app.controller.is_favorite(id.as_str());
    let selected = app.controller.is_selected(id.as_str());

    // --- Breadcrumb ---
    let breadcrumb = Line::from(vec![
        Span::styled(" LOCUS ", theme.header_style()),
        Span::styled(" > ", Style::default().fg(theme.dim)),
        Span::styled("Locations", Style::default().fg(theme.dim)),
        Span::styled(" > ", Style::default().fg(theme.dim)),
        Span::styled(
            truncate(&record.name, 40),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(breadcrumb), chunks[0]);

    render_title(f, chunks[1], record, favorite, selected, theme);

    let details = Paragraph::new(record.detailed_info.as_str())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Location Details "),
        );
    f.render_widget(details, chunks[2]);

    render_metric_tiles(f, chunks[3], record, theme);
    render_report(f, chunks[4], record.report_status, theme);

    let footer = Line::from(Span::styled(
        " Esc:back  f:favorite  Space:select  r:generate report  v:view report  y:copy  d:delete  ?:help",
        theme.footer_style(),
    ));
    f.render_widget(Paragraph::new(footer), footer_area);
}

fn render_title(
    f: &mut Frame,
    area: Rect,
    record: &Record,
    favorite: bool,
    selected: bool,
    theme: &Theme,
) {
    let fav = if favorite {
        Span::styled(
            "\u{2605} Favorited",
            Style::default()
                .fg(theme.favorite)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("\u{2606} Add to Favorites (f)", Style::default().fg(theme.dim))
    };
    let mut title = vec![
        Span::styled(
            format!("  {}  ", record.name),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        fav,
    ];
    if selected {
        title.push(Span::styled("  [selected]", Style::default().fg(theme.selected)));
    }
    let lines = vec![
        Line::from(""),
        Line::from(title),
        Line::from(Span::styled(
            format!("  \u{1F4CD} {}", record.address),
            Style::default().fg(theme.dim),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_metric_tiles(f: &mut Frame, area: Rect, record: &Record, theme: &Theme) {
    let kinds = MetricKind::all();
    let tiles = Layout::horizontal(vec![Constraint::Ratio(1, kinds.len() as u32); kinds.len()])
        .split(area);

    for (&kind, &tile) in kinds.iter().zip(tiles.iter()) {
        let lines = match record.metric(kind) {
            Some(m) => vec![
                Line::from(Span::styled(
                    kind.format_value(m.value),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("{} {}%", m.trend.arrow(), m.percentage),
                    Style::default().fg(theme.trend_color(m.trend)),
                )),
            ],
            None => vec![Line::from(Span::styled(
                "\u{2014}",
                Style::default().fg(theme.dim),
            ))],
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(format!(" {} ", kind.label()));
        f.render_widget(Paragraph::new(lines).block(block), tile);
    }
}

fn render_report(f: &mut Frame, area: Rect, status: ReportStatus, theme: &Theme) {
    let label = match status {
        ReportStatus::Available => " View Full Report (v) ",
        ReportStatus::Pending => " Report Processing ",
        ReportStatus::None => " Generate Report (r) ",
    };
    let button = Paragraph::new(Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(label, theme.report_style(status).add_modifier(Modifier::REVERSED)),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(theme.border_style())
            .title(" Report "),
    );
    f.render_widget(button, area);
}
