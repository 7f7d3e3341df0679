use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use locus_core::{BulkAction, MetricKind, ReportStatus, RowView, TableView};

use crate::app::{App, InputMode};
use crate::theme::Theme;
use crate::view::truncate;

/// Render the location table screen into the given area.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect, footer_area: Rect) {
    let theme = &app.theme;
    let view = app.controller.view();

    let has_search =
        app.input_mode == InputMode::Search || !app.controller.search_term().is_empty();
    let has_bulk = view.show_bulk_actions();

    let mut constraints = vec![Constraint::Length(1)]; // header
    if has_search {
        constraints.push(Constraint::Length(1)); // search bar
    }
    if has_bulk {
        constraints.push(Constraint::Length(1)); // bulk bar
    }
    constraints.push(Constraint::Min(5)); // table
    constraints.push(Constraint::Length(1)); // page line

    let chunks = Layout::vertical(constraints).split(area);
    let mut chunk_idx = 0;

    render_header(f, chunks[chunk_idx], app, &view, theme);
    chunk_idx += 1;

    if has_search {
        render_search_bar(f, chunks[chunk_idx], app, theme);
        chunk_idx += 1;
    }
    if has_bulk {
        render_bulk_bar(f, chunks[chunk_idx], app, &view, theme);
        chunk_idx += 1;
    }

    let table_area = chunks[chunk_idx];
    render_table(f, table_area, app, &view, theme);
    chunk_idx += 1;

    render_page_line(f, chunks[chunk_idx], &view, theme);
    render_footer(f, footer_area, theme);

    drop(view);
    app.last_table_area = Some(table_area);
}

fn render_header(f: &mut Frame, area: Rect, app: &App, view: &TableView<'_>, theme: &Theme) {
    let spans = vec![
        Span::styled(" LOCUS ", theme.header_style()),
        Span::styled(
            " Location Dashboard",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  Showing {} of {} locations",
                view.filtered_count, view.total_count
            ),
            Style::default().fg(theme.dim),
        ),
        Span::styled(
            format!("  \u{2605} {}", view.favorite_count),
            Style::default().fg(theme.favorite),
        ),
        Span::styled(
            format!("  [{}]", app.source_label),
            Style::default().fg(theme.dim),
        ),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_search_bar(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let cursor = if app.input_mode == InputMode::Search {
        "\u{2588}"
    } else {
        ""
    };
    let line = Line::from(vec![
        Span::styled(
            " /",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            app.controller.search_term().to_string(),
            Style::default().fg(theme.text),
        ),
        Span::styled(cursor, Style::default().fg(theme.active)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_bulk_bar(f: &mut Frame, area: Rect, app: &App, view: &TableView<'_>, theme: &Theme) {
    let mut spans = vec![Span::styled(
        format!(" {} selected ", view.selected_count),
        Style::default()
            .fg(theme.header_fg)
            .bg(theme.selected)
            .add_modifier(Modifier::BOLD),
    )];
    for &action in BulkAction::all() {
        if !app.controller.options().allows(action) {
            continue;
        }
        let key = match action {
            BulkAction::Delete => "D",
            BulkAction::Favorite => "S",
            BulkAction::Edit => "E",
            BulkAction::Copy => "Y",
        };
        let style = if action.is_destructive() {
            Style::default().fg(theme.danger)
        } else {
            Style::default().fg(theme.text)
        };
        spans.push(Span::styled(format!("  {key}:"), Style::default().fg(theme.dim)));
        spans.push(Span::styled(action.label(), style));
    }
    spans.push(Span::styled("  x:clear", Style::default().fg(theme.dim)));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn metric_cell<'a>(row: &RowView<'_>, kind: MetricKind, theme: &Theme) -> Cell<'a> {
    match row.record.metric(kind) {
        Some(m) => Cell::from(Line::from(vec![
            Span::styled(kind.format_value(m.value), Style::default().fg(theme.text)),
            Span::styled(
                format!(" {}{}%", m.trend.arrow(), m.percentage),
                Style::default().fg(theme.trend_color(m.trend)),
            ),
        ])),
        None => Cell::from("\u{2014}").style(Style::default().fg(theme.dim)),
    }
}

fn report_cell<'a>(status: ReportStatus, tick: usize, theme: &Theme) -> Cell<'a> {
    let text = match status {
        ReportStatus::Available => "View report".to_string(),
        ReportStatus::Pending => format!("{} Generating", spinner_char(tick)),
        ReportStatus::None => "Create report".to_string(),
    };
    Cell::from(text).style(theme.report_style(status))
}

/// Spinner frame for animated progress indication.
fn spinner_char(tick: usize) -> char {
    const FRAMES: &[char] = &[
        '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}',
        '\u{2827}', '\u{2807}', '\u{280F}',
    ];
    FRAMES[tick % FRAMES.len()]
}

fn render_table(f: &mut Frame, area: Rect, app: &App, view: &TableView<'_>, theme: &Theme) {
    let wide = area.width >= 110;
    let name_width = if wide { 34 } else { 24 };

    let check_all = if view.all_visible_selected {
        "[x]"
    } else {
        "[ ]"
    };
    let mut header_cells = vec![check_all, "", "Location"];
    if wide {
        header_cells.extend(MetricKind::all().iter().map(|k| k.label()));
    }
    header_cells.push("Report");
    let header = Row::new(header_cells.into_iter().map(|h| {
        Cell::from(h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
    }))
    .height(1);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .map(|row| {
            let record = row.record;
            let check = if row.selected { "[x]" } else { "[ ]" };
            let check_style = if row.selected {
                Style::default().fg(theme.selected)
            } else {
                Style::default().fg(theme.dim)
            };
            let star = if row.favorite { "\u{2605}" } else { "\u{2606}" };
            let star_style = if row.favorite {
                Style::default().fg(theme.favorite)
            } else {
                Style::default().fg(theme.dim)
            };

            let mut name_lines = vec![Line::from(vec![
                Span::styled(
                    truncate(&record.name, name_width),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", truncate(&record.address, name_width)),
                    Style::default().fg(theme.dim),
                ),
            ])];
            if row.expanded {
                name_lines.push(Line::from(Span::styled(
                    truncate(&record.detailed_info, name_width * 2),
                    Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
                )));
            }

            let mut cells = vec![
                Cell::from(check).style(check_style),
                Cell::from(star).style(star_style),
                Cell::from(Text::from(name_lines)),
            ];
            if wide {
                cells.extend(
                    MetricKind::all()
                        .iter()
                        .map(|&kind| metric_cell(row, kind, theme)),
                );
            }
            cells.push(report_cell(record.report_status, app.tick, theme));

            let mut r = Row::new(cells).height(if row.expanded { 2 } else { 1 });
            if row.selected {
                r = r.style(Style::default().fg(theme.text));
            }
            r
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(4), // checkbox
        Constraint::Length(2), // star
        Constraint::Min(30),   // name + address
    ];
    if wide {
        widths.extend([
            Constraint::Length(14), // visitors
            Constraint::Length(14), // revenue
            Constraint::Length(12), // engagement
            Constraint::Length(12), // satisfaction
        ]);
    }
    widths.push(Constraint::Length(14)); // report

    let title = if view.is_empty() {
        " No locations match your search ".to_string()
    } else {
        format!(" Locations {}-{} ", view.page.start_index + 1, view.page.end_index)
    };

    let table = Table::new(rows, &widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(title),
        )
        .row_highlight_style(theme.highlight_style());

    let mut state = TableState::default();
    if !view.is_empty() {
        state.select(Some(app.cursor.min(view.rows.len() - 1)));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn render_page_line(f: &mut Frame, area: Rect, view: &TableView<'_>, theme: &Theme) {
    let page = &view.page;
    let arrow = |enabled: bool, s: &'static str| {
        if enabled {
            Span::styled(s, Style::default().fg(theme.active))
        } else {
            Span::styled(s, Style::default().fg(theme.dim))
        }
    };
    let line = Line::from(vec![
        arrow(page.has_prev(), " \u{2190} "),
        Span::styled(
            format!("Page {} of {}", page.effective_page, page.total_pages),
            Style::default().fg(theme.text),
        ),
        arrow(page.has_next(), " \u{2192}"),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_footer(f: &mut Frame, area: Rect, theme: &Theme) {
    let footer = Line::from(Span::styled(
        " Space:select  a:select page  f:favorite  o:expand  Enter:open  /:search  r:report  e:export  ?:help  q:quit",
        theme.footer_style(),
    ));
    f.render_widget(Paragraph::new(footer), area);
}
