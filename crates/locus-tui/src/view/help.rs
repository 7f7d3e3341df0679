use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;
use crate::view::centered_rect;

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup = centered_rect(64, 40, area);

    let lines = vec![
        Line::from(Span::styled(
            " Keyboard Shortcuts ",
            Style::default()
                .fg(theme.header_fg)
                .bg(theme.header_bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section_header("Navigation", theme),
        key_line("j / \u{2193}", "Move down", theme),
        key_line("k / \u{2191}", "Move up", theme),
        key_line("l / \u{2192} / PgDn", "Next page", theme),
        key_line("h / \u{2190} / PgUp", "Previous page", theme),
        key_line("Home / End", "First / last page", theme),
        key_line("g / G", "Top / bottom of page", theme),
        key_line("Enter", "Open location details", theme),
        key_line("Esc", "Go back / cancel search", theme),
        Line::from(""),
        section_header("Selection", theme),
        key_line("Space", "Select / deselect row", theme),
        key_line("a", "Select all on page", theme),
        key_line("A / Ctrl+a", "Select all matching", theme),
        key_line("x", "Clear selection", theme),
        key_line("/", "Search name or address", theme),
        Line::from(""),
        section_header("Row actions", theme),
        key_line("f", "Toggle favorite", theme),
        key_line("o / Tab", "Expand / collapse details", theme),
        key_line("r", "Create report", theme),
        key_line("v", "View report", theme),
        key_line("i / y / d", "Edit / copy / delete", theme),
        Line::from(""),
        section_header("Bulk actions (selection)", theme),
        key_line("S", "Star selected", theme),
        key_line("E / Y", "Edit / copy selected", theme),
        key_line("D", "Delete selected", theme),
        Line::from(""),
        section_header("Global", theme),
        key_line("e", "Export", theme),
        key_line("t", "Switch theme", theme),
        key_line("?", "Toggle this help", theme),
        key_line("q", "Quit", theme),
        key_line("Ctrl+c", "Force quit", theme),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {key:<20}"), Style::default().fg(theme.text)),
        Span::styled(desc, Style::default().fg(theme.dim)),
    ])
}
