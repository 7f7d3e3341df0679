use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;
use crate::view::centered_rect;

/// Render the quit confirmation dialog as a centered popup.
///
/// `pending_reports` is shown so the user knows in-flight reports will be dropped.
pub fn render(f: &mut Frame, theme: &Theme, pending_reports: usize) {
    let area = f.area();
    let popup = centered_rect(44, if pending_reports > 0 { 6 } else { 5 }, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Quit locus?",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
    ];
    if pending_reports > 0 {
        lines.push(Line::from(Span::styled(
            format!("  {pending_reports} report(s) still generating"),
            Style::default().fg(theme.report_pending),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled(
            "  q",
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": quit   ", Style::default().fg(theme.dim)),
        Span::styled(
            "Esc",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": cancel", Style::default().fg(theme.dim)),
    ]));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.danger))
            .title(" Confirm Quit "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
