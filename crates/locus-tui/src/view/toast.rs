use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::model::toast::{ToastLevel, ToastState};
use crate::theme::Theme;

const TOAST_WIDTH: u16 = 42;
const TOAST_HEIGHT: u16 = 5;

/// Stack active toasts in the bottom-right corner, newest at the bottom.
pub fn render(f: &mut Frame, toasts: &ToastState, theme: &Theme) {
    let area = f.area();
    if toasts.is_empty() || area.width < TOAST_WIDTH + 2 {
        return;
    }

    let mut bottom = area.y + area.height.saturating_sub(1);
    for toast in toasts.iter().collect::<Vec<_>>().into_iter().rev() {
        if bottom < area.y + TOAST_HEIGHT {
            break;
        }
        let rect = Rect {
            x: area.x + area.width - TOAST_WIDTH - 1,
            y: bottom - TOAST_HEIGHT,
            width: TOAST_WIDTH,
            height: TOAST_HEIGHT,
        };
        bottom -= TOAST_HEIGHT;

        let accent = match toast.level {
            ToastLevel::Info => theme.active,
            ToastLevel::Warning => theme.report_pending,
        };
        let lines = vec![
            Line::from(Span::styled(
                toast.title.as_str(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                toast.description.as_str(),
                Style::default().fg(theme.text),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(accent)),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(Clear, rect);
        f.render_widget(paragraph, rect);
    }
}
