use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use locus_core::BulkAction;

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::Search => map_key_search(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        MouseEventKind::Down(MouseButton::Left) => Action::ClickAt(mouse.column, mouse.row),
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Enter => Action::DrillIn,
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::Char('g') => Action::GoTop,
        KeyCode::Char('G') => Action::GoBottom,
        KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => Action::NextPage,
        KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Action::PrevPage,
        KeyCode::Home => Action::FirstPage,
        KeyCode::End => Action::LastPage,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char(' ') => Action::ToggleSelect,
        KeyCode::Char('a') if ctrl => Action::SelectAllFiltered,
        KeyCode::Char('a') => Action::SelectAllVisible,
        KeyCode::Char('A') => Action::SelectAllFiltered,
        KeyCode::Char('x') => Action::ClearSelection,
        KeyCode::Char('f') => Action::ToggleFavorite,
        KeyCode::Char('o') | KeyCode::Tab => Action::ToggleExpand,
        KeyCode::Char('D') => Action::Bulk(BulkAction::Delete),
        KeyCode::Char('S') => Action::Bulk(BulkAction::Favorite),
        KeyCode::Char('E') => Action::Bulk(BulkAction::Edit),
        KeyCode::Char('Y') => Action::Bulk(BulkAction::Copy),
        KeyCode::Char('d') => Action::DeleteRow,
        KeyCode::Char('i') => Action::EditRow,
        KeyCode::Char('y') => Action::CopyRow,
        KeyCode::Char('r') => Action::CreateReport,
        KeyCode::Char('v') => Action::ViewReport,
        KeyCode::Char('e') => Action::Export,
        KeyCode::Char('t') => Action::CycleTheme,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

fn map_key_search(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::SearchCancel,
        KeyCode::Enter => Action::SearchConfirm,
        KeyCode::Char(c) => Action::SearchInput(c),
        KeyCode::Backspace => Action::SearchInput('\x08'), // sentinel for backspace
        _ => Action::None,
    }
}
