mod backend;
mod update;
mod util;
use util::*;

use std::collections::HashSet;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use locus_core::{
    ControllerError, CoreError, InMemoryStore, Record, RecordId, RowController, TableOptions,
};

use crate::export::ExportRow;
use crate::model::toast::ToastState;
use crate::theme::Theme;
use crate::tui_event::BackendCommand;
use crate::view::export::{ExportScope, ExportState};

#[cfg(test)]
mod tests;

/// Which screen is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Table,
    Detail(RecordId),
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub theme: Theme,
    /// The mutable record store; the controller is re-fed from it after every change.
    pub store: InMemoryStore,
    pub controller: RowController,
    /// Row index within the current page.
    pub cursor: usize,
    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,
    pub toasts: ToastState,
    pub export_state: ExportState,
    /// Reports requested from the backend and not yet finished.
    pub pending_reports: HashSet<RecordId>,
    /// Channel to send commands to the report service.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
    /// Last table area rendered (for mouse click → row mapping).
    pub last_table_area: Option<Rect>,
    /// Whether copies are also sent to the terminal clipboard (OSC 52).
    pub clipboard: bool,
    /// Text of the most recent copy action.
    pub last_copied: Option<String>,
    /// Where the records came from, shown in the header.
    pub source_label: String,
}

impl App {
    pub fn new(store: InMemoryStore, options: TableOptions, theme: Theme) -> Result<Self, CoreError> {
        let controller = RowController::new(store.snapshot(), options)?;
        Ok(Self {
            screen: Screen::Table,
            input_mode: InputMode::Normal,
            theme,
            store,
            controller,
            cursor: 0,
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            toasts: ToastState::default(),
            export_state: ExportState::default(),
            pending_reports: HashSet::new(),
            backend_cmd_tx: None,
            last_table_area: None,
            clipboard: false,
            last_copied: None,
            source_label: "mock".to_string(),
        })
    }

    /// Id of the record the cursor (or the detail screen) points at.
    pub fn current_id(&self) -> Option<RecordId> {
        match &self.screen {
            Screen::Detail(id) => Some(id.clone()),
            Screen::Table => self.controller.visible_ids().get(self.cursor).cloned(),
        }
    }

    pub fn current_record(&self) -> Option<&Record> {
        let id = self.current_id()?;
        self.controller.record(id.as_str())
    }

    /// Number of rows on the current page.
    pub fn page_len(&self) -> usize {
        self.controller.page_window().len()
    }

    pub(crate) fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.page_len().saturating_sub(1));
    }

    /// Re-feed the controller from the store after a store mutation.
    pub(crate) fn refresh_records(&mut self) {
        if let Err(e) = self.controller.replace_records(self.store.snapshot()) {
            tracing::error!(error = %e, "record store rejected by controller");
            self.toasts.warn("Data error", e.to_string());
        }
        if let Screen::Detail(id) = &self.screen
            && self.controller.record(id.as_str()).is_none()
        {
            self.screen = Screen::Table;
        }
        self.clamp_cursor();
    }

    /// Log and surface a non-fatal controller error.
    pub(crate) fn report_error(&mut self, err: ControllerError) {
        tracing::warn!(error = %err, "action rejected");
        let title = match err {
            ControllerError::UnknownRecord { .. } => "Unknown location",
            ControllerError::ActionDisabled { .. } => "Not available",
        };
        self.toasts.warn(title, err.to_string());
    }

    /// Records in the given export scope, with their session favorite flag.
    pub fn export_rows(&self, scope: ExportScope) -> Vec<ExportRow<'_>> {
        let wanted: Option<HashSet<RecordId>> = match scope {
            ExportScope::Filtered => None,
            ExportScope::Selected => Some(self.controller.selected_ids().into_iter().collect()),
        };
        let term = self.controller.search_term().to_string();
        locus_core::filter(self.controller.records(), &term)
            .into_iter()
            .filter(|r| wanted.as_ref().is_none_or(|w| w.contains(&r.id)))
            .map(|record| ExportRow {
                record,
                favorite: self.controller.is_favorite(record.id.as_str()),
            })
            .collect()
    }

    /// Render the entire UI.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        // Split footer row out first so it spans the full terminal width.
        let footer_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: 1.min(area.height),
        };
        let body_area = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };

        // Clone screen to avoid borrow conflict with &mut self
        let screen = self.screen.clone();
        match screen {
            Screen::Table => crate::view::table::render_in(f, self, body_area, footer_area),
            Screen::Detail(id) => {
                crate::view::detail::render_in(f, self, &id, body_area, footer_area)
            }
        }

        if self.export_state.active {
            crate::view::export::render(f, self);
        }
        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme, self.pending_reports.len());
        }
        crate::view::toast::render(f, &self.toasts, &self.theme);
    }
}
