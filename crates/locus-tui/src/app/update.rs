use std::path::PathBuf;
use std::time::Instant;

use locus_core::{ActionResult, BulkAction, NoticeKey, RowAction};

use super::{App, InputMode, Screen};
use crate::action::Action;
use crate::tui_event::BackendCommand;
use crate::view::export::ExportState;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        if let Action::Tick = action {
            self.tick = self.tick.wrapping_add(1);
            self.toasts.expire(Instant::now());
            return false;
        }

        // Quit confirmation modal: q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    if !self.pending_reports.is_empty() {
                        self.send(BackendCommand::CancelAll);
                    }
                    return true;
                }
                Action::NavigateBack => {
                    self.confirm_quit = false;
                }
                _ => {}
            }
            return false;
        }

        // Export modal intercepts
        if self.export_state.active {
            self.handle_export_action(action);
            return false;
        }

        // Help overlay: any key closes it
        if self.show_help {
            match action {
                Action::Quit => self.confirm_quit = true,
                Action::Resize(..) | Action::None => {}
                _ => self.show_help = false,
            }
            return false;
        }

        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::ToggleHelp => {
                self.show_help = true;
            }
            Action::CycleTheme => {
                self.theme = self.theme.next();
                tracing::debug!(theme = self.theme.name, "theme changed");
            }
            Action::MoveDown => {
                if self.screen == Screen::Table {
                    let len = self.page_len();
                    if len > 0 {
                        self.cursor = (self.cursor + 1).min(len - 1);
                    }
                }
            }
            Action::MoveUp => {
                if self.screen == Screen::Table {
                    self.cursor = self.cursor.saturating_sub(1);
                }
            }
            Action::GoTop => {
                self.cursor = 0;
            }
            Action::GoBottom => {
                self.cursor = self.page_len().saturating_sub(1);
            }
            Action::NextPage => {
                if self.screen == Screen::Table {
                    self.controller.next_page();
                    self.cursor = 0;
                }
            }
            Action::PrevPage => {
                if self.screen == Screen::Table {
                    self.controller.prev_page();
                    self.cursor = 0;
                }
            }
            Action::FirstPage => {
                if self.screen == Screen::Table {
                    self.controller.first_page();
                    self.cursor = 0;
                }
            }
            Action::LastPage => {
                if self.screen == Screen::Table {
                    self.controller.last_page();
                    self.cursor = 0;
                }
            }
            Action::DrillIn => {
                if self.screen == Screen::Table
                    && let Some(id) = self.current_id()
                {
                    self.screen = Screen::Detail(id);
                }
            }
            Action::NavigateBack => match self.screen {
                Screen::Detail(_) => {
                    self.screen = Screen::Table;
                    self.clamp_cursor();
                }
                Screen::Table => {
                    if !self.controller.search_term().is_empty() {
                        self.controller.set_search_term("");
                        self.cursor = 0;
                    }
                }
            },
            Action::StartSearch => {
                if self.screen == Screen::Table {
                    self.input_mode = InputMode::Search;
                }
            }
            Action::SearchInput(c) => {
                let mut term = self.controller.search_term().to_string();
                if c == '\x08' {
                    term.pop();
                } else {
                    term.push(c);
                }
                self.controller.set_search_term(term);
                self.cursor = 0;
            }
            Action::SearchConfirm => {
                self.input_mode = InputMode::Normal;
            }
            Action::SearchCancel => {
                self.input_mode = InputMode::Normal;
                self.controller.set_search_term("");
                self.cursor = 0;
            }
            Action::ToggleSelect => {
                if let Some(id) = self.current_id()
                    && let Err(e) = self.controller.toggle_selected(id.as_str())
                {
                    self.report_error(e);
                }
            }
            Action::SelectAllVisible => {
                if self.screen == Screen::Table {
                    self.controller.select_all_visible();
                }
            }
            Action::SelectAllFiltered => {
                if self.screen == Screen::Table {
                    self.controller.select_all_filtered();
                }
            }
            Action::ClearSelection => {
                self.controller.clear_selection();
            }
            Action::ToggleFavorite => self.row_action(RowAction::ToggleFavorite),
            Action::ToggleExpand => {
                if self.screen == Screen::Table
                    && let Some(id) = self.current_id()
                    && let Err(e) = self.controller.toggle_expanded(id.as_str())
                {
                    self.report_error(e);
                }
            }
            Action::Bulk(bulk) => self.bulk_action(bulk),
            Action::DeleteRow => self.row_action(RowAction::Delete),
            Action::EditRow => self.row_action(RowAction::Edit),
            Action::CopyRow => self.row_action(RowAction::Copy),
            Action::CreateReport => self.create_report(),
            Action::ViewReport => self.view_report(),
            Action::Export => {
                self.export_state = ExportState {
                    active: true,
                    output_path: super::export_default_path(),
                    ..ExportState::default()
                };
            }
            Action::ClickAt(x, y) => {
                self.handle_click(x, y);
            }
            Action::Resize(..) | Action::Tick | Action::None => {}
        }
        false
    }

    pub(super) fn send(&self, cmd: BackendCommand) {
        if let Some(tx) = &self.backend_cmd_tx
            && tx.send(cmd).is_err()
        {
            tracing::warn!("report service is not running");
        }
    }

    fn row_action(&mut self, action: RowAction) {
        let Some(id) = self.current_id() else {
            return;
        };
        let name = self
            .controller
            .record(id.as_str())
            .map(|r| r.name.clone());
        match self.controller.dispatch_row(action, id.as_str()) {
            Ok(result) => {
                self.apply_result(&result);
                self.toasts.notify(&result.notice, name.as_deref());
            }
            Err(e) => self.report_error(e),
        }
    }

    fn bulk_action(&mut self, action: BulkAction) {
        match self.controller.dispatch(action) {
            Ok(result) => {
                self.apply_result(&result);
                self.toasts.notify(&result.notice, None);
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Carry out the side effects the controller leaves to its caller.
    fn apply_result(&mut self, result: &ActionResult) {
        match result.notice.key {
            NoticeKey::Deleted => {
                let removed = self.store.remove(&result.affected);
                for id in &result.affected {
                    self.pending_reports.remove(id);
                }
                tracing::info!(removed, "removed locations from store");
                self.refresh_records();
            }
            NoticeKey::Copied => {
                let text = super::records_summary(
                    result
                        .affected
                        .iter()
                        .filter_map(|id| self.controller.record(id.as_str())),
                );
                if self.clipboard {
                    super::osc52_copy(&text);
                }
                self.last_copied = Some(text);
            }
            _ => {}
        }
    }

    fn create_report(&mut self) {
        let Some(record) = self.current_record() else {
            return;
        };
        let id = record.id.clone();
        let status = record.report_status;
        self.row_action(RowAction::ReportCreate);

        let next = status.next_on_create();
        if next == status {
            tracing::debug!(id = %id, status = ?status, "report already requested");
            return;
        }
        self.store.set_report_status(id.as_str(), next);
        self.pending_reports.insert(id.clone());
        self.send(BackendCommand::GenerateReport { id });
        self.refresh_records();
    }

    fn view_report(&mut self) {
        let Some(id) = self.current_id() else {
            return;
        };
        let available = self
            .controller
            .row_actions(id.as_str())
            .map(|actions| actions.contains(&RowAction::ReportView))
            .unwrap_or(false);
        if !available {
            self.toasts
                .warn("No report yet", "Press r to create a report first.");
            return;
        }
        self.row_action(RowAction::ReportView);
        self.screen = Screen::Detail(id);
    }

    fn handle_export_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::NavigateBack => {
                self.export_state.active = false;
            }
            Action::MoveDown => {
                self.export_state.cursor =
                    (self.export_state.cursor + 1).min(ExportState::LAST_ITEM);
            }
            Action::MoveUp => {
                self.export_state.cursor = self.export_state.cursor.saturating_sub(1);
            }
            Action::DrillIn => match self.export_state.cursor {
                0 => self.export_state.format = self.export_state.format.next(),
                1 => self.export_state.scope = self.export_state.scope.next(),
                _ => {
                    let path = PathBuf::from(self.export_state.file_name());
                    let rows = self.export_rows(self.export_state.scope);
                    let outcome = if rows.is_empty() {
                        Err("Nothing to export".to_string())
                    } else {
                        crate::export::export_records(&rows, self.export_state.format, &path)
                    };
                    self.export_state.message = Some(match outcome {
                        Ok(()) => format!("Saved to {}", path.display()),
                        Err(e) => {
                            tracing::warn!(error = %e, "export failed");
                            format!("Error: {}", e)
                        }
                    });
                }
            },
            _ => {}
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        let Some(table_area) = self.last_table_area else {
            return;
        };
        if self.screen != Screen::Table
            || y < table_area.y
            || y >= table_area.y + table_area.height
        {
            return;
        }
        // Account for border (1) + header row (1) = offset 2 from table_area.y
        let row_offset = 2u16;
        if y < table_area.y + row_offset {
            return;
        }
        let mut line = (y - table_area.y - row_offset) as usize;
        let ids = self.controller.visible_ids();
        for (idx, id) in ids.iter().enumerate() {
            let height = if self.controller.is_expanded(id.as_str()) { 2 } else { 1 };
            if line < height {
                self.cursor = idx;
                // First column is the checkbox.
                if x < table_area.x + 5
                    && let Err(e) = self.controller.toggle_selected(id.as_str())
                {
                    self.report_error(e);
                }
                return;
            }
            line -= height;
        }
    }
}
