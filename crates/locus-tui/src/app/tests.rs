use super::*;
use crate::action::Action;
use crate::tui_event::BackendEvent;
use locus_core::{BulkAction, LocationSource, MockLocations, ReportStatus, SelectAllMode};

/// Create an App over 60 seeded mock locations (no backend).
fn test_app() -> App {
    test_app_with(TableOptions::default())
}

fn test_app_with(options: TableOptions) -> App {
    let store = InMemoryStore::from_source(&MockLocations::new().with_seed(42)).unwrap();
    App::new(store, options, Theme::hacker()).unwrap()
}

/// App wired to a command channel so report requests can be observed.
fn app_with_backend() -> (App, mpsc::UnboundedReceiver<BackendCommand>) {
    let mut app = test_app();
    let (tx, rx) = mpsc::unbounded_channel();
    app.backend_cmd_tx = Some(tx);
    (app, rx)
}

fn type_search(app: &mut App, text: &str) {
    app.update(Action::StartSearch);
    for c in text.chars() {
        app.update(Action::SearchInput(c));
    }
    app.update(Action::SearchConfirm);
}

fn id(s: &str) -> RecordId {
    RecordId::new(s)
}

// ── navigation ──────────────────────────────────────────────────

#[test]
fn starts_on_first_page_of_table() {
    let app = test_app();
    assert_eq!(app.screen, Screen::Table);
    assert_eq!(app.controller.current_page(), 1);
    assert_eq!(app.current_id(), Some(id("1")));
}

#[test]
fn cursor_stays_within_page() {
    let mut app = test_app();
    for _ in 0..50 {
        app.update(Action::MoveDown);
    }
    assert_eq!(app.cursor, 19);
    app.update(Action::GoTop);
    app.update(Action::MoveUp);
    assert_eq!(app.cursor, 0);
}

#[test]
fn paging_resets_cursor() {
    let mut app = test_app();
    app.update(Action::GoBottom);
    app.update(Action::NextPage);
    assert_eq!(app.controller.current_page(), 2);
    assert_eq!(app.cursor, 0);
    assert_eq!(app.current_id(), Some(id("21")));

    app.update(Action::LastPage);
    assert_eq!(app.controller.current_page(), 3);
    app.update(Action::NextPage);
    assert_eq!(app.controller.current_page(), 3);
    app.update(Action::FirstPage);
    assert_eq!(app.controller.current_page(), 1);
}

#[test]
fn drill_in_and_back() {
    let mut app = test_app();
    app.update(Action::MoveDown);
    app.update(Action::DrillIn);
    assert_eq!(app.screen, Screen::Detail(id("2")));
    // Paging is a table-only action.
    app.update(Action::NextPage);
    assert_eq!(app.controller.current_page(), 1);
    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::Table);
    assert_eq!(app.cursor, 1);
}

// ── search ──────────────────────────────────────────────────────

#[test]
fn search_resets_to_first_page_and_filters() {
    let mut app = test_app();
    app.update(Action::LastPage);
    type_search(&mut app, "HARTS");
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.controller.current_page(), 1);
    let view = app.controller.view();
    assert_eq!(view.filtered_count, 30);
    assert_eq!(view.total_count, 60);
}

#[test]
fn backspace_edits_search_term() {
    let mut app = test_app();
    type_search(&mut app, "stayx");
    app.update(Action::StartSearch);
    app.update(Action::SearchInput('\x08'));
    assert_eq!(app.controller.search_term(), "stay");
    assert_eq!(app.controller.view().filtered_count, 30);
}

#[test]
fn search_cancel_and_escape_clear_term() {
    let mut app = test_app();
    app.update(Action::StartSearch);
    app.update(Action::SearchInput('z'));
    app.update(Action::SearchCancel);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.controller.search_term(), "");

    type_search(&mut app, "villa");
    app.update(Action::NavigateBack);
    assert_eq!(app.controller.search_term(), "");
}

#[test]
fn empty_search_result_has_no_current_row() {
    let mut app = test_app();
    type_search(&mut app, "nowhere");
    assert!(app.controller.view().is_empty());
    assert_eq!(app.current_id(), None);
    // Row actions are no-ops without a row.
    app.update(Action::ToggleSelect);
    app.update(Action::ToggleFavorite);
    app.update(Action::DrillIn);
    assert_eq!(app.screen, Screen::Table);
    assert_eq!(app.controller.selected_count(), 0);
}

// ── selection ───────────────────────────────────────────────────

#[test]
fn select_all_toggles_page() {
    let mut app = test_app();
    app.update(Action::SelectAllVisible);
    assert_eq!(app.controller.selected_count(), 20);
    assert!(app.controller.view().show_bulk_actions());
    app.update(Action::SelectAllVisible);
    assert_eq!(app.controller.selected_count(), 0);
}

#[test]
fn select_only_mode_keeps_selection() {
    let mut app = test_app_with(TableOptions::default().with_select_all(SelectAllMode::SelectOnly));
    app.update(Action::SelectAllVisible);
    app.update(Action::SelectAllVisible);
    assert_eq!(app.controller.selected_count(), 20);
}

#[test]
fn selection_survives_paging() {
    let mut app = test_app();
    app.update(Action::ToggleSelect);
    app.update(Action::NextPage);
    app.update(Action::ToggleSelect);
    assert_eq!(app.controller.selected_count(), 2);
    assert!(app.controller.is_selected("1"));
    assert!(app.controller.is_selected("21"));
    app.update(Action::ClearSelection);
    assert_eq!(app.controller.selected_count(), 0);
}

#[test]
fn select_all_filtered_spans_pages() {
    let mut app = test_app();
    type_search(&mut app, "staysure");
    app.update(Action::SelectAllFiltered);
    assert_eq!(app.controller.selected_count(), 30);
}

// ── favorites & expansion ───────────────────────────────────────

#[test]
fn toggle_favorite_shows_toast() {
    let mut app = test_app();
    // Record 1 starts as a non-favorite.
    assert!(!app.controller.is_favorite("1"));
    app.update(Action::ToggleFavorite);
    assert!(app.controller.is_favorite("1"));
    assert_eq!(app.toasts.latest().unwrap().title, "Added to favorites");
    app.update(Action::ToggleFavorite);
    assert!(!app.controller.is_favorite("1"));
    assert_eq!(app.toasts.latest().unwrap().title, "Removed from favorites");
}

#[test]
fn expand_toggles_details_row() {
    let mut app = test_app();
    app.update(Action::ToggleExpand);
    assert!(app.controller.is_expanded("1"));
    app.update(Action::ToggleExpand);
    assert!(!app.controller.is_expanded("1"));
}

// ── bulk actions ────────────────────────────────────────────────

#[test]
fn bulk_delete_removes_from_store() {
    let mut app = test_app();
    app.update(Action::ToggleSelect);
    app.update(Action::MoveDown);
    app.update(Action::ToggleSelect);
    app.update(Action::Bulk(BulkAction::Delete));

    assert_eq!(app.store.len(), 58);
    assert_eq!(app.controller.view().total_count, 58);
    assert_eq!(app.controller.selected_count(), 0);
    assert!(app.controller.record("1").is_none());
    assert_eq!(app.toasts.latest().unwrap().description, "2 locations deleted.");
}

#[test]
fn bulk_with_empty_selection_warns() {
    let mut app = test_app();
    app.update(Action::Bulk(BulkAction::Favorite));
    let toast = app.toasts.latest().unwrap();
    assert_eq!(toast.title, "Nothing selected");
}

#[test]
fn disabled_bulk_action_is_rejected() {
    let opts = TableOptions::default().with_bulk_actions(vec![BulkAction::Favorite]);
    let mut app = test_app_with(opts);
    app.update(Action::ToggleSelect);
    app.update(Action::Bulk(BulkAction::Delete));
    assert_eq!(app.store.len(), 60);
    assert_eq!(app.controller.selected_count(), 1);
    assert_eq!(app.toasts.latest().unwrap().title, "Not available");
}

#[test]
fn bulk_copy_records_text() {
    let mut app = test_app();
    app.update(Action::ToggleSelect);
    app.update(Action::Bulk(BulkAction::Copy));
    let copied = app.last_copied.as_deref().unwrap();
    assert!(copied.starts_with("Staysure\nNorthampton"));
    assert!(copied.contains("Visitors: "));
}

#[test]
fn row_delete_from_detail_returns_to_table() {
    let mut app = test_app();
    app.update(Action::MoveDown);
    app.update(Action::ToggleSelect);
    app.update(Action::DrillIn);
    app.update(Action::DeleteRow);
    assert_eq!(app.screen, Screen::Table);
    assert!(app.controller.record("2").is_none());
    assert!(!app.controller.is_selected("2"));
    assert_eq!(app.store.len(), 59);
}

#[test]
fn deleting_last_rows_clamps_page_and_cursor() {
    let mut app = test_app();
    app.update(Action::LastPage);
    app.update(Action::SelectAllVisible);
    app.update(Action::GoBottom);
    app.update(Action::Bulk(BulkAction::Delete));
    assert_eq!(app.store.len(), 40);
    assert_eq!(app.controller.page_window().total_pages, 2);
    assert_eq!(app.controller.current_page(), 2);
    assert!(app.cursor < app.page_len());
}

// ── reports ─────────────────────────────────────────────────────

#[test]
fn create_report_marks_pending_and_notifies_backend() {
    let (mut app, mut rx) = app_with_backend();
    app.update(Action::CreateReport);

    assert_eq!(
        app.controller.record("1").unwrap().report_status,
        ReportStatus::Pending
    );
    assert!(app.pending_reports.contains(&id("1")));
    assert_eq!(
        rx.try_recv().unwrap(),
        BackendCommand::GenerateReport { id: id("1") }
    );
    assert_eq!(app.toasts.latest().unwrap().title, "Report requested");

    // A second request while pending is acknowledged but not sent again.
    app.update(Action::CreateReport);
    assert!(rx.try_recv().is_err());
    assert_eq!(app.toasts.len(), 2);
    assert_eq!(app.toasts.latest().unwrap().title, "Report requested");
}

#[test]
fn create_report_on_available_row_is_acknowledged() {
    let (mut app, mut rx) = app_with_backend();
    app.store
        .set_report_status("1", ReportStatus::Available);
    app.refresh_records();

    app.update(Action::CreateReport);
    assert_eq!(app.toasts.latest().unwrap().title, "Report requested");
    assert_eq!(
        app.controller.record("1").unwrap().report_status,
        ReportStatus::Available
    );
    assert!(app.pending_reports.is_empty());
    assert!(rx.try_recv().is_err());
}

#[test]
fn report_ready_makes_report_viewable() {
    let (mut app, _rx) = app_with_backend();
    app.update(Action::CreateReport);
    app.update(Action::ViewReport);
    assert_eq!(app.screen, Screen::Table);
    assert_eq!(app.toasts.latest().unwrap().title, "No report yet");

    app.handle_backend_event(BackendEvent::ReportReady { id: id("1") });
    assert!(app.pending_reports.is_empty());
    assert_eq!(
        app.controller.record("1").unwrap().report_status,
        ReportStatus::Available
    );
    assert_eq!(app.toasts.latest().unwrap().title, "Report ready");

    app.update(Action::ViewReport);
    assert_eq!(app.screen, Screen::Detail(id("1")));
    assert_eq!(app.toasts.latest().unwrap().title, "Report");
}

#[test]
fn report_for_deleted_location_is_ignored() {
    let (mut app, _rx) = app_with_backend();
    app.update(Action::CreateReport);
    app.update(Action::DeleteRow);
    assert!(app.pending_reports.is_empty());
    app.handle_backend_event(BackendEvent::ReportReady { id: id("1") });
    assert!(app.controller.record("1").is_none());
    assert_eq!(app.store.len(), 59);
}

#[test]
fn cancelled_report_returns_to_none() {
    let (mut app, _rx) = app_with_backend();
    app.update(Action::CreateReport);
    app.handle_backend_event(BackendEvent::ReportCancelled { id: id("1") });
    assert_eq!(
        app.controller.record("1").unwrap().report_status,
        ReportStatus::None
    );
}

#[test]
fn quit_with_pending_reports_cancels_them() {
    let (mut app, mut rx) = app_with_backend();
    app.update(Action::CreateReport);
    let _ = rx.try_recv();
    app.update(Action::Quit);
    assert!(app.confirm_quit);
    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
    assert_eq!(rx.try_recv().unwrap(), BackendCommand::CancelAll);
}

// ── modals ──────────────────────────────────────────────────────

#[test]
fn quit_confirm_can_be_cancelled() {
    let mut app = test_app();
    app.update(Action::Quit);
    app.update(Action::MoveDown);
    assert_eq!(app.cursor, 0);
    app.update(Action::NavigateBack);
    assert!(!app.confirm_quit);
    assert!(!app.should_quit);
}

#[test]
fn help_closes_on_any_key() {
    let mut app = test_app();
    app.update(Action::ToggleHelp);
    assert!(app.show_help);
    app.update(Action::Tick);
    assert!(app.show_help);
    app.update(Action::MoveDown);
    assert!(!app.show_help);
    assert_eq!(app.cursor, 0);
}

#[test]
fn export_modal_cycles_and_writes() {
    let mut app = test_app();
    app.update(Action::Export);
    assert!(app.export_state.active);

    let dir = tempfile::tempdir().unwrap();
    app.export_state.output_path = dir.path().join("out").display().to_string();

    app.update(Action::DrillIn); // format: JSON -> CSV
    app.update(Action::MoveDown);
    app.update(Action::MoveDown);
    app.update(Action::DrillIn); // confirm

    let written = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert_eq!(written.lines().count(), 61);
    assert!(app.export_state.message.as_deref().unwrap().starts_with("Saved to"));

    app.update(Action::NavigateBack);
    assert!(!app.export_state.active);
}

#[test]
fn export_selected_scope_with_empty_selection() {
    let mut app = test_app();
    app.update(Action::Export);
    app.update(Action::MoveDown);
    app.update(Action::DrillIn); // scope -> selected
    app.update(Action::MoveDown);
    app.update(Action::DrillIn);
    assert_eq!(
        app.export_state.message.as_deref(),
        Some("Error: Nothing to export")
    );
}

#[test]
fn export_rows_follow_search_and_session_favorites() {
    let mut app = test_app();
    app.update(Action::ToggleFavorite); // record 1 becomes a favorite
    type_search(&mut app, "staysure");
    let rows = app.export_rows(crate::view::export::ExportScope::Filtered);
    assert_eq!(rows.len(), 30);
    assert!(rows[0].favorite);
}

// ── misc ────────────────────────────────────────────────────────

#[test]
fn tick_expires_nothing_fresh() {
    let mut app = test_app();
    app.update(Action::ToggleFavorite);
    app.update(Action::Tick);
    assert_eq!(app.toasts.len(), 1);
    assert_eq!(app.tick, 1);
}

#[test]
fn theme_cycles() {
    let mut app = test_app();
    app.update(Action::CycleTheme);
    assert_eq!(app.theme.name, "modern");
    app.update(Action::CycleTheme);
    assert_eq!(app.theme.name, "hacker");
}

#[test]
fn click_moves_cursor_and_checkbox_toggles() {
    let mut app = test_app();
    app.last_table_area = Some(Rect::new(0, 2, 120, 30));
    // Border + header put the first data row at y = 4.
    app.update(Action::ClickAt(20, 7));
    assert_eq!(app.cursor, 3);
    assert!(!app.controller.is_selected("4"));
    app.update(Action::ClickAt(2, 7));
    assert!(app.controller.is_selected("4"));
}

#[test]
fn unknown_ids_surface_as_warnings() {
    let mut app = test_app();
    app.screen = Screen::Detail(id("999"));
    app.update(Action::ToggleSelect);
    assert_eq!(app.toasts.latest().unwrap().title, "Unknown location");
}
