use std::collections::HashSet;

use crate::dispatch::{self, ActionResult, BulkAction, RowAction};
use crate::favorites::FavoriteTracker;
use crate::filter::filter;
use crate::model::{Record, RecordId};
use crate::options::TableOptions;
use crate::pagination::{PageWindow, paginate};
use crate::selection::SelectionTracker;
use crate::{ControllerError, CoreError};

/// One rendered row: the record plus its interaction state.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    pub record: &'a Record,
    pub selected: bool,
    pub favorite: bool,
    pub expanded: bool,
}

/// Read model rendered directly by the presentation layer.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    pub rows: Vec<RowView<'a>>,
    pub page: PageWindow,
    pub selected_count: usize,
    /// Records matching the search term.
    pub filtered_count: usize,
    /// Records in the full sequence.
    pub total_count: usize,
    pub favorite_count: usize,
    /// Every row on the current page is selected (false for an empty page).
    pub all_visible_selected: bool,
}

impl TableView<'_> {
    /// The search matched nothing. A valid state, not an error.
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }

    /// The bulk-action bar is shown iff something is selected.
    pub fn show_bulk_actions(&self) -> bool {
        self.selected_count > 0
    }
}

/// Selection, favorite, expansion, pagination and search state over one
/// displayed list of records.
#[derive(Debug, Clone)]
pub struct RowController {
    records: Vec<Record>,
    options: TableOptions,
    selection: SelectionTracker,
    favorites: FavoriteTracker,
    expanded: HashSet<RecordId>,
    current_page: usize,
    search_term: String,
}

impl RowController {
    /// Build a controller over `records`, seeding favorites from their flags.
    pub fn new(records: Vec<Record>, options: TableOptions) -> Result<Self, CoreError> {
        check_unique(&records)?;
        let favorites = FavoriteTracker::seeded(&records);
        Ok(Self {
            records,
            options,
            selection: SelectionTracker::new(),
            favorites,
            expanded: HashSet::new(),
            current_page: 1,
            search_term: String::new(),
        })
    }

    /// Take a fresh snapshot of the record sequence.
    ///
    /// Selection and expansion of ids that no longer exist are dropped,
    /// favorites of new ids are adopted, and the current page is re-clamped.
    pub fn replace_records(&mut self, records: Vec<Record>) -> Result<(), CoreError> {
        check_unique(&records)?;
        let present: HashSet<&RecordId> = records.iter().map(|r| &r.id).collect();
        self.selection.retain(|id| present.contains(id));
        self.expanded.retain(|id| present.contains(id));
        self.favorites.adopt(&records);
        self.records = records;
        self.clamp_page();
        tracing::debug!(
            total = self.records.len(),
            selected = self.selection.count(),
            "records replaced"
        );
        Ok(())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id.as_str() == id)
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    // ── search ───────────────────────────────────────────────────

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Change the search term. Always returns to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    fn filtered(&self) -> Vec<&Record> {
        filter(&self.records, &self.search_term)
    }

    // ── pagination ───────────────────────────────────────────────

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_window(&self) -> PageWindow {
        paginate(
            self.filtered().len(),
            self.options.page_size,
            self.current_page as i64,
        )
    }

    /// Move to `page`, clamped into range. Returns the effective page.
    pub fn go_to_page(&mut self, page: i64) -> usize {
        let window = paginate(self.filtered().len(), self.options.page_size, page);
        self.current_page = window.effective_page;
        self.current_page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page as i64 + 1)
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.current_page as i64 - 1)
    }

    pub fn first_page(&mut self) -> usize {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> usize {
        self.go_to_page(i64::MAX)
    }

    fn clamp_page(&mut self) {
        self.go_to_page(self.current_page as i64);
    }

    /// Ids on the current page, in display order.
    pub fn visible_ids(&self) -> Vec<RecordId> {
        let filtered = self.filtered();
        let window = paginate(
            filtered.len(),
            self.options.page_size,
            self.current_page as i64,
        );
        filtered[window.range()]
            .iter()
            .map(|r| r.id.clone())
            .collect()
    }

    // ── selection ────────────────────────────────────────────────

    /// Flip selection of `id`. Returns whether it is now selected.
    pub fn toggle_selected(&mut self, id: &str) -> Result<bool, ControllerError> {
        let id = self.known_id(id)?;
        Ok(self.selection.toggle(&id))
    }

    /// Select-all over the current page, per the configured mode.
    pub fn select_all_visible(&mut self) {
        let visible = self.visible_ids();
        self.selection.select_all(&visible, self.options.select_all);
    }

    /// Select-all over every record matching the search term.
    pub fn select_all_filtered(&mut self) {
        let ids: Vec<RecordId> = self.filtered().iter().map(|r| r.id.clone()).collect();
        self.selection.select_all(&ids, self.options.select_all);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_count(&self) -> usize {
        self.selection.count()
    }

    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.selection.ids()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    // ── favorites & expansion ────────────────────────────────────

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Flip the "show details" state of a row. Returns the new state.
    pub fn toggle_expanded(&mut self, id: &str) -> Result<bool, ControllerError> {
        let id = self.known_id(id)?;
        if self.expanded.remove(&id) {
            Ok(false)
        } else {
            self.expanded.insert(id);
            Ok(true)
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    // ── actions ──────────────────────────────────────────────────

    /// Apply a bulk action to the selection.
    pub fn dispatch(&mut self, action: BulkAction) -> Result<ActionResult, ControllerError> {
        if !self.options.allows(action) {
            return Err(ControllerError::ActionDisabled { action });
        }
        Ok(dispatch::dispatch_bulk(
            action,
            &mut self.selection,
            &mut self.favorites,
        ))
    }

    /// Apply an action to one record.
    pub fn dispatch_row(
        &mut self,
        action: RowAction,
        id: &str,
    ) -> Result<ActionResult, ControllerError> {
        let id = self.known_id(id)?;
        if action == RowAction::Delete {
            self.expanded.remove(&id);
        }
        Ok(dispatch::dispatch_row(
            action,
            &id,
            &mut self.selection,
            &mut self.favorites,
        ))
    }

    /// Per-row actions a caller should offer for `id`.
    ///
    /// `ReportView` is only included when the record's report is available.
    pub fn row_actions(&self, id: &str) -> Result<Vec<RowAction>, ControllerError> {
        let record = self.record(id).ok_or_else(|| unknown(id))?;
        let mut actions = vec![
            RowAction::ToggleFavorite,
            RowAction::Edit,
            RowAction::Copy,
            RowAction::Delete,
            RowAction::ReportCreate,
        ];
        if record.report_status.can_view() {
            actions.push(RowAction::ReportView);
        }
        Ok(actions)
    }

    // ── read model ───────────────────────────────────────────────

    pub fn view(&self) -> TableView<'_> {
        let filtered = self.filtered();
        let page = paginate(
            filtered.len(),
            self.options.page_size,
            self.current_page as i64,
        );
        let rows: Vec<RowView<'_>> = filtered[page.range()]
            .iter()
            .map(|&record| RowView {
                record,
                selected: self.selection.contains(record.id.as_str()),
                favorite: self.favorites.contains(record.id.as_str()),
                expanded: self.expanded.contains(record.id.as_str()),
            })
            .collect();
        let all_visible_selected = !rows.is_empty() && rows.iter().all(|r| r.selected);
        let present: HashSet<&str> = self.records.iter().map(|r| r.id.as_str()).collect();

        TableView {
            rows,
            page,
            selected_count: self.selection.count(),
            filtered_count: filtered.len(),
            total_count: self.records.len(),
            favorite_count: self.favorites.count_where(|id| present.contains(id.as_str())),
            all_visible_selected,
        }
    }

    fn known_id(&self, id: &str) -> Result<RecordId, ControllerError> {
        match self.record(id) {
            Some(record) => Ok(record.id.clone()),
            None => {
                tracing::warn!(id, "operation on unknown record ignored");
                Err(unknown(id))
            }
        }
    }
}

fn unknown(id: &str) -> ControllerError {
    ControllerError::UnknownRecord {
        id: RecordId::new(id),
    }
}

fn check_unique(records: &[Record]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(CoreError::DuplicateId(record.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReportStatus;
    use crate::options::SelectAllMode;
    use std::collections::BTreeMap;

    fn rec(id: usize, name: &str) -> Record {
        Record {
            id: RecordId::new(id.to_string()),
            name: name.to_string(),
            address: format!("{id} High Street"),
            detailed_info: String::new(),
            metrics: BTreeMap::new(),
            report_status: ReportStatus::None,
            is_favorite: id % 5 == 0,
        }
    }

    fn records(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| rec(i, if i % 2 == 0 { "Villaggio" } else { "Staysure" }))
            .collect()
    }

    fn controller(n: usize) -> RowController {
        RowController::new(records(n), TableOptions::default()).unwrap()
    }

    #[test]
    fn starts_on_page_one_with_nothing_selected() {
        let ctl = controller(47);
        assert_eq!(ctl.current_page(), 1);
        assert_eq!(ctl.selected_count(), 0);
        assert_eq!(ctl.search_term(), "");
        let view = ctl.view();
        assert_eq!(view.rows.len(), 20);
        assert_eq!(view.page.total_pages, 3);
        assert!(!view.show_bulk_actions());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut recs = records(3);
        recs.push(rec(2, "Dup"));
        assert!(matches!(
            RowController::new(recs, TableOptions::default()),
            Err(CoreError::DuplicateId(id)) if id.as_str() == "2"
        ));
    }

    #[test]
    fn search_resets_page() {
        let mut ctl = controller(60);
        ctl.go_to_page(3);
        assert_eq!(ctl.current_page(), 3);
        ctl.set_search_term("villaggio");
        assert_eq!(ctl.current_page(), 1);
        assert_eq!(ctl.view().filtered_count, 30);
    }

    #[test]
    fn page_navigation_clamps() {
        let mut ctl = controller(47);
        assert_eq!(ctl.prev_page(), 1);
        assert_eq!(ctl.next_page(), 2);
        assert_eq!(ctl.last_page(), 3);
        assert_eq!(ctl.next_page(), 3);
        assert_eq!(ctl.go_to_page(-1), 1);
        assert_eq!(ctl.go_to_page(99), 3);
        assert_eq!(ctl.first_page(), 1);
    }

    #[test]
    fn unknown_ids_are_non_fatal() {
        let mut ctl = controller(3);
        let err = ctl.toggle_selected("nope").unwrap_err();
        assert_eq!(
            err,
            ControllerError::UnknownRecord {
                id: RecordId::new("nope")
            }
        );
        assert_eq!(ctl.selected_count(), 0);
        assert!(ctl.toggle_expanded("nope").is_err());
        assert!(ctl.dispatch_row(RowAction::ToggleFavorite, "nope").is_err());
        assert!(ctl.row_actions("nope").is_err());
    }

    #[test]
    fn report_view_only_offered_when_available() {
        let mut recs = records(2);
        recs[1].report_status = ReportStatus::Available;
        let ctl = RowController::new(recs, TableOptions::default()).unwrap();
        assert!(!ctl.row_actions("1").unwrap().contains(&RowAction::ReportView));
        assert!(ctl.row_actions("2").unwrap().contains(&RowAction::ReportView));
        assert!(ctl.row_actions("1").unwrap().contains(&RowAction::ReportCreate));
    }

    #[test]
    fn report_create_does_not_change_status() {
        let mut ctl = controller(2);
        let result = ctl.dispatch_row(RowAction::ReportCreate, "1").unwrap();
        assert_eq!(result.notice.key, crate::NoticeKey::ReportRequested);
        assert_eq!(ctl.record("1").unwrap().report_status, ReportStatus::None);
    }

    #[test]
    fn disabled_bulk_action_is_rejected() {
        let opts = TableOptions::default().with_bulk_actions(vec![BulkAction::Delete]);
        let mut ctl = RowController::new(records(3), opts).unwrap();
        ctl.toggle_selected("1").unwrap();
        assert_eq!(
            ctl.dispatch(BulkAction::Favorite).unwrap_err(),
            ControllerError::ActionDisabled {
                action: BulkAction::Favorite
            }
        );
        assert_eq!(ctl.selected_count(), 1);
    }

    #[test]
    fn replace_records_prunes_and_reclamps() {
        let mut ctl = controller(47);
        ctl.toggle_selected("45").unwrap();
        ctl.toggle_selected("2").unwrap();
        ctl.toggle_expanded("46").unwrap();
        ctl.go_to_page(3);

        ctl.replace_records(records(30)).unwrap();
        assert_eq!(ctl.selected_ids(), vec![RecordId::new("2")]);
        assert!(!ctl.is_expanded("46"));
        assert_eq!(ctl.current_page(), 2);
    }

    #[test]
    fn favorites_seeded_and_counted() {
        let mut ctl = controller(20);
        assert!(ctl.is_favorite("5"));
        assert!(!ctl.is_favorite("4"));
        assert_eq!(ctl.view().favorite_count, 4);

        ctl.dispatch_row(RowAction::ToggleFavorite, "5").unwrap();
        assert_eq!(ctl.view().favorite_count, 3);
    }

    #[test]
    fn expansion_shows_in_rows() {
        let mut ctl = controller(3);
        assert!(ctl.toggle_expanded("2").unwrap());
        let view = ctl.view();
        assert!(view.rows[1].expanded);
        assert!(!view.rows[0].expanded);
        assert!(!ctl.toggle_expanded("2").unwrap());
    }

    #[test]
    fn select_all_filtered_spans_pages() {
        let mut ctl = controller(47);
        ctl.set_search_term("staysure");
        ctl.select_all_filtered();
        assert_eq!(ctl.selected_count(), 24);
        ctl.select_all_filtered();
        assert_eq!(ctl.selected_count(), 0);
    }

    #[test]
    fn select_only_mode_is_configurable() {
        let opts = TableOptions::default().with_select_all(SelectAllMode::SelectOnly);
        let mut ctl = RowController::new(records(10), opts).unwrap();
        ctl.select_all_visible();
        ctl.select_all_visible();
        assert_eq!(ctl.selected_count(), 10);
        assert!(ctl.view().all_visible_selected);
    }
}
