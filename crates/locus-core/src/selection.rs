use std::collections::HashSet;

use crate::model::RecordId;
use crate::options::SelectAllMode;

/// Set of currently selected record ids.
///
/// Selection spans pages: ids stay selected when they scroll out of the
/// visible window or are hidden by the search term.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    selected: HashSet<RecordId>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        }
    }

    /// Select every id in `visible`.
    ///
    /// In [`SelectAllMode::Toggle`], when all of `visible` is already
    /// selected the whole selection is cleared instead, including ids outside
    /// `visible`. Ids outside `visible` are otherwise never removed. An empty
    /// `visible` leaves the selection unchanged.
    pub fn select_all<'a, I>(&mut self, visible: I, mode: SelectAllMode)
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        let visible: Vec<&RecordId> = visible.into_iter().collect();
        if visible.is_empty() {
            return;
        }
        if mode == SelectAllMode::Toggle && self.contains_all(visible.iter().copied()) {
            self.selected.clear();
            return;
        }
        self.selected.extend(visible.into_iter().cloned());
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.selected.remove(id)
    }

    /// Whether every id in `ids` is selected. False for an empty set.
    pub fn contains_all<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        let mut any = false;
        for id in ids {
            if !self.selected.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Selected ids, sorted for stable output.
    pub fn ids(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Drop every selected id for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&RecordId) -> bool) {
        self.selected.retain(|id| keep(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::Range<usize>) -> Vec<RecordId> {
        range.map(|i| RecordId::new(i.to_string())).collect()
    }

    #[test]
    fn double_toggle_restores_membership() {
        let mut sel = SelectionTracker::new();
        let id = RecordId::new("7");
        assert!(sel.toggle(&id));
        assert!(sel.contains("7"));
        assert!(!sel.toggle(&id));
        assert!(!sel.contains("7"));
        assert_eq!(sel.count(), 0);
    }

    #[test]
    fn select_all_keeps_off_page_selections() {
        let mut sel = SelectionTracker::new();
        for id in ids(40..45) {
            sel.toggle(&id);
        }
        let page = ids(0..20);
        sel.select_all(&page, SelectAllMode::Toggle);
        assert_eq!(sel.count(), 25);
    }

    #[test]
    fn select_all_when_page_fully_selected_clears_everything() {
        let mut sel = SelectionTracker::new();
        for id in ids(40..45) {
            sel.toggle(&id);
        }
        let page = ids(0..20);
        for id in &page {
            sel.toggle(id);
        }
        assert_eq!(sel.count(), 25);

        sel.select_all(&page, SelectAllMode::Toggle);
        assert_eq!(sel.count(), 0);
    }

    #[test]
    fn select_all_twice_restores_prior_selection_from_empty() {
        let mut sel = SelectionTracker::new();
        let page = ids(0..20);
        sel.select_all(&page, SelectAllMode::Toggle);
        sel.select_all(&page, SelectAllMode::Toggle);
        assert!(sel.is_empty());
    }

    #[test]
    fn select_only_mode_never_clears() {
        let mut sel = SelectionTracker::new();
        let page = ids(0..5);
        sel.select_all(&page, SelectAllMode::SelectOnly);
        sel.select_all(&page, SelectAllMode::SelectOnly);
        assert_eq!(sel.count(), 5);
    }

    #[test]
    fn select_all_on_empty_visible_set() {
        let mut sel = SelectionTracker::new();
        sel.toggle(&RecordId::new("1"));
        sel.select_all(&[], SelectAllMode::Toggle);
        assert_eq!(sel.count(), 1);

        sel.select_all(&[], SelectAllMode::SelectOnly);
        assert_eq!(sel.count(), 1);
    }

    #[test]
    fn contains_all_is_false_for_empty_input() {
        let sel = SelectionTracker::new();
        assert!(!sel.contains_all(&[]));
    }

    #[test]
    fn ids_are_sorted_and_retain_prunes() {
        let mut sel = SelectionTracker::new();
        for id in ["b", "c", "a"] {
            sel.toggle(&RecordId::new(id));
        }
        assert_eq!(
            sel.ids(),
            vec![RecordId::new("a"), RecordId::new("b"), RecordId::new("c")]
        );
        sel.retain(|id| id.as_str() != "b");
        assert_eq!(sel.count(), 2);
        assert!(!sel.contains("b"));
    }
}
