use std::collections::HashSet;

use crate::model::{Record, RecordId};

/// Set of favorited record ids, independent of selection.
///
/// Seeded once from each record's `is_favorite` flag when constructed; after
/// that only explicit favorite operations change membership. Records that
/// show up later are adopted with their own flag, but an id the tracker has
/// already seen is never re-seeded, so user changes survive a refresh.
#[derive(Debug, Clone, Default)]
pub struct FavoriteTracker {
    favorites: HashSet<RecordId>,
    seen: HashSet<RecordId>,
}

impl FavoriteTracker {
    pub fn seeded(records: &[Record]) -> Self {
        let mut tracker = Self::default();
        tracker.adopt(records);
        tracker
    }

    /// Seed ids never seen before from their initial flag.
    pub fn adopt(&mut self, records: &[Record]) {
        for record in records {
            if self.seen.insert(record.id.clone()) && record.is_favorite {
                self.favorites.insert(record.id.clone());
            }
        }
    }

    /// Flip membership and return the new state.
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        if self.favorites.remove(id) {
            false
        } else {
            self.favorites.insert(id.clone());
            true
        }
    }

    /// Mark every id in `ids` as a favorite. Never removes.
    ///
    /// Returns how many ids were newly favorited.
    pub fn bulk_set<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        ids.into_iter()
            .filter(|id| self.favorites.insert((*id).clone()))
            .count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn count(&self) -> usize {
        self.favorites.len()
    }

    /// Number of favorites among the ids for which `present` returns true.
    pub fn count_where(&self, mut present: impl FnMut(&RecordId) -> bool) -> usize {
        self.favorites.iter().filter(|id| present(id)).count()
    }
}
