//! Maps bulk and per-row intents onto selection and favorite state.
//!
//! Results carry a structured [`Notice`] that the presentation layer renders
//! as a transient notification; no human-readable text is produced here.

use serde::{Deserialize, Serialize};

use crate::favorites::FavoriteTracker;
use crate::model::RecordId;
use crate::selection::SelectionTracker;

/// Actions applied to every selected record at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Delete,
    Favorite,
    Edit,
    Copy,
}

impl BulkAction {
    pub fn all() -> &'static [BulkAction] {
        &[
            BulkAction::Delete,
            BulkAction::Favorite,
            BulkAction::Edit,
            BulkAction::Copy,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Delete => "Delete",
            Self::Favorite => "Star",
            Self::Edit => "Edit",
            Self::Copy => "Copy",
        }
    }

    /// Whether the action invalidates the selection it was applied to.
    pub fn is_destructive(self) -> bool {
        self == Self::Delete
    }
}

/// Actions applied to a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    ToggleFavorite,
    Delete,
    Edit,
    Copy,
    ReportCreate,
    /// Only offered when the record's report is available.
    ReportView,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::ToggleFavorite => "Favorite",
            Self::Delete => "Delete",
            Self::Edit => "Edit",
            Self::Copy => "Copy",
            Self::ReportCreate => "Create report",
            Self::ReportView => "View report",
        }
    }
}

/// Which action produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Bulk(BulkAction),
    Row(RowAction),
}

/// Stable key identifying the kind of notification to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKey {
    FavoritesAdded,
    FavoritesRemoved,
    BulkFavorited,
    Deleted,
    EditRequested,
    Copied,
    ReportRequested,
    ReportOpened,
    NothingSelected,
}

impl NoticeKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FavoritesAdded => "favorites.added",
            Self::FavoritesRemoved => "favorites.removed",
            Self::BulkFavorited => "favorites.bulk_added",
            Self::Deleted => "records.deleted",
            Self::EditRequested => "records.edit",
            Self::Copied => "records.copied",
            Self::ReportRequested => "report.requested",
            Self::ReportOpened => "report.opened",
            Self::NothingSelected => "selection.empty",
        }
    }
}

/// Structured notification descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub key: NoticeKey,
    pub affected_count: usize,
    /// The record a per-row action applied to.
    pub subject: Option<RecordId>,
}

/// Outcome of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub action: ActionKind,
    /// Ids the action applied to; for deletes, the ids the caller should
    /// remove from its record store.
    pub affected: Vec<RecordId>,
    pub notice: Notice,
}

impl ActionResult {
    pub fn affected_count(&self) -> usize {
        self.affected.len()
    }
}

/// Apply a bulk action to the current selection.
pub fn dispatch_bulk(
    action: BulkAction,
    selection: &mut SelectionTracker,
    favorites: &mut FavoriteTracker,
) -> ActionResult {
    let affected = selection.ids();
    if affected.is_empty() {
        return ActionResult {
            action: ActionKind::Bulk(action),
            affected,
            notice: Notice {
                key: NoticeKey::NothingSelected,
                affected_count: 0,
                subject: None,
            },
        };
    }

    let key = match action {
        BulkAction::Delete => NoticeKey::Deleted,
        BulkAction::Favorite => {
            favorites.bulk_set(&affected);
            NoticeKey::BulkFavorited
        }
        BulkAction::Edit => NoticeKey::EditRequested,
        BulkAction::Copy => NoticeKey::Copied,
    };
    if action.is_destructive() {
        selection.clear();
    }

    tracing::info!(action = ?action, count = affected.len(), "bulk action dispatched");
    ActionResult {
        action: ActionKind::Bulk(action),
        notice: Notice {
            key,
            affected_count: affected.len(),
            subject: None,
        },
        affected,
    }
}

/// Apply an action to a single record.
///
/// The caller is responsible for having checked that `id` exists.
pub fn dispatch_row(
    action: RowAction,
    id: &RecordId,
    selection: &mut SelectionTracker,
    favorites: &mut FavoriteTracker,
) -> ActionResult {
    let key = match action {
        RowAction::ToggleFavorite => {
            if favorites.toggle(id) {
                NoticeKey::FavoritesAdded
            } else {
                NoticeKey::FavoritesRemoved
            }
        }
        RowAction::Delete => {
            selection.remove(id.as_str());
            NoticeKey::Deleted
        }
        RowAction::Edit => NoticeKey::EditRequested,
        RowAction::Copy => NoticeKey::Copied,
        RowAction::ReportCreate => NoticeKey::ReportRequested,
        RowAction::ReportView => NoticeKey::ReportOpened,
    };

    tracing::info!(action = ?action, id = %id, "row action dispatched");
    ActionResult {
        action: ActionKind::Row(action),
        affected: vec![id.clone()],
        notice: Notice {
            key,
            affected_count: 1,
            subject: Some(id.clone()),
        },
    }
}
