use thiserror::Error;

pub mod controller;
pub mod dispatch;
pub mod favorites;
pub mod filter;
pub mod model;
pub mod options;
pub mod pagination;
pub mod selection;
pub mod store;

// Re-export for convenience
pub use controller::{RowController, RowView, TableView};
pub use dispatch::{ActionKind, ActionResult, BulkAction, Notice, NoticeKey, RowAction};
pub use favorites::FavoriteTracker;
pub use filter::{filter, filtered_ids};
pub use model::{Metric, MetricKind, Record, RecordId, ReportStatus, Trend};
pub use options::{SelectAllMode, TableOptions};
pub use pagination::{PageWindow, paginate};
pub use selection::SelectionTracker;
pub use store::{InMemoryStore, JsonFileSource, LocationSource, MockLocations};

/// Page size used when no configuration overrides it.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Errors raised while loading or constructing the record sequence.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid record data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate record id: {0}")]
    DuplicateId(RecordId),
}

/// Non-fatal errors reported by controller operations.
///
/// The controller state is left untouched whenever one of these is returned;
/// callers log them and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error("unknown record: {id}")]
    UnknownRecord { id: RecordId },
    #[error("bulk action {action:?} is not enabled for this view")]
    ActionDisabled { action: BulkAction },
}
