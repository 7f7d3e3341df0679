use serde::{Deserialize, Serialize};

use crate::DEFAULT_PAGE_SIZE;
use crate::dispatch::BulkAction;

/// How "select all" behaves when the visible page is already fully selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectAllMode {
    /// Clear the entire selection (a second select-all undoes the first).
    #[default]
    Toggle,
    /// Always add the visible ids; never clear.
    SelectOnly,
}

impl SelectAllMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::SelectOnly => "select-only",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "toggle" => Some(Self::Toggle),
            "select-only" | "select_only" | "selectonly" => Some(Self::SelectOnly),
            _ => None,
        }
    }
}

/// Per-view configuration of a row controller.
///
/// One controller type serves every table variant; a view picks its page
/// size, select-all behaviour, and which bulk actions it offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    pub page_size: usize,
    pub select_all: SelectAllMode,
    pub bulk_actions: Vec<BulkAction>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            select_all: SelectAllMode::default(),
            bulk_actions: BulkAction::all().to_vec(),
        }
    }
}

impl TableOptions {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_select_all(mut self, mode: SelectAllMode) -> Self {
        self.select_all = mode;
        self
    }

    pub fn with_bulk_actions(mut self, actions: Vec<BulkAction>) -> Self {
        self.bulk_actions = actions;
        self
    }

    pub fn allows(&self, action: BulkAction) -> bool {
        self.bulk_actions.contains(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_every_bulk_action() {
        let opts = TableOptions::default();
        assert_eq!(opts.page_size, 20);
        assert_eq!(opts.select_all, SelectAllMode::Toggle);
        for action in BulkAction::all() {
            assert!(opts.allows(*action));
        }
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let opts: TableOptions = serde_json::from_str(r#"{ "page_size": 5 }"#).unwrap();
        assert_eq!(opts.page_size, 5);
        assert_eq!(opts.bulk_actions.len(), BulkAction::all().len());

        let opts: TableOptions =
            serde_json::from_str(r#"{ "select_all": "select-only", "bulk_actions": ["delete"] }"#)
                .unwrap();
        assert_eq!(opts.select_all, SelectAllMode::SelectOnly);
        assert!(opts.allows(BulkAction::Delete));
        assert!(!opts.allows(BulkAction::Favorite));
    }

    #[test]
    fn select_all_mode_parses_loosely() {
        assert_eq!(SelectAllMode::parse("Toggle"), Some(SelectAllMode::Toggle));
        assert_eq!(
            SelectAllMode::parse("select_only"),
            Some(SelectAllMode::SelectOnly)
        );
        assert_eq!(SelectAllMode::parse("sometimes"), None);
    }

    #[test]
    fn page_size_builder_rejects_zero() {
        assert_eq!(TableOptions::default().with_page_size(0).page_size, 1);
    }
}
