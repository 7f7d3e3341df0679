use locus_core::BulkAction;

/// A user intent, decoupled from the key or mouse event that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    /// Open the detail screen for the row under the cursor.
    DrillIn,
    NavigateBack,
    GoTop,
    GoBottom,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    StartSearch,
    SearchInput(char),
    SearchConfirm,
    SearchCancel,
    ToggleSelect,
    SelectAllVisible,
    SelectAllFiltered,
    ClearSelection,
    ToggleFavorite,
    ToggleExpand,
    Bulk(BulkAction),
    DeleteRow,
    EditRow,
    CopyRow,
    CreateReport,
    ViewReport,
    Export,
    CycleTheme,
    ToggleHelp,
    ClickAt(u16, u16),
    Resize(u16, u16),
    Tick,
    None,
}
