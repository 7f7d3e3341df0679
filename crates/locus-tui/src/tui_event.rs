use locus_core::RecordId;

/// Commands sent from the TUI to the report service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    /// Generate a report for one location. The app has already marked it pending.
    GenerateReport { id: RecordId },
    /// Abandon every report still in flight.
    CancelAll,
}

/// Events flowing from the report service to the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// A requested report finished and can be viewed.
    ReportReady { id: RecordId },
    /// Generation was abandoned before completion.
    ReportCancelled { id: RecordId },
}
