use locus_core::ReportStatus;

use super::App;
use crate::tui_event::BackendEvent;

impl App {
    /// Apply a report service event to the store and refresh the controller.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::ReportReady { id } => {
                self.pending_reports.remove(&id);
                if !self
                    .store
                    .set_report_status(id.as_str(), ReportStatus::Available)
                {
                    // Deleted while the report was generating.
                    tracing::debug!(id = %id, "report finished for a removed location");
                    return;
                }
                tracing::info!(id = %id, "report ready");
                self.refresh_records();
                let name = self
                    .controller
                    .record(id.as_str())
                    .map(|r| r.name.clone())
                    .unwrap_or_else(|| "this location".to_string());
                self.toasts.push(
                    "Report ready",
                    format!("The report for {name} is available."),
                );
            }
            BackendEvent::ReportCancelled { id } => {
                self.pending_reports.remove(&id);
                if self.store.set_report_status(id.as_str(), ReportStatus::None) {
                    self.refresh_records();
                }
                tracing::info!(id = %id, "report cancelled");
            }
        }
    }
}
