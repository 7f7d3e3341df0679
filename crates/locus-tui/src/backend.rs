use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use locus_core::RecordId;

use crate::tui_event::{BackendCommand, BackendEvent};

/// Simulated report generation latency bounds, in milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct ReportTiming {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for ReportTiming {
    fn default() -> Self {
        Self {
            min_ms: 2_000,
            max_ms: 6_000,
        }
    }
}

impl ReportTiming {
    fn pick(&self) -> Duration {
        let hi = self.max_ms.max(self.min_ms);
        Duration::from_millis(fastrand::u64(self.min_ms..=hi))
    }
}

/// Run the report service until the command channel closes or `cancel` fires.
///
/// Each request gets its own task and its own child token, so `CancelAll`
/// abandons in-flight reports without stopping the service.
pub async fn run_report_service(
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
    timing: ReportTiming,
    cancel: CancellationToken,
) {
    let mut batch = cancel.child_token();

    loop {
        let cmd = tokio::select! {
            _ = cancel.cancelled() => break,
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => cmd,
                None => break,
            },
        };

        match cmd {
            BackendCommand::GenerateReport { id } => {
                tracing::info!(id = %id, "report generation started");
                let tx = event_tx.clone();
                let token = batch.clone();
                let delay = timing.pick();
                tokio::spawn(async move {
                    generate_report(id, delay, tx, token).await;
                });
            }
            BackendCommand::CancelAll => {
                tracing::info!("cancelling in-flight reports");
                batch.cancel();
                batch = cancel.child_token();
            }
        }
    }
    tracing::debug!("report service stopped");
}

async fn generate_report(
    id: RecordId,
    delay: Duration,
    tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    let event = tokio::select! {
        _ = cancel.cancelled() => BackendEvent::ReportCancelled { id },
        _ = tokio::time::sleep(delay) => BackendEvent::ReportReady { id },
    };
    // The receiver is gone once the UI has quit.
    let _ = tx.send(event);
}
