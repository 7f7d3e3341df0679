use std::path::PathBuf;
use std::time::Duration;

use locus_core::{DEFAULT_PAGE_SIZE, SelectAllMode, TableOptions};

use crate::backend::ReportTiming;

/// Resolved runtime settings, after CLI, env and config files are layered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigState {
    pub data_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub page_size: usize,
    pub select_all: SelectAllMode,
    pub theme_name: String,
    pub toast_secs: u64,
    pub report_min_ms: u64,
    pub report_max_ms: u64,
}

impl Default for ConfigState {
    fn default() -> Self {
        let timing = ReportTiming::default();
        Self {
            data_path: None,
            seed: None,
            page_size: DEFAULT_PAGE_SIZE,
            select_all: SelectAllMode::default(),
            theme_name: "hacker".to_string(),
            toast_secs: 3,
            report_min_ms: timing.min_ms,
            report_max_ms: timing.max_ms,
        }
    }
}

impl ConfigState {
    pub fn table_options(&self) -> TableOptions {
        TableOptions::default()
            .with_page_size(self.page_size)
            .with_select_all(self.select_all)
    }

    pub fn report_timing(&self) -> ReportTiming {
        ReportTiming {
            min_ms: self.report_min_ms,
            max_ms: self.report_max_ms,
        }
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }
}
