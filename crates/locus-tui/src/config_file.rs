use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use locus_core::SelectAllMode;

use crate::model::config::ConfigState;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub data: Option<DataConfig>,
    pub table: Option<TableConfig>,
    pub display: Option<DisplayConfig>,
    pub reports: Option<ReportsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON file of locations; the mock generator is used when unset.
    pub path: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableConfig {
    pub page_size: Option<usize>,
    pub select_all: Option<SelectAllMode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub toast_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportsConfig {
    pub min_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
}

/// Platform config directory path: `<config_dir>/locus/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("locus").join("config.toml"))
}

/// Load config by cascading CWD `.locus.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".locus.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let data = (base.data.unwrap_or_default(), overlay.data.unwrap_or_default());
    let table = (base.table.unwrap_or_default(), overlay.table.unwrap_or_default());
    let display = (
        base.display.unwrap_or_default(),
        overlay.display.unwrap_or_default(),
    );
    let reports = (
        base.reports.unwrap_or_default(),
        overlay.reports.unwrap_or_default(),
    );

    ConfigFile {
        data: Some(DataConfig {
            path: data.1.path.or(data.0.path),
            seed: data.1.seed.or(data.0.seed),
        }),
        table: Some(TableConfig {
            page_size: table.1.page_size.or(table.0.page_size),
            select_all: table.1.select_all.or(table.0.select_all),
        }),
        display: Some(DisplayConfig {
            theme: display.1.theme.or(display.0.theme),
            toast_secs: display.1.toast_secs.or(display.0.toast_secs),
        }),
        reports: Some(ReportsConfig {
            min_delay_ms: reports.1.min_delay_ms.or(reports.0.min_delay_ms),
            max_delay_ms: reports.1.max_delay_ms.or(reports.0.max_delay_ms),
        }),
    }
}

/// Convert a `ConfigFile` into partial fills on a `ConfigState`.
/// Only sets values that are `Some` in the file config (doesn't overwrite with defaults).
pub fn apply_to_config_state(file_cfg: &ConfigFile, state: &mut ConfigState) {
    if let Some(data) = &file_cfg.data {
        if let Some(ref path) = data.path
            && !path.is_empty()
        {
            state.data_path = Some(PathBuf::from(path));
        }
        if let Some(seed) = data.seed {
            state.seed = Some(seed);
        }
    }
    if let Some(table) = &file_cfg.table {
        if let Some(v) = table.page_size {
            state.page_size = v.max(1);
        }
        if let Some(mode) = table.select_all {
            state.select_all = mode;
        }
    }
    if let Some(disp) = &file_cfg.display {
        if let Some(ref theme) = disp.theme
            && !theme.is_empty()
        {
            state.theme_name = theme.clone();
        }
        if let Some(secs) = disp.toast_secs {
            state.toast_secs = secs.clamp(1, 60);
        }
    }
    if let Some(rep) = &file_cfg.reports {
        if let Some(v) = rep.min_delay_ms {
            state.report_min_ms = v;
        }
        if let Some(v) = rep.max_delay_ms {
            state.report_max_ms = v;
        }
    }
}

/// Apply `LOCUS_*` environment overrides on top of file values.
pub fn apply_env(state: &mut ConfigState) {
    apply_env_from(state, |key| std::env::var(key).ok());
}

fn apply_env_from(state: &mut ConfigState, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("LOCUS_PAGE_SIZE") {
        match v.trim().parse::<usize>() {
            Ok(n) => state.page_size = n.max(1),
            Err(_) => tracing::warn!(value = %v, "ignoring invalid LOCUS_PAGE_SIZE"),
        }
    }
    if let Some(v) = var("LOCUS_DATA")
        && !v.is_empty()
    {
        state.data_path = Some(PathBuf::from(v));
    }
}
