use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use locus_core::{InMemoryStore, JsonFileSource, LocationSource, MockLocations, SelectAllMode};

mod action;
mod app;
mod backend;
mod config_file;
mod export;
mod input;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;
use model::config::ConfigState;
use model::toast::ToastState;

/// Locus: browse, search and manage business locations from the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file of locations (defaults to generated sample data)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Rows per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,

    /// Seed for the sample data generator
    #[arg(long)]
    seed: Option<u64>,

    /// Select-all behaviour on a fully selected page: toggle or select-only
    #[arg(long, value_parser = parse_select_all)]
    select_all: Option<SelectAllMode>,

    /// Write logs to this file instead of the cache directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_select_all(s: &str) -> Result<SelectAllMode, String> {
    SelectAllMode::parse(s).ok_or_else(|| format!("expected 'toggle' or 'select-only', got '{s}'"))
}

/// Resolve config from CLI flags > env vars > CWD file > platform file > defaults.
fn resolve_config(args: &Args) -> ConfigState {
    let mut state = ConfigState::default();
    config_file::apply_to_config_state(&config_file::load_config(), &mut state);
    config_file::apply_env(&mut state);

    if let Some(ref path) = args.data {
        state.data_path = Some(path.clone());
    }
    if let Some(n) = args.page_size {
        state.page_size = n.max(1);
    }
    if let Some(ref theme) = args.theme {
        state.theme_name = theme.clone();
    }
    if let Some(seed) = args.seed {
        state.seed = Some(seed);
    }
    if let Some(mode) = args.select_all {
        state.select_all = mode;
    }
    state
}

/// Install a file-backed tracing subscriber; the terminal belongs to the UI.
fn init_logging(
    log_file: Option<&PathBuf>,
) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let (dir, name) = match log_file {
        Some(path) => (
            path.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "locus.log".to_string()),
        ),
        None => (
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("locus")
                .join("logs"),
            "locus.log".to_string(),
        ),
    };
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(guard)
}

fn load_store(config: &ConfigState) -> anyhow::Result<(InMemoryStore, String)> {
    match &config.data_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("data file not found: {}", path.display());
            }
            let source = JsonFileSource::new(path);
            let label = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| source.name().to_string());
            Ok((InMemoryStore::from_source(&source)?, label))
        }
        None => {
            let mut source = MockLocations::new();
            if let Some(seed) = config.seed {
                source = source.with_seed(seed);
            }
            Ok((InMemoryStore::from_source(&source)?, source.name().to_string()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let _log_guard = init_logging(args.log_file.as_ref())?;
    let config = resolve_config(&args);
    tracing::info!(
        page_size = config.page_size,
        select_all = config.select_all.label(),
        theme = %config.theme_name,
        "starting locus"
    );

    let (store, source_label) = load_store(&config)?;
    tracing::info!(count = store.len(), source = %source_label, "records loaded");

    let theme = theme::Theme::by_name(&config.theme_name);
    let mut app = App::new(store, config.table_options(), theme)?;
    app.source_label = source_label;
    app.toasts = ToastState::new(config.toast_lifetime());
    app.clipboard = true;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    // Report service: commands in, events out
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<tui_event::BackendCommand>();
    let cancel = CancellationToken::new();
    app.backend_cmd_tx = Some(cmd_tx);

    let service = tokio::spawn(backend::run_report_service(
        cmd_rx,
        event_tx,
        config.report_timing(),
        cancel.clone(),
    ));

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let action = input::map_event(&evt, &app.input_mode);
                    app.update(action);
                }
            } => {}
            _ = cancel.cancelled() => {
                app.should_quit = true;
            }
        }

        app.update(action::Action::Tick);

        if app.should_quit {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    let _ = service.await;
    tracing::info!("locus exited");
    Ok(())
}
