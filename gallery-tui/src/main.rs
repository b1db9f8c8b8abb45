//! gallery-tui - Terminal UI for the Infinite Gallery
//!
//! Browse an endless feed of images, open their details and keep favorites
//! across sessions.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use gallery_tui::{
    app::{
        event::{EventHandler, TuiEvent},
        reduce, Action, AppState,
    },
    error::Result,
    map_key,
    runner::perform,
    services::{build_router, Services},
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui,
    views::Page,
};
use libgallery::config::resolve_data_path;
use libgallery::logging::{LogFormat, LogTarget, LoggingConfig};
use libgallery::Config;
use tokio::task::LocalSet;

#[derive(Parser, Debug)]
#[command(name = "gallery-tui")]
#[command(version)]
#[command(about = "Browse an infinite image gallery in the terminal", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "GALLERY_CONFIG")]
    config: Option<PathBuf>,

    /// Location to open instead of the configured start path
    #[arg(short, long)]
    path: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format written to the log file
    #[arg(long, env = "GALLERY_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level
    #[arg(long, env = "GALLERY_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = run(config, cli.path) {
        tracing::error!("gallery-tui failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let log_file = resolve_data_path()
        .context("Could not resolve the data directory")?
        .join("gallery.log");

    LoggingConfig::new(cli.log_format, cli.log_level.clone(), cli.verbose)
        .with_target(LogTarget::File(log_file))
        .init()
        .context("Failed to initialize logging")
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn run(config: Config, path: Option<String>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let local = LocalSet::new();
    let result = local.block_on(&runtime, run_app(&mut terminal, config, path));

    restore_terminal(terminal)?;
    result
}

async fn run_app(terminal: &mut Tui, config: Config, path: Option<String>) -> Result<()> {
    let mut state = AppState::with_banner_ttl(config.banner_duration()?);
    let services = Services::new(&config)?;
    let mut router = build_router(&services.context, &services.origin)?;
    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    let start = path.unwrap_or_else(|| services.start_path.clone());
    tracing::info!(start = %start, "Starting gallery-tui");
    router.start(&start).await;
    state = reduce(state, Action::Routed(router.current_path().to_string()));

    loop {
        let now = Instant::now();
        terminal.draw(|frame| {
            let page = router.current_view_mut().map(|page| page as &mut dyn Page);
            ui::render(frame, &state, page, now);
        })?;

        let event = event_handler.next().await?;
        let now = Instant::now();
        let action = match event {
            TuiEvent::Key(key) => map_key(&state, key),
            other => other.into(),
        };

        state = reduce(state, action.clone());
        state = perform(&mut router, state, action, now).await;

        for message in services.drain_errors() {
            state = reduce(state, Action::ShowBanner { message, at: now });
        }

        if state.should_quit {
            break;
        }
    }

    router.unmount();
    tracing::info!("gallery-tui exiting");
    Ok(())
}
