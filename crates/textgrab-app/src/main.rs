use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use textgrab_config::Config;
use textgrab_config::logging::LoggingConfig;
use textgrab_core::{ChannelSurface, Services};
use textgrab_types::AppEvent;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod profile;
pub mod state;
pub mod status;


use self::controller::{AppController, ChannelSet};
use self::state::AppState;

/// Draw a rectangle on screen, get its text on the clipboard
#[derive(Parser, Debug)]
#[command(name = "textgrab")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file path (default: <config dir>/textgrab/config.json)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Settings store path, overrides the config
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let mut config = profile::load_config(cli.config.as_deref())?;
    if cli.settings.is_some() {
        config.settings_path = cli.settings;
    }
    init_tracing(&config.logging, cli.log_json);
    tracing::info!("textgrab v{} starting", env!("CARGO_PKG_VERSION"));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("textgrab-backend")
        .build()
        .context("Failed to start async runtime")?;

    let channels = ChannelSet::new();
    let services = Services {
        screen: Arc::new(textgrab_ocr::PrimaryDisplay),
        recognizer: textgrab_ocr::build_recognizer(&config.ocr),
        clipboard: Arc::new(textgrab_io::SystemClipboard::new()),
        speaker: Arc::new(textgrab_io::ProcessSpeaker::new(config.speech.clone())),
        surface: Arc::new(ChannelSurface::new(channels.app_to_ui.0.clone())),
    };
    let store = profile::open_settings(&config);
    let events = Arc::new(channels.app_to_ui.0.clone());
    let state = Arc::new(AppState::new(config, services, store, events));

    let shortcut = state.coordinator.shortcut();
    let delta_time = Duration::from_millis(state.config.delta_time);
    let controller = AppController::with_channels(state.clone(), channels);
    let bridge = controller.ui_bridge();

    let tasks = {
        let _guard = runtime.enter();
        let tasks = controller.spawn_tasks();
        let quit_tx = controller.ui_sender();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown requested");
                if let Err(e) = quit_tx.send(AppEvent::Quit).await {
                    tracing::debug!("Backend already stopped: {}", e);
                }
                textgrab_ui::request_quit();
            }
        });
        tasks
    };
    state.coordinator.publish_state();

    // slint must own the main thread
    let ui_result = textgrab_ui::run_ui(bridge, shortcut, delta_time);

    controller.shutdown();
    runtime.block_on(controller::join_tasks(tasks, Duration::from_secs(2)));
    runtime.shutdown_timeout(Duration::from_secs(2));

    let stats = state.status.snapshot();
    tracing::info!(
        "Exiting after {} capture(s), {} empty, {} failed",
        stats.capture_count,
        stats.empty_count,
        stats.error_count
    );
    ui_result
}

fn init_tracing(logging: &LoggingConfig, force_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    if logging.json || force_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(atty::is(atty::Stream::Stderr))
            .with_writer(std::io::stderr)
            .init();
    }
}
