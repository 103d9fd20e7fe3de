// SafeYatra - pilgrim safety companion and command center for Simhastha 2028
//
// A terminal front end with two apps behind one login:
// - Router: mode selection → login → role screen, logout back to the start
// - Login: contact + one-time code against a simulated gateway
// - Pilgrim app: SOS, location/connectivity status, quick actions
// - Command center: alerts, crowd heatmap, drone fleet, lost & found
// - Event system: background tasks report back over an mpsc channel
//
// Headless mode (SAFEYATRA_NO_TUI=1) runs a scripted walkthrough of both
// apps instead of the TUI.

mod cli;
mod config;
mod demo;
mod events;
mod i18n;
mod logging;
mod login;
mod router;
mod screens;
mod session;
mod signals;
mod theme;
mod tui;

use anyhow::Result;
use config::Config;
use logging::LogBuffer;

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --path)
    // If a command was handled, exit early
    if cli::handle_cli()? {
        return Ok(());
    }

    // Create default config file on first run
    Config::ensure_config_exists();

    // Load configuration first to determine TUI vs headless mode
    let config = Config::from_env();

    // In TUI mode logs go to the activity panel, in headless mode to stdout.
    // The guard must live until exit so buffered file logs flush.
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, config.enable_tui, &log_buffer);

    tracing::info!(
        "SafeYatra v{} starting (theme: {}, language: {})",
        config::VERSION,
        config.theme,
        config.language.code()
    );
    if let Some(path) = Config::config_path() {
        tracing::debug!("Config file: {}", path.display());
    }

    if config.enable_tui {
        tracing::info!("Starting TUI");
        if let Err(e) = tui::run_tui(config, log_buffer).await {
            tracing::error!("TUI error: {:?}", e);
        }
    } else {
        tracing::info!("TUI disabled, running headless walkthrough");
        tokio::select! {
            result = demo::run_walkthrough(&config) => {
                let sessions = result?;
                tracing::info!("Walkthrough complete: {} sessions", sessions.len());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
