// soundsense - terminal client for an audio analysis service
//
// Lets a user pick an .mp3/.wav file, uploads it to the Analysis Service as
// multipart form data, animates a client-side progress estimate, and shows
// the returned transcript and speaker count as a chat-style conversation.
//
// Architecture:
// - Session: client-side state machine for one upload/analyze interaction
// - Client (reqwest): one POST /analyze per submit, no retry
// - TUI (ratatui): file picker, conversation log, progress gauge
// - Headless mode: `soundsense FILE` analyzes one file and prints results

mod cli;
mod client;
mod config;
mod events;
mod headless;
mod logging;
mod picker;
mod session;
mod tui;

use anyhow::{bail, Result};
use cli::CliAction;
use config::Config;
use logging::{LogBuffer, TuiLogLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --path)
    let action = cli::handle_cli();
    if matches!(action, CliAction::Done) {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    let tui_mode = matches!(action, CliAction::Tui) && config.enable_tui;

    // Create log buffer for TUI mode
    let log_buffer = LogBuffer::new();

    // Initialize tracing with conditional output
    // In TUI mode: capture logs to buffer (prevents garbling the display)
    // In headless mode: output logs to stderr
    // File logging: optionally write to rotating log files (in addition to above)
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("soundsense={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> = if config
        .logging
        .file_enabled
    {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let file_appender =
                    tracing_appender::rolling::daily(&config.logging.file_dir, "soundsense.log");
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                // File layer uses JSON format for structured log parsing
                // (constructed per branch so its subscriber type parameter can
                // be inferred against each distinct layer stack)
                if tui_mode {
                    let file_layer = tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .with(file_layer)
                        .init();
                } else {
                    let file_layer = tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                        .with(file_layer)
                        .init();
                }
                Some(guard)
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                // Fall back to non-file logging
                if tui_mode {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                } else {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                        .init();
                }
                None
            }
        }
    } else if tui_mode {
        tracing_subscriber::registry()
            .with(filter)
            .with(TuiLogLayer::new(log_buffer.clone()))
            .init();
        None
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        None
    };

    tracing::debug!("Service URL: {}", config.service_base_url);

    match action {
        CliAction::Analyze(path) => headless::run(&config, &path).await,
        CliAction::Tui => {
            if !tui_mode {
                bail!("TUI disabled (SOUNDSENSE_NO_TUI); pass an audio file to analyze headlessly");
            }
            tracing::info!("Starting TUI");
            tui::run_tui(config, log_buffer).await
        }
        CliAction::Done => unreachable!("handled above"),
    }
}
