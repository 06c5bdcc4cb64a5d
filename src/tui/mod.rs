// TUI module - Terminal User Interface
//
// Manages the terminal using ratatui: initialization and cleanup, the event
// loop (keyboard input, the 1-second progress timer, upload task events),
// and rendering.

pub mod app;
pub mod components;

use crate::client::AnalysisClient;
use crate::config::Config;
use crate::events::SessionEvent;
use crate::logging::LogBuffer;
use crate::picker::FilePicker;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal when
/// done. Teardown aborts any in-flight upload before the app state drops, so
/// a late response can never mutate a torn-down session.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let client = AnalysisClient::new(
        &config.service_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let picker = FilePicker::new(&config.audio_dir)?;

    // Channel carrying upload outcomes back from spawned tasks
    let (event_tx, mut event_rx) = mpsc::channel(16);

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(picker, log_buffer, config.service_base_url.clone());

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app, &client, &event_tx, &mut event_rx).await;

    // Cancel any in-flight upload before leaving
    app.teardown();

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard input (navigation and commands)
/// 2. The 1-second progress interval, enabled only while an upload is in
///    flight - it cannot tick outside that window or after the loop exits
/// 3. Upload task outcomes from the event channel
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &AnalysisClient,
    event_tx: &mpsc::Sender<SessionEvent>,
    event_rx: &mut mpsc::Receiver<SessionEvent>,
) -> Result<()> {
    let mut progress_interval = tokio::time::interval(Duration::from_secs(1));

    loop {
        // Draw the UI
        terminal
            .draw(|f| components::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            key = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        return Some(key_event);
                    }
                }
                None
            } => {
                if let Some(key_event) = key {
                    if handle_key_event(app, key_event, client, event_tx) {
                        // Fresh interval so the first tick lands a full second in
                        progress_interval.reset();
                    }
                }
            }

            // Simulated progress, one tick per second while uploading
            _ = progress_interval.tick(), if app.session.is_uploading => {
                app.session.tick();
            }

            // Upload outcomes
            Some(session_event) = event_rx.recv() => {
                app.apply_event(session_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input; returns true if an upload was started
fn handle_key_event(
    app: &mut App,
    key_event: KeyEvent,
    client: &AnalysisClient,
    event_tx: &mpsc::Sender<SessionEvent>,
) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    match key_event.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
        }
        // File picker navigation
        KeyCode::Up | KeyCode::Char('k') => app.picker.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.picker.move_down(),
        // Stage the highlighted file (disabled while uploading, like the
        // original's disabled file input)
        KeyCode::Enter => {
            if !app.session.is_uploading {
                app.select_current_file();
            }
        }
        // Submit for analysis
        KeyCode::Char('a') | KeyCode::Char('A') => {
            return app.start_upload(client, event_tx);
        }
        // Re-scan the audio directory
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if !app.session.is_uploading {
                app.rescan_files();
            }
        }
        // Toggle the logs panel
        KeyCode::Char('l') | KeyCode::Char('L') => {
            app.show_logs = !app.show_logs;
        }
        _ => {}
    }
    false
}
