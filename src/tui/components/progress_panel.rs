// Progress gauge
//
// Shown only while an upload is in flight. The percentage is the session's
// elapsed-time estimate, not anything the service reports.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

/// Render the simulated progress bar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let label = format!(
        "Processing audio... {}%  ({}s of ~{}s)",
        session.progress_percent, session.elapsed_seconds, session.estimated_total_seconds
    );

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Analysis "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(session.progress_percent as u16)
        .label(label);

    f.render_widget(gauge, area);
}
