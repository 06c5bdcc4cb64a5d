// Status bar component
//
// Bottom line: uptime, staged file, last audio duration, key hints.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let file_info = match &app.session.selected_file {
        Some(file) => format!("{} ({:.1} MB)", file.name, file.size_mb()),
        None => "no file selected".to_string(),
    };

    let duration_info = match app.last_duration {
        Some(duration) => format!(" │ last audio: {:.1}s", duration),
        None => String::new(),
    };

    let status_text = format!(
        " {} │ 🎵 {}{} │ ↑↓ navigate · Enter select · a analyze · r rescan · l logs · q quit",
        app.uptime(),
        file_info,
        duration_info,
    );

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
