// Title bar component

use crate::config::VERSION;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the title bar: app name, version, service URL
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(
            " ♪ soundsense ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("v{} ", VERSION), Style::default().fg(Color::DarkGray)),
        Span::raw("│ Audio Analysis & Transcription │ "),
        Span::styled(&app.service_url, Style::default().fg(Color::DarkGray)),
    ]);

    f.render_widget(Paragraph::new(title), area);
}
