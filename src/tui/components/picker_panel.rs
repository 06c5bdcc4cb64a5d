// File picker panel
//
// Lists the .mp3/.wav files found in the audio directory. The highlighted
// entry is staged with Enter; the staged file is marked in the list.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the audio file list
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let selected_name = app
        .session
        .selected_file
        .as_ref()
        .map(|file| file.name.as_str());

    let items: Vec<ListItem> = app
        .picker
        .files
        .iter()
        .map(|file| {
            let marker = if Some(file.name.as_str()) == selected_name {
                "● "
            } else {
                "  "
            };
            let label = format!(
                "{}{}  {:.1} MB",
                marker,
                file.name,
                file.size_bytes as f64 / (1024.0 * 1024.0)
            );
            ListItem::new(label)
        })
        .collect();

    let title = format!(" Audio files ({}) ", app.picker.dir.display());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.picker.files.is_empty() {
        state.select(Some(app.picker.cursor));
    }

    f.render_stateful_widget(list, area, &mut state);
}
