// Components module - one render module per UI region
//
// Layout, top to bottom:
// - Title bar: app name and service status
// - Main area: file picker (left) and conversation (right)
// - Progress gauge: only while an upload is in flight
// - Logs panel: toggled with 'l'
// - Status bar: uptime, selected file, key hints

pub mod chat_panel;
pub mod logs_panel;
pub mod picker_panel;
pub mod progress_panel;
pub mod status_bar;
pub mod title_bar;

use crate::tui::app::App;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

/// Render the whole frame
pub fn draw(f: &mut Frame, app: &App) {
    let mut constraints = vec![Constraint::Length(1), Constraint::Min(5)];
    if app.session.is_uploading {
        constraints.push(Constraint::Length(3));
    }
    if app.show_logs {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Length(2));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    title_bar::render(f, rows[0], app);

    // Main area: picker on the left, conversation on the right
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[1]);
    picker_panel::render(f, columns[0], app);
    chat_panel::render(f, columns[1], app);

    let mut next = 2;
    if app.session.is_uploading {
        progress_panel::render(f, rows[next], app);
        next += 1;
    }
    if app.show_logs {
        logs_panel::render(f, rows[next], app);
        next += 1;
    }
    status_bar::render(f, rows[next], app);
}
