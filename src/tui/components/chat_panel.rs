// Conversation panel
//
// Renders the append-only chat log, auto-following the newest message the
// way the original view scrolled to the bottom on every append. Messages are
// word-wrapped to the panel width with a sender prefix on the first line.

use crate::session::{ChatMessage, Sender};
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the conversation log
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Conversation ");
    let inner = block.inner(area);

    let width = inner.width.max(1) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for message in &app.session.conversation {
        lines.extend(message_lines(message, width));
    }

    // Auto-follow: keep the newest lines in view
    let height = inner.height as usize;
    let skip = lines.len().saturating_sub(height);
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();

    f.render_widget(Paragraph::new(visible).block(block), area);
}

/// Wrap one message into display lines with a sender prefix
fn message_lines(message: &ChatMessage, width: usize) -> Vec<Line<'static>> {
    let (prefix, style) = match message.sender {
        Sender::User => (
            "You ▸ ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Sender::Bot => (
            "Bot ▸ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let body_width = width.saturating_sub(prefix.chars().count()).max(10);
    let wrapped = wrap_text(&message.text, body_width);
    let indent = " ".repeat(prefix.chars().count());

    wrapped
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let head = if i == 0 {
                Span::styled(prefix.to_string(), style)
            } else {
                Span::raw(indent.clone())
            };
            Line::from(vec![head, Span::raw(text)])
        })
        .collect()
}

/// Greedy word wrap; words longer than the width are split hard
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if !current.is_empty() && current.chars().count() + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
        }
        if word_len > width {
            // Split the oversized word across lines
            let mut chars = word.chars().peekable();
            while chars.peek().is_some() {
                let room = width - current.chars().count();
                let chunk: String = chars.by_ref().take(room.max(1)).collect();
                current.push_str(&chunk);
                if chars.peek().is_some() {
                    lines.push(std::mem::take(&mut current));
                }
            }
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = wrap_text("the quick brown fox jumps", 11);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn splits_oversized_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn empty_message_yields_one_blank_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn message_keeps_prefix_on_first_line_only() {
        let message = ChatMessage {
            text: "one two three four five six".to_string(),
            sender: Sender::Bot,
        };
        let lines = message_lines(&message, 20);
        assert!(lines.len() > 1);
        assert_eq!(lines[0].spans[0].content, "Bot ▸ ");
        assert_eq!(lines[1].spans[0].content, "      ");
    }
}
