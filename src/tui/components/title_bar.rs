//! # TitleBar Component
//!
//! Top line: product name, tagline, read-only badge and status text.
//!
//! Stateless: it receives all data as props and renders what it's given.
//! The badge and status are dropped first on narrow terminals because the
//! line is built left to right and ratatui clips the overflow.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub const TAGLINE: &str = "Not Just Smarter - Kinder, Wiser, and Truly Yours.";

pub struct TitleBar<'a> {
    pub read_only: bool,
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(read_only: bool, status_message: &'a str) -> Self {
        Self {
            read_only,
            status_message,
        }
    }

    fn line(&self) -> Line<'a> {
        let mut spans = vec![
            Span::styled(
                "Cognitia",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {TAGLINE}"), Style::default().fg(Color::DarkGray)),
        ];
        if self.read_only {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                " Read-only mode ",
                Style::default().fg(Color::Black).bg(Color::Gray),
            ));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_read_only_badge_shown_only_when_read_only() {
        let text = text_of(&TitleBar::new(true, "").line());
        assert!(text.contains("Read-only mode"));

        let text = text_of(&TitleBar::new(false, "").line());
        assert!(!text.contains("Read-only mode"));
    }

    #[test]
    fn test_status_appended() {
        let text = text_of(&TitleBar::new(false, "Thinking...").line());
        assert!(text.starts_with("Cognitia"));
        assert!(text.ends_with("| Thinking..."));
    }
}
