use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::message::{Message, Role};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat bubble.
///
/// `MessageBubble` is created fresh each frame by `MessageList`. Content is
/// wrapped with `textwrap` up front and rendered line by line, so
/// [`calculate_height`](Self::calculate_height) is exact and the list can lay
/// out its scroll canvas without rendering first.
///
/// Agent messages that can be debated get a footer line with the debate
/// state: `[Ctrl+D] Generate Debate`, `Generating...` or `Debate Generated`.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    pub is_selected: bool,
    /// Show the debate footer (debatable agent message, not read-only)
    pub show_debate: bool,
    /// A debate request is in flight somewhere in the thread
    pub debating: bool,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, is_selected: bool, show_debate: bool, debating: bool) -> Self {
        Self {
            message,
            is_selected,
            show_debate,
            debating,
        }
    }

    /// Rendered height for `message` at `width`, borders included.
    pub fn calculate_height(message: &Message, show_debate: bool, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }
        let lines = u16::try_from(wrap_content(&message.content, content_width).len())
            .unwrap_or(u16::MAX);
        lines
            .max(1)
            .saturating_add(u16::from(show_debate))
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

pub fn wrap_content(content: &str, width: u16) -> Vec<String> {
    let content = content.trim();
    if content.is_empty() || width == 0 {
        return Vec::new();
    }
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(content, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

fn author(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Agent => "Cognitia",
    }
}

fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Blue),
        Role::Agent => Style::default().fg(Color::Magenta),
    }
}

pub fn debate_label(message: &Message, debating: bool) -> Span<'static> {
    if message.debate_generated {
        Span::styled("Debate Generated", Style::default().fg(Color::DarkGray))
    } else if debating {
        Span::styled(
            "Generating...",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::DIM),
        )
    } else {
        Span::styled(
            "[Ctrl+D] Generate Debate",
            Style::default().fg(Color::Magenta),
        )
    }
}

impl Widget for MessageBubble<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = role_style(self.message.role);
        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let time = self
            .message
            .created_at
            .with_timezone(&Local)
            .format("%H:%M");
        let title = format!(" {} · {} ", author(self.message.role), time);

        let block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = wrap_content(&self.message.content, inner.width)
            .into_iter()
            .map(Line::from)
            .collect();
        if self.show_debate {
            lines.push(Line::from(debate_label(self.message, self.debating)));
        }

        Paragraph::new(Text::from(lines)).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(content: &str) -> Message {
        Message::new("m1", Role::Agent, content)
    }

    #[test]
    fn calculate_height_empty_content_returns_minimum() {
        assert_eq!(MessageBubble::calculate_height(&agent("   "), false, 40), 3);
    }

    #[test]
    fn calculate_height_zero_width_returns_one() {
        assert_eq!(MessageBubble::calculate_height(&agent("hi"), false, 3), 1);
    }

    #[test]
    fn calculate_height_wraps_at_width() {
        // 10 wide - 4 overhead = 6 columns: "Hello" | "world"
        assert_eq!(MessageBubble::calculate_height(&agent("Hello world"), false, 10), 4);
    }

    #[test]
    fn calculate_height_counts_blank_lines_and_footer() {
        let msg = agent("Debate Response:\n\nboth sides");
        assert_eq!(MessageBubble::calculate_height(&msg, false, 80), 5);
        assert_eq!(MessageBubble::calculate_height(&msg, true, 80), 6);
    }

    #[test]
    fn calculate_height_saturates_on_huge_reply() {
        let msg = agent(&"line\n".repeat(70_000));
        assert_eq!(MessageBubble::calculate_height(&msg, true, 80), u16::MAX);
    }

    #[test]
    fn debate_label_reflects_state() {
        let mut msg = agent("answer");
        assert_eq!(debate_label(&msg, false).content, "[Ctrl+D] Generate Debate");
        assert_eq!(debate_label(&msg, true).content, "Generating...");
        msg.debate_generated = true;
        assert_eq!(debate_label(&msg, true).content, "Debate Generated");
    }

    #[test]
    fn role_styles_differ() {
        assert_ne!(role_style(Role::User), role_style(Role::Agent));
        assert_eq!(author(Role::Agent), "Cognitia");
    }
}
