//! # InputBox Component
//!
//! Single-line text input used for both the chat prompt and the
//! knowledge-base topic field.
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `focused` and `disabled` are
//! props synced from the parent every frame. When the text is wider than the
//! box, the view scrolls horizontally so the cursor stays visible.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted non-blank text (Enter pressed)
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Byte offset of the cursor, always on a char boundary
    cursor: usize,
    pub title: &'static str,
    pub placeholder: &'static str,
    /// Prop: rejects all editing and shows the placeholder
    pub disabled: bool,
    /// Prop: draws the cursor and a highlighted border
    pub focused: bool,
    clear_on_submit: bool,
}

impl InputBox {
    pub fn new(title: &'static str, placeholder: &'static str) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            title,
            placeholder,
            disabled: false,
            focused: false,
            clear_on_submit: true,
        }
    }

    /// Keep the text after Enter instead of clearing it.
    pub fn keep_on_submit(mut self) -> Self {
        self.clear_on_submit = false;
        self
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn insert_str(&mut self, text: &str) {
        let text: String = text.chars().map(|c| if c == '\n' { ' ' } else { c }).collect();
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.cursor)
    }

    /// The slice of the buffer that fits in `width` columns with the cursor
    /// visible, and the cursor's column within it.
    fn visible_window(&self, width: u16) -> (&str, u16) {
        let width = width as usize;
        if width == 0 {
            return ("", 0);
        }
        let mut start = 0;
        // Drop leading chars until the cursor fits (one column reserved for it)
        while self.buffer[start..self.cursor].width() >= width {
            let c = self.buffer[start..].chars().next().unwrap_or(' ');
            start += c.len_utf8();
        }
        let cursor_col = self.buffer[start..self.cursor].width() as u16;

        let mut end = start;
        let mut used = 0;
        for c in self.buffer[start..].chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            end += c.len_utf8();
        }
        (&self.buffer[start..end], cursor_col)
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                self.insert_str(c.encode_utf8(&mut [0; 4]));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                let next = self.next_boundary();
                if next == self.cursor {
                    return None;
                }
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => {
                let text = self.buffer.trim().to_string();
                if text.is_empty() {
                    return None;
                }
                if self.clear_on_submit {
                    self.clear();
                }
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused && !self.disabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .title(self.title)
            .border_style(border_style)
            .title_style(border_style);
        let inner = block.inner(area);

        let show_placeholder = self.disabled || self.buffer.is_empty();
        let (text, cursor_col) = if show_placeholder {
            (self.placeholder, 0)
        } else {
            self.visible_window(inner.width)
        };
        let style = if show_placeholder {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
        } else {
            Style::default()
        };

        frame.render_widget(Paragraph::new(text).style(style).block(block), area);

        if self.focused && !self.disabled && inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position(Position {
                x: inner.x + cursor_col.min(inner.width - 1),
                y: inner.y,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_and_submit_clears() {
        let mut input = InputBox::new("Message", "Type your message...");
        type_str(&mut input, "  hello  ");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("hello".to_string()))
        );
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_keep_on_submit() {
        let mut input = InputBox::new("Topic", "").keep_on_submit();
        type_str(&mut input, "rust");
        input.handle_event(&TuiEvent::Submit);
        assert_eq!(input.buffer, "rust");
    }

    #[test]
    fn test_blank_submit_ignored() {
        let mut input = InputBox::new("Message", "");
        type_str(&mut input, "   ");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut input = InputBox::new("Message", "Read-only mode");
        input.disabled = true;
        assert_eq!(input.handle_event(&TuiEvent::InputChar('x')), None);
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_cursor_editing_multibyte() {
        let mut input = InputBox::new("Message", "");
        type_str(&mut input, "héllo");
        input.handle_event(&TuiEvent::Home);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "hllo");
        input.handle_event(&TuiEvent::End);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "hll");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new("Message", "");
        input.handle_event(&TuiEvent::Paste("a\nb".to_string()));
        assert_eq!(input.buffer, "a b");
    }

    #[test]
    fn test_visible_window_follows_cursor() {
        let mut input = InputBox::new("Message", "");
        type_str(&mut input, "abcdefghij");
        let (text, col) = input.visible_window(5);
        assert_eq!(text, "ghij");
        assert_eq!(col, 4);

        input.handle_event(&TuiEvent::Home);
        let (text, col) = input.visible_window(5);
        assert_eq!(text, "abcde");
        assert_eq!(col, 0);
    }
}
