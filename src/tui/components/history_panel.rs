//! # History Panel Component
//!
//! Left sidebar listing previous chats. Enter opens the highlighted chat
//! (read-only), `n` starts a new one, Esc hands focus back to the input.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `HistoryPanelState` lives in `TuiState`
//! - `HistoryPanel` is created each frame with borrowed state

use chrono::{DateTime, Local, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding};
use unicode_width::UnicodeWidthStr;

use crate::core::message::Conversation;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const HISTORY_PANEL_WIDTH: u16 = 32;

/// Persistent state for the history panel.
pub struct HistoryPanelState {
    pub list_state: ListState,
    pub selected: usize,
    count: usize,
}

impl HistoryPanelState {
    pub fn new(count: usize) -> Self {
        let mut list_state = ListState::default();
        if count > 0 {
            list_state.select(Some(0));
        }
        Self {
            list_state,
            selected: 0,
            count,
        }
    }
}

/// Events emitted by the history panel.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEvent {
    Open(usize),
    NewChat,
    Dismiss,
}

impl EventHandler for HistoryPanelState {
    type Event = HistoryEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<HistoryEvent> {
        match event {
            TuiEvent::Escape => Some(HistoryEvent::Dismiss),
            TuiEvent::CursorUp => {
                if self.count > 0 {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if self.count > 0 {
                    self.selected = (self.selected + 1).min(self.count - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit if self.count > 0 => Some(HistoryEvent::Open(self.selected)),
            TuiEvent::InputChar('n') => Some(HistoryEvent::NewChat),
            _ => None,
        }
    }
}

/// Transient render wrapper for the history panel.
pub struct HistoryPanel<'a> {
    state: &'a mut HistoryPanelState,
    conversations: &'a [Conversation],
    current_id: Option<&'a str>,
    focused: bool,
}

impl<'a> HistoryPanel<'a> {
    pub fn new(
        state: &'a mut HistoryPanelState,
        conversations: &'a [Conversation],
        current_id: Option<&'a str>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            conversations,
            current_id,
            focused,
        }
    }
}

impl Component for HistoryPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .title(" Previous Chats ")
            .title_bottom(Line::from(" Enter Open  n New ").centered())
            .border_style(border_style)
            .padding(Padding::horizontal(1));

        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .conversations
            .iter()
            .map(|chat| {
                let is_current = self.current_id == Some(chat.id.as_str());
                let marker = if is_current { "● " } else { "  " };
                let title_style = if is_current {
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let title_width = inner_width.saturating_sub(marker.width());
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(marker, title_style),
                        Span::styled(truncate_str(&chat.title, title_width), title_style),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", chat_summary(chat)),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// "2 messages • Jan 15"
fn chat_summary(chat: &Conversation) -> String {
    let count = chat.messages.len();
    let noun = if count == 1 { "message" } else { "messages" };
    format!("{count} {noun} • {}", format_date(chat.started_at))
}

/// Format a timestamp as "Jan 15" style date.
fn format_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%b %d").to_string()
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}
