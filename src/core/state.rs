//! # Application State
//!
//! Core business state for Cognitia. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── history: Arc<dyn ConversationStore>   // past chats (read-only)
//! ├── messages: Vec<Message>                // current thread, append-only
//! ├── answering / debating / preparing_topic
//! ├── read_only: bool                       // viewing a stored chat
//! ├── selected_conversation_id: Option      // Some iff messages came from history
//! ├── left_panel_open / right_panel_open
//! ├── last_prepare_result: Option           // knowledge-base banner
//! └── status_message: String                // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;
use std::time::Duration;

use crate::core::config::ResolvedConfig;
use crate::core::history::ConversationStore;
use crate::core::message::{Message, Role};

/// Outcome of the last topic preparation, shown as a banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareResult {
    pub success: bool,
    pub message: String,
}

pub struct App {
    pub history: Arc<dyn ConversationStore>,
    pub messages: Vec<Message>,
    pub answering: bool,
    pub debating: bool,
    pub preparing_topic: bool,
    pub read_only: bool,
    pub selected_conversation_id: Option<String>,
    pub left_panel_open: bool,
    pub right_panel_open: bool,
    pub last_prepare_result: Option<PrepareResult>,
    pub status_message: String,
    pub auto_close_delay: Duration,
    /// Bumped on every visibility change of the right panel that isn't the
    /// auto-close itself. A scheduled close only fires if this is unchanged.
    pub right_panel_generation: u64,
    next_message_seq: u64,
}

impl App {
    pub fn new(history: Arc<dyn ConversationStore>) -> Self {
        Self {
            history,
            messages: Vec::new(),
            answering: false,
            debating: false,
            preparing_topic: false,
            read_only: false,
            selected_conversation_id: None,
            left_panel_open: false,
            right_panel_open: true,
            last_prepare_result: None,
            status_message: String::from("Welcome to Cognitia!"),
            auto_close_delay: Duration::from_millis(crate::core::config::DEFAULT_AUTO_CLOSE_DELAY_MS),
            right_panel_generation: 0,
            next_message_seq: 0,
        }
    }

    pub fn from_config(history: Arc<dyn ConversationStore>, config: &ResolvedConfig) -> Self {
        Self {
            auto_close_delay: config.auto_close_delay,
            ..Self::new(history)
        }
    }

    /// Append a message with a fresh, session-unique id. Returns the id.
    pub fn push_message(&mut self, role: Role, content: impl Into<String>) -> String {
        let id = self.next_message_id();
        self.messages.push(Message::new(id.clone(), role, content));
        id
    }

    /// Append an undebatable agent notice (error text). Returns the id.
    pub fn push_notice(&mut self, content: impl Into<String>) -> String {
        let id = self.next_message_id();
        self.messages.push(Message::notice(id.clone(), content));
        id
    }

    pub fn find_message(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Set right panel visibility from a user-driven change, invalidating
    /// any pending auto-close.
    pub fn set_right_panel(&mut self, open: bool) {
        self.right_panel_open = open;
        self.right_panel_generation += 1;
    }

    /// True while any request is in flight.
    pub fn is_busy(&self) -> bool {
        self.answering || self.debating || self.preparing_topic
    }

    fn next_message_id(&mut self) -> String {
        self.next_message_seq += 1;
        format!("msg-{}", self.next_message_seq)
    }
}
