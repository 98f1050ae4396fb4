//! # Messages and Conversations
//!
//! A `Message` is one bubble in the thread. A `Conversation` is a stored,
//! titled sequence of them.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Whether a debate may be requested for this message.
    pub debate_available: bool,
    /// Flips false → true once, when a debate is requested. Never reverts.
    pub debate_generated: bool,
}

impl Message {
    pub fn new(id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            created_at: Utc::now(),
            debate_available: role == Role::Agent,
            debate_generated: false,
        }
    }

    /// An agent-side notice (e.g. an error) that can't be debated.
    pub fn notice(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            debate_available: false,
            ..Self::new(id, Role::Agent, content)
        }
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// True if a debate could still be requested for this message.
    pub fn can_debate(&self) -> bool {
        self.debate_available && !self.debate_generated
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_messages_are_debatable() {
        let msg = Message::new("m1", Role::Agent, "answer");
        assert!(msg.debate_available);
        assert!(!msg.debate_generated);
        assert!(msg.can_debate());
    }

    #[test]
    fn test_user_messages_are_not_debatable() {
        let msg = Message::new("m1", Role::User, "question");
        assert!(msg.is_user());
        assert!(!msg.can_debate());
    }

    #[test]
    fn test_notice_is_agent_but_not_debatable() {
        let msg = Message::notice("m1", "Error: boom");
        assert_eq!(msg.role, Role::Agent);
        assert!(!msg.can_debate());
    }
}
