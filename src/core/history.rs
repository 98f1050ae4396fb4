//! # Chat History
//!
//! Read-only lookup of past conversations. The shipped store is an in-memory
//! list seeded at startup; anything implementing `ConversationStore` (a real
//! database, say) can take its place without the controller noticing.

use chrono::{Duration, Utc};

use crate::core::message::{Conversation, Message, Role};

pub trait ConversationStore: Send + Sync {
    /// All conversations, in display order.
    fn conversations(&self) -> &[Conversation];

    fn find_conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations().iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Default)]
pub struct ChatHistory {
    conversations: Vec<Conversation>,
}

impl ChatHistory {
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self { conversations }
    }

    /// The demonstration history shown on first launch.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let one_day_ago = now - Duration::days(1);
        let two_days_ago = now - Duration::days(2);

        Self::new(vec![
            Conversation {
                id: "1".to_string(),
                title: "Chat #1 - AI Ethics".to_string(),
                messages: vec![
                    Message::new(
                        "1-1",
                        Role::User,
                        "What are the main ethical concerns with AI?",
                    )
                    .at(one_day_ago),
                    Message::new(
                        "1-2",
                        Role::Agent,
                        "The main ethical concerns with AI include bias and fairness, privacy \
                         and surveillance, job displacement, accountability and transparency, \
                         and the potential for misuse in autonomous weapons systems.",
                    )
                    .at(one_day_ago + Duration::seconds(30)),
                ],
                started_at: one_day_ago,
            },
            Conversation {
                id: "2".to_string(),
                title: "Chat #2 - Machine Learning".to_string(),
                messages: vec![
                    Message::new("2-1", Role::User, "Explain gradient descent in simple terms")
                        .at(two_days_ago),
                    Message::new(
                        "2-2",
                        Role::Agent,
                        "Gradient descent is like finding the bottom of a valley while \
                         blindfolded. You feel the slope around you and take steps in the \
                         steepest downward direction until you reach the lowest point.",
                    )
                    .at(two_days_ago + Duration::seconds(45)),
                ],
                started_at: two_days_ago,
            },
        ])
    }
}

impl ConversationStore for ChatHistory {
    fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }
}
