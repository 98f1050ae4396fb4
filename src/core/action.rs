//! # Actions
//!
//! Everything that can happen in Cognitia becomes an `Action`.
//! User presses Enter? That's `Action::SendMessage(text)`.
//! The backend answers? That's `Action::AnswerReceived(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the caller should
//! perform. No side effects here. I/O happens in `effect::perform`.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//!                                              │
//!            Action  ←  perform(effect)  ←─────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::api::OperationFailed;
use crate::core::message::Role;
use crate::core::state::{App, PrepareResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User submitted a question.
    SendMessage(String),
    AnswerReceived(Result<String, OperationFailed>),
    /// User asked for a debate on an agent message.
    RequestDebate { message_id: String, content: String },
    DebateReceived(Result<String, OperationFailed>),
    /// User asked to prepare the knowledge base for a topic.
    PrepareTopic(String),
    TopicPrepared(Result<String, OperationFailed>),
    SelectConversation(String),
    NewConversation,
    ToggleLeftPanel,
    ToggleRightPanel,
    /// Delayed auto-close after a successful prepare.
    CloseRightPanel { generation: u64 },
    Quit,
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SubmitQuestion(String),
    SubmitDebate(String),
    SubmitTopic(String),
    ScheduleRightPanelClose { delay: Duration, generation: u64 },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SendMessage(text) => {
            if app.read_only {
                app.status_message = "Read-only mode: start a new chat to ask questions".to_string();
                return Effect::None;
            }
            let text = text.trim();
            if text.is_empty() {
                return Effect::None;
            }
            app.push_message(Role::User, text);
            app.answering = true;
            app.status_message = "Thinking...".to_string();
            Effect::SubmitQuestion(text.to_string())
        }
        Action::AnswerReceived(result) => {
            app.answering = false;
            match result {
                Ok(answer) => {
                    app.push_message(Role::Agent, answer);
                    app.status_message = "Ready".to_string();
                }
                Err(e) => {
                    app.push_notice(format!("Error: {}", e.message));
                    app.status_message = "Request failed".to_string();
                }
            }
            Effect::None
        }
        Action::RequestDebate {
            message_id,
            content,
        } => {
            if app.read_only {
                return Effect::None;
            }
            let Some(message) = app.messages.iter_mut().find(|m| m.id == message_id) else {
                debug!("Debate requested for unknown message {}", message_id);
                return Effect::None;
            };
            if !message.can_debate() {
                debug!("Debate already generated or unavailable for {}", message_id);
                return Effect::None;
            }
            // Flipped before the server answers and never rolled back.
            message.debate_generated = true;
            app.debating = true;
            app.status_message = "Generating debate...".to_string();
            Effect::SubmitDebate(content)
        }
        Action::DebateReceived(result) => {
            app.debating = false;
            match result {
                Ok(debate) => {
                    app.push_message(Role::Agent, format!("Debate Response:\n\n{debate}"));
                    app.status_message = "Ready".to_string();
                }
                Err(e) => {
                    app.push_notice(format!("Error generating debate: {}", e.message));
                    app.status_message = "Debate failed".to_string();
                }
            }
            Effect::None
        }
        Action::PrepareTopic(topic) => {
            let topic = topic.trim();
            if topic.is_empty() {
                return Effect::None;
            }
            app.last_prepare_result = None;
            app.preparing_topic = true;
            app.status_message = format!("Preparing '{topic}'...");
            Effect::SubmitTopic(topic.to_string())
        }
        Action::TopicPrepared(result) => {
            app.preparing_topic = false;
            match result {
                Ok(message) => {
                    app.last_prepare_result = Some(PrepareResult {
                        success: true,
                        message,
                    });
                    app.status_message = "Knowledge base ready".to_string();
                    Effect::ScheduleRightPanelClose {
                        delay: app.auto_close_delay,
                        generation: app.right_panel_generation,
                    }
                }
                Err(e) => {
                    app.last_prepare_result = Some(PrepareResult {
                        success: false,
                        message: e.message,
                    });
                    app.status_message = "Topic preparation failed".to_string();
                    Effect::None
                }
            }
        }
        Action::SelectConversation(id) => {
            let history = Arc::clone(&app.history);
            let Some(chat) = history.find_conversation(&id) else {
                debug!("Select ignored, no conversation {}", id);
                return Effect::None;
            };
            app.messages = chat.messages.clone();
            app.selected_conversation_id = Some(id);
            app.read_only = true;
            app.left_panel_open = false;
            app.status_message = chat.title.clone();
            Effect::None
        }
        Action::NewConversation => {
            app.messages.clear();
            app.selected_conversation_id = None;
            app.read_only = false;
            app.set_right_panel(true);
            app.last_prepare_result = None;
            app.status_message = "New chat".to_string();
            Effect::None
        }
        Action::ToggleLeftPanel => {
            app.left_panel_open = !app.left_panel_open;
            Effect::None
        }
        Action::ToggleRightPanel => {
            let open = !app.right_panel_open;
            app.set_right_panel(open);
            Effect::None
        }
        Action::CloseRightPanel { generation } => {
            if generation == app.right_panel_generation {
                app.right_panel_open = false;
            } else {
                debug!(
                    "Auto-close skipped: panel changed since scheduling ({} != {})",
                    generation, app.right_panel_generation
                );
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
