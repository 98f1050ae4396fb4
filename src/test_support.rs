//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{KnowledgeService, Operation, OperationFailed};
use crate::core::action::{Action, Effect, update};
use crate::core::effect::perform;
use crate::core::history::ChatHistory;
use crate::core::state::App;

/// A knowledge service that records every call and answers from a script.
pub struct MockService {
    reply: Option<String>,
    calls: Mutex<Vec<(Operation, String)>>,
}

impl MockService {
    /// Every call succeeds with `reply`.
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with that operation's fixed error.
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Operation, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.calls().iter().filter(|(op, _)| *op == operation).count()
    }

    fn respond(&self, operation: Operation, input: &str) -> Result<String, OperationFailed> {
        self.calls
            .lock()
            .unwrap()
            .push((operation, input.to_string()));
        self.reply
            .clone()
            .ok_or_else(|| OperationFailed::new(operation))
    }
}

#[async_trait]
impl KnowledgeService for MockService {
    async fn submit_question(&self, question: &str) -> Result<String, OperationFailed> {
        self.respond(Operation::Send, question)
    }

    async fn submit_debate_request(&self, question: &str) -> Result<String, OperationFailed> {
        self.respond(Operation::Debate, question)
    }

    async fn submit_topic(&self, topic: &str) -> Result<String, OperationFailed> {
        self.respond(Operation::Prepare, topic)
    }
}

/// Creates a test App backed by the seeded history.
pub fn test_app() -> App {
    App::new(Arc::new(ChatHistory::seeded()))
}

/// Run `action` to completion against `service`, feeding each completion
/// back into `update()`. Stops at the first effect that isn't a request
/// (including a scheduled close, which is returned unperformed).
pub async fn drive(app: &mut App, action: Action, service: &dyn KnowledgeService) -> Effect {
    let mut next = action;
    loop {
        let effect = update(app, next);
        match effect {
            Effect::SubmitQuestion(_) | Effect::SubmitDebate(_) | Effect::SubmitTopic(_) => {
                match perform(effect, service).await {
                    Some(action) => next = action,
                    None => return Effect::None,
                }
            }
            other => return other,
        }
    }
}
