//! # Effect Execution
//!
//! Turns an `Effect` returned by `update()` into the `Action` that completes
//! it. This is the only place the controller touches the knowledge service.
//! Callers decide where it runs; the TUI spawns it on a tokio task.

use log::info;

use crate::api::KnowledgeService;
use crate::core::action::{Action, Effect};

/// Perform `effect` and return the completion action, if any.
///
/// Service failures come back inside the action (`Err(OperationFailed)`),
/// never as a panic or an early return, so every in-flight flag gets cleared.
pub async fn perform(effect: Effect, service: &dyn KnowledgeService) -> Option<Action> {
    match effect {
        Effect::SubmitQuestion(question) => {
            let result = service.submit_question(&question).await;
            Some(Action::AnswerReceived(result))
        }
        Effect::SubmitDebate(question) => {
            let result = service.submit_debate_request(&question).await;
            Some(Action::DebateReceived(result))
        }
        Effect::SubmitTopic(topic) => {
            let result = service.submit_topic(&topic).await;
            Some(Action::TopicPrepared(result))
        }
        Effect::ScheduleRightPanelClose { delay, generation } => {
            info!("Right panel auto-close in {:?} (generation {})", delay, generation);
            tokio::time::sleep(delay).await;
            Some(Action::CloseRightPanel { generation })
        }
        Effect::None | Effect::Quit => None,
    }
}
