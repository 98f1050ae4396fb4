//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Change Notification
//!
//! State lives in a `core::store::Store`. The loop subscribes a dirty flag
//! to it, so any dispatch (a key press or a completion arriving from a
//! background task) schedules a redraw without the loop inspecting state.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (answering, debating, preparing): draws every ~80ms so the
//!   spinner moves.
//! - **Idle**: sleeps up to 500ms and only redraws on events or dispatches.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::cell::Cell;
use std::io::stdout;
use std::rc::Rc;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::api::{HttpKnowledgeService, KnowledgeService};
use crate::core::action::{Action, Effect};
use crate::core::config::ResolvedConfig;
use crate::core::effect::perform;
use crate::core::history::{ChatHistory, ConversationStore};
use crate::core::state::App;
use crate::core::store::Store;
use crate::tui::component::EventHandler;
use crate::tui::components::{HistoryEvent, HistoryPanelState, InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Chat,
    Topic,
    History,
}

impl Focus {
    /// Tab order: chat, then the knowledge base, then history, skipping
    /// panels that are not on screen.
    pub fn next(self, app: &App, body: Option<Rect>) -> Focus {
        let order = [Focus::Chat, Focus::Topic, Focus::History];
        let start = order.iter().position(|f| *f == self).unwrap_or(0);
        (1..=order.len())
            .map(|step| order[(start + step) % order.len()])
            .find(|f| f.is_available(app, body))
            .unwrap_or(Focus::Chat)
    }

    fn is_available(self, app: &App, body: Option<Rect>) -> bool {
        let (history, topic) = sidebars_shown(app.left_panel_open, app.right_panel_open, body);
        match self {
            Focus::Chat => true,
            Focus::Topic => topic,
            Focus::History => history,
        }
    }
}

/// Which sidebars (history, knowledge base) end up drawn in `body`. Before
/// the first frame the open flags are all there is to go on.
fn sidebars_shown(left_open: bool, right_open: bool, body: Option<Rect>) -> (bool, bool) {
    match body {
        Some(area) => {
            let (left, _, right) = ui::split_body(area, left_open, right_open);
            (left.is_some(), right.is_some())
        }
        None => (left_open, right_open),
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub chat_input: InputBox,
    pub topic_input: InputBox,
    pub message_list: MessageListState,
    pub history: HistoryPanelState,
    pub spinner_frame: usize,
    /// Body area of the last frame drawn
    pub body_area: Option<Rect>,
}

impl TuiState {
    pub fn new(conversation_count: usize) -> Self {
        Self {
            focus: Focus::Chat,
            chat_input: InputBox::new(" Message ", "Type your message..."),
            topic_input: InputBox::new(" Topic ", "Enter a topic (e.g., LLM reasoning)")
                .keep_on_submit(),
            message_list: MessageListState::new(),
            history: HistoryPanelState::new(conversation_count),
            spinner_frame: 0,
            body_area: None,
        }
    }

    /// Drop focus from a panel that has been closed or doesn't fit.
    pub fn sync_focus(&mut self, app: &App) {
        if !self.focus.is_available(app, self.body_area) {
            self.focus = Focus::Chat;
        }
    }

    /// Forget scroll and selection when the displayed thread is replaced.
    fn reset_thread_view(&mut self) {
        self.message_list = MessageListState::new();
        self.focus = Focus::Chat;
    }
}

/// Translate a terminal event into the action it requests, updating
/// TUI-local state (focus, inputs, scroll) along the way.
fn intent_for(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    match event {
        TuiEvent::Resize => return None,
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::ToggleHistory => {
            let (shown, _) = sidebars_shown(true, app.right_panel_open, tui.body_area);
            if !app.left_panel_open && shown {
                tui.focus = Focus::History;
            }
            return Some(Action::ToggleLeftPanel);
        }
        TuiEvent::ToggleKnowledge => {
            let (_, shown) = sidebars_shown(app.left_panel_open, true, tui.body_area);
            if !app.right_panel_open && shown {
                tui.focus = Focus::Topic;
            }
            return Some(Action::ToggleRightPanel);
        }
        TuiEvent::NewChat => {
            tui.reset_thread_view();
            return Some(Action::NewConversation);
        }
        TuiEvent::Debate => return debate_request(app, tui.message_list.selected_index),
        TuiEvent::FocusNext => {
            tui.focus = tui.focus.next(app, tui.body_area);
            return None;
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(event);
            return None;
        }
        _ => {}
    }

    match tui.focus {
        Focus::Chat => match event {
            TuiEvent::CursorUp => {
                tui.message_list.select_prev(app.messages.len());
                None
            }
            TuiEvent::CursorDown => {
                tui.message_list.select_next(app.messages.len());
                None
            }
            TuiEvent::Escape => {
                tui.message_list.selected_index = None;
                tui.message_list.stick_to_bottom = true;
                None
            }
            // Keep the draft until the previous answer is in
            TuiEvent::Submit if app.answering || app.read_only => None,
            _ => match tui.chat_input.handle_event(event)? {
                InputEvent::Submit(text) => {
                    tui.message_list.selected_index = None;
                    tui.message_list.stick_to_bottom = true;
                    Some(Action::SendMessage(text))
                }
                _ => None,
            },
        },
        Focus::Topic => {
            if matches!(event, TuiEvent::Escape) {
                tui.focus = Focus::Chat;
                return None;
            }
            if matches!(event, TuiEvent::Submit) && app.preparing_topic {
                return None;
            }
            match tui.topic_input.handle_event(event)? {
                InputEvent::Submit(topic) => Some(Action::PrepareTopic(topic)),
                InputEvent::ContentChanged => None,
            }
        }
        // Opening a chat mid-request would land the reply in the stored thread
        Focus::History if matches!(event, TuiEvent::Submit) && (app.answering || app.debating) => {
            None
        }
        Focus::History => match tui.history.handle_event(event)? {
            HistoryEvent::Open(index) => {
                let id = app.history.conversations().get(index)?.id.clone();
                tui.reset_thread_view();
                Some(Action::SelectConversation(id))
            }
            HistoryEvent::NewChat => {
                tui.reset_thread_view();
                Some(Action::NewConversation)
            }
            HistoryEvent::Dismiss => {
                tui.focus = Focus::Chat;
                None
            }
        },
    }
}

/// Debate target: the selected agent message if it is debatable, otherwise
/// the most recent debatable one. Nothing while a debate is in flight.
fn debate_request(app: &App, selected: Option<usize>) -> Option<Action> {
    if app.read_only || app.debating {
        return None;
    }
    let message = selected
        .and_then(|i| app.messages.get(i))
        .filter(|m| m.can_debate())
        .or_else(|| app.messages.iter().rev().find(|m| m.can_debate()))?;
    Some(Action::RequestDebate {
        message_id: message.id.clone(),
        content: message.content.clone(),
    })
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Disambiguation lets Ctrl+letter chords arrive intact; terminals
        // without the protocol ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    info!("Knowledge service at {}", config.base_url);
    let service: Arc<dyn KnowledgeService> =
        Arc::new(HttpKnowledgeService::new(config.base_url.clone()));
    let history: Arc<dyn ConversationStore> = Arc::new(ChatHistory::seeded());

    let mut tui = TuiState::new(history.conversations().len());
    let mut store = Store::new(App::from_config(history, &config));

    let needs_redraw = Rc::new(Cell::new(true)); // Force first frame
    {
        let needs_redraw = Rc::clone(&needs_redraw);
        store.subscribe(move |_| needs_redraw.set(true));
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Terminal modes unavailable: {}", e))
        .ok();

    // Completions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();

    loop {
        let animating = store.state().is_busy();

        if animating || needs_redraw.get() {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, store.state(), &mut tui))?;
            needs_redraw.set(false);
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw.set(true);
            if let Some(action) = intent_for(&event, store.state(), &mut tui) {
                should_quit |= dispatch(&mut store, &mut tui, action, &service, &tx);
            }
        }

        while let Ok(action) = rx.try_recv() {
            should_quit |= dispatch(&mut store, &mut tui, action, &service, &tx);
        }

        if should_quit {
            info!("Quit requested");
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Dispatch `action` and start whatever effect it asks for.
/// Returns true when the app should quit.
fn dispatch(
    store: &mut Store,
    tui: &mut TuiState,
    action: Action,
    service: &Arc<dyn KnowledgeService>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let effect = store.dispatch(action);
    tui.sync_focus(store.state());
    match effect {
        Effect::Quit => true,
        Effect::None => false,
        effect => {
            spawn_effect(effect, Arc::clone(service), tx.clone());
            false
        }
    }
}

fn spawn_effect(effect: Effect, service: Arc<dyn KnowledgeService>, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        if let Some(action) = perform(effect, service.as_ref()).await {
            debug!("Effect completed, delivering {:?}", action);
            if tx.send(action).is_err() {
                warn!("Completion dropped: event loop has exited");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::update;
    use crate::core::message::Role;
    use crate::test_support::test_app;

    fn setup() -> (App, TuiState) {
        let app = test_app();
        let tui = TuiState::new(app.history.conversations().len());
        (app, tui)
    }

    fn type_text(tui: &mut TuiState, app: &App, text: &str) {
        for c in text.chars() {
            assert_eq!(intent_for(&TuiEvent::InputChar(c), app, tui), None);
        }
    }

    #[test]
    fn test_chat_submit_sends_message() {
        let (app, mut tui) = setup();
        type_text(&mut tui, &app, "hello");
        let action = intent_for(&TuiEvent::Submit, &app, &mut tui);
        assert_eq!(action, Some(Action::SendMessage("hello".to_string())));
        assert!(tui.chat_input.buffer.is_empty());
    }

    #[test]
    fn test_chat_submit_ignored_while_answering() {
        let (mut app, mut tui) = setup();
        update(&mut app, Action::SendMessage("first".to_string()));
        type_text(&mut tui, &app, "second");
        assert_eq!(intent_for(&TuiEvent::Submit, &app, &mut tui), None);
        assert_eq!(tui.chat_input.buffer, "second");
    }

    #[test]
    fn test_topic_submit_keeps_text() {
        let (app, mut tui) = setup();
        tui.focus = Focus::Topic;
        type_text(&mut tui, &app, "LLM reasoning");
        let action = intent_for(&TuiEvent::Submit, &app, &mut tui);
        assert_eq!(action, Some(Action::PrepareTopic("LLM reasoning".to_string())));
        assert_eq!(tui.topic_input.buffer, "LLM reasoning");
    }

    #[test]
    fn test_topic_submit_ignored_while_preparing() {
        let (mut app, mut tui) = setup();
        update(&mut app, Action::PrepareTopic("rust".to_string()));
        tui.focus = Focus::Topic;
        type_text(&mut tui, &app, "more");
        assert_eq!(intent_for(&TuiEvent::Submit, &app, &mut tui), None);
    }

    #[test]
    fn test_toggle_history_moves_focus() {
        let (mut app, mut tui) = setup();
        let action = intent_for(&TuiEvent::ToggleHistory, &app, &mut tui);
        assert_eq!(action, Some(Action::ToggleLeftPanel));
        assert_eq!(tui.focus, Focus::History);

        update(&mut app, Action::ToggleLeftPanel);
        update(&mut app, Action::ToggleLeftPanel);
        tui.sync_focus(&app);
        assert_eq!(tui.focus, Focus::Chat);
    }

    #[test]
    fn test_history_open_selects_conversation() {
        let (mut app, mut tui) = setup();
        intent_for(&TuiEvent::ToggleHistory, &app, &mut tui);
        update(&mut app, Action::ToggleLeftPanel);

        intent_for(&TuiEvent::CursorDown, &app, &mut tui);
        let action = intent_for(&TuiEvent::Submit, &app, &mut tui);
        assert_eq!(action, Some(Action::SelectConversation("2".to_string())));
        assert_eq!(tui.focus, Focus::Chat);
    }

    #[test]
    fn test_history_escape_returns_to_chat() {
        let (mut app, mut tui) = setup();
        update(&mut app, Action::ToggleLeftPanel);
        tui.focus = Focus::History;
        assert_eq!(intent_for(&TuiEvent::Escape, &app, &mut tui), None);
        assert_eq!(tui.focus, Focus::Chat);
    }

    #[test]
    fn test_focus_cycle_skips_closed_panels() {
        let (mut app, _) = setup();
        assert_eq!(Focus::Chat.next(&app, None), Focus::Topic);
        assert_eq!(Focus::Topic.next(&app, None), Focus::Chat);

        update(&mut app, Action::ToggleLeftPanel);
        assert_eq!(Focus::Topic.next(&app, None), Focus::History);
        assert_eq!(Focus::History.next(&app, None), Focus::Chat);

        update(&mut app, Action::ToggleRightPanel);
        assert_eq!(Focus::Chat.next(&app, None), Focus::History);
    }

    #[test]
    fn test_focus_skips_sidebars_that_do_not_fit() {
        let (mut app, mut tui) = setup();
        update(&mut app, Action::ToggleLeftPanel);
        // Room for the knowledge base only
        tui.body_area = Some(Rect::new(0, 0, 70, 24));

        assert_eq!(Focus::Chat.next(&app, tui.body_area), Focus::Topic);
        assert_eq!(Focus::Topic.next(&app, tui.body_area), Focus::Chat);

        tui.focus = Focus::History;
        tui.sync_focus(&app);
        assert_eq!(tui.focus, Focus::Chat);
    }

    #[test]
    fn test_toggle_history_keeps_chat_focus_when_too_narrow() {
        let (app, mut tui) = setup();
        tui.body_area = Some(Rect::new(0, 0, 70, 24));
        let action = intent_for(&TuiEvent::ToggleHistory, &app, &mut tui);
        assert_eq!(action, Some(Action::ToggleLeftPanel));
        assert_eq!(tui.focus, Focus::Chat);

        // Typing must still reach the chat input
        type_text(&mut tui, &app, "n");
        assert_eq!(tui.chat_input.buffer, "n");
    }

    #[test]
    fn test_history_open_refused_while_answering() {
        let (mut app, mut tui) = setup();
        update(&mut app, Action::ToggleLeftPanel);
        update(&mut app, Action::SendMessage("pending".to_string()));
        tui.focus = Focus::History;

        assert_eq!(intent_for(&TuiEvent::Submit, &app, &mut tui), None);
        assert_eq!(tui.focus, Focus::History);

        update(&mut app, Action::AnswerReceived(Ok("done".to_string())));
        assert_eq!(
            intent_for(&TuiEvent::Submit, &app, &mut tui),
            Some(Action::SelectConversation("1".to_string()))
        );
    }

    #[test]
    fn test_debate_targets_latest_debatable_message() {
        let (mut app, mut tui) = setup();
        app.push_message(Role::User, "q");
        let first = app.push_message(Role::Agent, "a1");
        let second = app.push_message(Role::Agent, "a2");

        let action = intent_for(&TuiEvent::Debate, &app, &mut tui);
        assert_eq!(
            action,
            Some(Action::RequestDebate {
                message_id: second,
                content: "a2".to_string()
            })
        );

        tui.message_list.selected_index = Some(1);
        let action = intent_for(&TuiEvent::Debate, &app, &mut tui);
        assert_eq!(
            action,
            Some(Action::RequestDebate {
                message_id: first,
                content: "a1".to_string()
            })
        );
    }

    #[test]
    fn test_debate_skipped_when_nothing_debatable() {
        let (mut app, mut tui) = setup();
        assert_eq!(intent_for(&TuiEvent::Debate, &app, &mut tui), None);

        update(&mut app, Action::SelectConversation("1".to_string()));
        assert_eq!(intent_for(&TuiEvent::Debate, &app, &mut tui), None);
    }

    #[test]
    fn test_new_chat_resets_view() {
        let (app, mut tui) = setup();
        tui.focus = Focus::Topic;
        tui.message_list.selected_index = Some(0);
        let action = intent_for(&TuiEvent::NewChat, &app, &mut tui);
        assert_eq!(action, Some(Action::NewConversation));
        assert_eq!(tui.focus, Focus::Chat);
        assert_eq!(tui.message_list.selected_index, None);
    }

    #[test]
    fn test_force_quit() {
        let (app, mut tui) = setup();
        assert_eq!(intent_for(&TuiEvent::ForceQuit, &app, &mut tui), Some(Action::Quit));
    }
}
