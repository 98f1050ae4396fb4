use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::history_panel::HISTORY_PANEL_WIDTH;
use crate::tui::components::topic_panel::TOPIC_PANEL_WIDTH;
use crate::tui::components::{HistoryPanel, MessageList, TitleBar, TopicPanel};
use crate::tui::{Focus, TuiState};

/// Narrowest the conversation column may get before sidebars are dropped.
const MIN_MAIN_WIDTH: u16 = 24;

const CHAT_PLACEHOLDER: &str = "Type your message...";
const READ_ONLY_PLACEHOLDER: &str = "Read-only mode";

/// ```text
/// ┌──────────────────────── title ─────────────────────────┐
/// │ history (opt) │      messages       │ knowledge (opt)  │
/// │               │                     │                  │
/// ├───────────────┴───── input ─────────┴──────────────────┤
/// ```
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, body_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(3)]).areas(frame.area());

    TitleBar::new(app.read_only, &app.status_message).render(frame, title_area);

    tui.body_area = Some(body_area);
    tui.sync_focus(app);
    let (left, main, right) = split_body(body_area, app.left_panel_open, app.right_panel_open);

    if let Some(left) = left {
        HistoryPanel::new(
            &mut tui.history,
            app.history.conversations(),
            app.selected_conversation_id.as_deref(),
            tui.focus == Focus::History,
        )
        .render(frame, left);
    }

    MessageList::new(
        &mut tui.message_list,
        &app.messages,
        app.read_only,
        app.answering,
        app.debating,
        tui.spinner_frame,
    )
    .render(frame, main);

    if let Some(right) = right {
        TopicPanel::new(
            &mut tui.topic_input,
            app.preparing_topic,
            app.last_prepare_result.as_ref(),
            tui.focus == Focus::Topic,
        )
        .render(frame, right);
    }

    tui.chat_input.placeholder = if app.read_only {
        READ_ONLY_PLACEHOLDER
    } else {
        CHAT_PLACEHOLDER
    };
    tui.chat_input.disabled = app.read_only;
    tui.chat_input.focused = tui.focus == Focus::Chat;
    tui.chat_input.render(frame, input_area);
}

/// Split the body into (history, messages, knowledge) columns. A sidebar
/// that doesn't fit next to a usable message column is not shown.
pub fn split_body(area: Rect, left_open: bool, right_open: bool) -> (Option<Rect>, Rect, Option<Rect>) {
    let mut remaining = area.width;
    let right_width = if right_open && remaining >= TOPIC_PANEL_WIDTH + MIN_MAIN_WIDTH {
        remaining -= TOPIC_PANEL_WIDTH;
        TOPIC_PANEL_WIDTH
    } else {
        0
    };
    let left_width = if left_open && remaining >= HISTORY_PANEL_WIDTH + MIN_MAIN_WIDTH {
        HISTORY_PANEL_WIDTH
    } else {
        0
    };

    let [left, main, right] = Layout::horizontal([
        Constraint::Length(left_width),
        Constraint::Min(0),
        Constraint::Length(right_width),
    ])
    .areas(area);

    (
        (left_width > 0).then_some(left),
        main,
        (right_width > 0).then_some(right),
    )
}
