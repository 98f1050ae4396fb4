//! # MessageList Component
//!
//! Scrollable conversation view. Follows the persistent state + transient
//! wrapper pattern:
//! - `MessageListState` lives in `TuiState` (scroll offset, selection)
//! - `MessageList` is created each frame with borrowed state and props
//!
//! Bubble heights are measured up front with `MessageBubble::calculate_height`
//! so the `ScrollView` canvas can be sized before anything is drawn.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::message::{Message, Role};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageBubble;
use crate::tui::event::TuiEvent;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TYPING_INDICATOR_HEIGHT: u16 = 1;

pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// Message under the cursor (Up/Down in chat focus)
    pub selected_index: Option<usize>,
    /// Follow new messages as they arrive
    pub stick_to_bottom: bool,
    /// Heights from the last render, used to scroll the selection into view
    heights: Vec<u16>,
    /// Index of the oldest message on the canvas
    first_rendered: usize,
    viewport_height: u16,
    scroll_to_selection: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            selected_index: None,
            stick_to_bottom: true,
            heights: Vec::new(),
            first_rendered: 0,
            viewport_height: 0,
            scroll_to_selection: false,
        }
    }

    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(i) => i.saturating_sub(1),
            None => len - 1,
        });
        self.stick_to_bottom = false;
        self.scroll_to_selection = true;
    }

    pub fn select_next(&mut self, len: usize) {
        let Some(i) = self.selected_index else {
            return;
        };
        if i + 1 < len {
            self.selected_index = Some(i + 1);
            self.scroll_to_selection = true;
        } else {
            // Moving past the last message hands control back to the input
            self.selected_index = None;
            self.stick_to_bottom = true;
        }
    }

    /// Adjust the scroll offset so the selected message is fully visible.
    fn reveal_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        if idx < self.first_rendered || idx >= self.heights.len() {
            return;
        }
        let top = self.heights[self.first_rendered..idx]
            .iter()
            .copied()
            .fold(0u16, u16::saturating_add);
        let bottom = top.saturating_add(self.heights[idx]);
        let offset = self.scroll_state.offset().y;

        let new_offset = if top < offset {
            top
        } else if bottom > offset.saturating_add(self.viewport_height) {
            bottom.saturating_sub(self.viewport_height)
        } else {
            offset
        };
        self.scroll_state.set_offset(Position { x: 0, y: new_offset });
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the conversation.
pub struct MessageList<'a> {
    state: &'a mut MessageListState,
    messages: &'a [Message],
    read_only: bool,
    answering: bool,
    debating: bool,
    spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        read_only: bool,
        answering: bool,
        debating: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            read_only,
            answering,
            debating,
            spinner_frame,
        }
    }

    fn shows_debate(&self, message: &Message) -> bool {
        !self.read_only && message.role == Role::Agent && message.debate_available
    }

    fn render_welcome(frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Welcome to Cognitia",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("Your AI assistant that's kinder, wiser, and truly yours"),
            Line::from(Span::styled(
                "Prepare topics, ask questions, and generate debates",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let top_pad = area.height.saturating_sub(lines.len() as u16) / 2;
        let welcome_area = Rect {
            y: area.y + top_pad,
            height: area.height - top_pad,
            ..area
        };
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            welcome_area,
        );
    }
}

/// The canvas is at most `u16::MAX` rows tall. Returns the index of the
/// oldest message that still fits when filling from the newest, and the
/// total height of the messages from there on.
fn newest_fitting(heights: &[u16], budget: u16) -> (usize, u16) {
    let mut first = heights.len();
    let mut total: u16 = 0;
    while first > 0 {
        match total.checked_add(heights[first - 1]) {
            Some(t) if t <= budget => {
                total = t;
                first -= 1;
            }
            _ => break,
        }
    }
    (first, total)
}

pub fn typing_indicator(spinner_frame: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            SPINNER[spinner_frame % SPINNER.len()],
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(" Cognitia is thinking...", Style::default().fg(Color::DarkGray)),
    ])
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.messages.is_empty() && !self.answering {
            Self::render_welcome(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        let heights: Vec<u16> = self
            .messages
            .iter()
            .map(|m| MessageBubble::calculate_height(m, self.shows_debate(m), content_width))
            .collect();
        let indicator_height = if self.answering {
            TYPING_INDICATOR_HEIGHT
        } else {
            0
        };
        let (first, messages_height) = newest_fitting(&heights, u16::MAX - indicator_height);
        let canvas_height = messages_height + indicator_height;

        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (i, (message, &height)) in self.messages.iter().zip(&heights).enumerate().skip(first) {
            let bubble = MessageBubble::new(
                message,
                self.state.selected_index == Some(i),
                self.shows_debate(message),
                self.debating,
            );
            scroll_view.render_widget(bubble, Rect::new(0, y_offset, content_width, height));
            y_offset += height;
        }

        if self.answering {
            scroll_view.render_widget(
                typing_indicator(self.spinner_frame),
                Rect::new(0, y_offset, content_width, TYPING_INDICATOR_HEIGHT),
            );
        }

        self.state.heights = heights;
        self.state.first_rendered = first;
        self.state.viewport_height = area.height;

        if self.state.scroll_to_selection {
            self.state.reveal_selected();
            self.state.scroll_to_selection = false;
        } else if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
