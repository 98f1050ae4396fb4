//! # Topic Panel Component
//!
//! Right sidebar for knowledge-base preparation: a topic input, a progress
//! line while the backend works, and a green/red banner with the outcome.
//! The input itself is an `InputBox` owned by `TuiState`; this wrapper only
//! lays it out next to the status widgets.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::state::PrepareResult;
use crate::tui::component::Component;
use crate::tui::components::input_box::InputBox;

pub const TOPIC_PANEL_WIDTH: u16 = 36;

const HOW_IT_WORKS: [&str; 4] = [
    "• Enter a topic to prepare knowledge base",
    "• System fetches relevant content",
    "• Chat with AI about the prepared topic",
    "• Generate debates for deeper analysis",
];

pub struct TopicPanel<'a> {
    input: &'a mut InputBox,
    preparing: bool,
    last_result: Option<&'a PrepareResult>,
    focused: bool,
}

impl<'a> TopicPanel<'a> {
    pub fn new(
        input: &'a mut InputBox,
        preparing: bool,
        last_result: Option<&'a PrepareResult>,
        focused: bool,
    ) -> Self {
        Self {
            input,
            preparing,
            last_result,
            focused,
        }
    }
}

pub fn progress_line(preparing: bool) -> Line<'static> {
    if preparing {
        Line::from(Span::styled(
            "Generating...",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "Enter to generate",
            Style::default().fg(Color::DarkGray),
        ))
    }
}

pub fn result_banner(result: &PrepareResult) -> Paragraph<'_> {
    let (icon, color) = if result.success {
        ("✔", Color::Green)
    } else {
        ("✘", Color::Red)
    };
    Paragraph::new(Line::from(vec![
        Span::styled(format!("{icon} "), Style::default().fg(color)),
        Span::styled(result.message.as_str(), Style::default().fg(color)),
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::bordered().border_style(Style::default().fg(color)))
}

impl Component for TopicPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .title(" Knowledge Base ")
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [input_area, progress_area, banner_area, info_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .areas(inner);

        self.input.focused = self.focused;
        self.input.disabled = self.preparing;
        self.input.render(frame, input_area);

        frame.render_widget(progress_line(self.preparing), progress_area);

        if let Some(result) = self.last_result {
            frame.render_widget(result_banner(result), banner_area);
        }

        let mut info = vec![Line::from(Span::styled(
            "How it works",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        info.extend(
            HOW_IT_WORKS
                .iter()
                .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::DarkGray)))),
        );
        frame.render_widget(Paragraph::new(info).wrap(Wrap { trim: false }), info_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_progress_line_text() {
        assert_eq!(progress_line(true).spans[0].content, "Generating...");
        assert_eq!(progress_line(false).spans[0].content, "Enter to generate");
    }

    #[test]
    fn test_renders_failure_banner() {
        let mut terminal = Terminal::new(TestBackend::new(TOPIC_PANEL_WIDTH, 20)).unwrap();
        let mut input = InputBox::new("Topic", "e.g. LLM reasoning").keep_on_submit();
        let result = PrepareResult {
            success: false,
            message: "Failed to prepare topic.".to_string(),
        };
        terminal
            .draw(|f| {
                let area = f.area();
                TopicPanel::new(&mut input, false, Some(&result), true).render(f, area);
            })
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Knowledge Base"));
        assert!(text.contains("Failed to prepare topic."));
    }

    #[test]
    fn test_input_disabled_while_preparing() {
        let mut terminal = Terminal::new(TestBackend::new(TOPIC_PANEL_WIDTH, 20)).unwrap();
        let mut input = InputBox::new("Topic", "e.g. LLM reasoning");
        terminal
            .draw(|f| {
                let area = f.area();
                TopicPanel::new(&mut input, true, None, true).render(f, area);
            })
            .unwrap();
        assert!(input.disabled);
        assert!(screen_text(&terminal).contains("Generating..."));
    }
}
