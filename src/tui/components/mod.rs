//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top line with product name, read-only badge and status
//! - `MessageBubble`: A single chat message
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: Single-line text input (chat prompt and topic field)
//! - `MessageList`: Scrollable conversation with selection
//! - `HistoryPanel`: Left sidebar of previous chats
//! - `TopicPanel`: Right sidebar for knowledge-base preparation
//!
//! Stateful components keep their persistent state in `TuiState` and are
//! wrapped in a transient struct each frame that borrows it alongside props.
//! Components receive data as props, never by reaching into `App`.
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── input_box.rs
//! ├── history_panel.rs
//! └── topic_panel.rs
//! ```

pub mod history_panel;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod title_bar;
pub mod topic_panel;

pub use history_panel::{HistoryEvent, HistoryPanel, HistoryPanelState};
pub use input_box::{InputBox, InputEvent};
pub use message::MessageBubble;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
pub use topic_panel::TopicPanel;
