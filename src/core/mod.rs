//! # Core Application Logic
//!
//! This module contains Cognitia's session logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Store (observers)    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │    API     │
//!     │  Adapter   │                          │  (reqwest) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`effect`]: Runs the I/O an update asks for
//! - [`store`]: Owns the `App` and notifies observers
//! - [`history`]: Read-only store of past conversations
//! - [`message`]: `Message` and `Conversation`
//! - [`config`]: Settings and their override hierarchy

pub mod action;
pub mod config;
pub mod effect;
pub mod history;
pub mod message;
pub mod state;
pub mod store;
