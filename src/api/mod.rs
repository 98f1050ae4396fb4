pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_PREPARE_CONFIRMATION, HttpKnowledgeService, KnowledgeService};
pub use error::{Operation, OperationFailed};
