//! Wire types for the Cognitia backend.
//!
//! ```text
//! POST /query               {"question": "..."}  →  {"response": "..."}
//! POST /query?debate=true   {"question": "..."}  →  {"response": "..."}
//! POST /prepare             {"topic": "..."}     →  {"message": "..."?}
//! ```

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct QueryRequest<'a> {
    pub question: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct QueryResponse {
    pub response: String,
}

#[derive(Serialize, Debug)]
pub struct PrepareRequest<'a> {
    pub topic: &'a str,
}

/// The backend also sends a `status` field; only `message` is read.
#[derive(Deserialize, Debug, Default)]
pub struct PrepareResponse {
    #[serde(default)]
    pub message: Option<String>,
}
