//! HTTP implementation of the knowledge service.
//!
//! One `reqwest::Client` is shared by all calls. Every call issues exactly
//! one request: no retries, no caching, and no timeout beyond reqwest's
//! defaults.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{Operation, OperationFailed};
use super::types::{PrepareRequest, PrepareResponse, QueryRequest, QueryResponse};

/// Shown when `/prepare` succeeds without a `message` of its own.
pub const DEFAULT_PREPARE_CONFIRMATION: &str = "Topic prepared successfully";

/// The remote side of the chat: answers, debates and knowledge-base preparation.
#[async_trait]
pub trait KnowledgeService: Send + Sync {
    /// Ask a question and get the answer text.
    async fn submit_question(&self, question: &str) -> Result<String, OperationFailed>;

    /// Ask for a debate-style elaboration of `question`.
    async fn submit_debate_request(&self, question: &str) -> Result<String, OperationFailed>;

    /// Prime the backend's knowledge base with `topic`. Returns confirmation text.
    async fn submit_topic(&self, topic: &str) -> Result<String, OperationFailed>;
}

/// Talks to the Cognitia backend over JSON/HTTP.
pub struct HttpKnowledgeService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpKnowledgeService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, R>(
        &self,
        operation: Operation,
        path: &str,
        debate: bool,
        body: &B,
    ) -> Result<R, OperationFailed>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        info!("{} request: POST {} (debate={})", operation, url, debate);

        let mut request = self.client.post(&url).json(body);
        if debate {
            request = request.query(&[("debate", "true")]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| failed(operation, format!("network error: {e}")))?;

        let status = response.status();
        debug!("{} response status: {}", operation, status);

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(failed(
                operation,
                format!("HTTP {}: {}", status.as_u16(), err_body),
            ));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| failed(operation, format!("parse error: {e}")))
    }
}

/// Logs the real cause and hands back the fixed, user-facing error.
fn failed(operation: Operation, cause: String) -> OperationFailed {
    warn!("{} failed: {}", operation, cause);
    OperationFailed::new(operation)
}

#[async_trait]
impl KnowledgeService for HttpKnowledgeService {
    async fn submit_question(&self, question: &str) -> Result<String, OperationFailed> {
        let body = QueryRequest { question };
        let reply: QueryResponse = self.post(Operation::Send, "/query", false, &body).await?;
        Ok(reply.response)
    }

    async fn submit_debate_request(&self, question: &str) -> Result<String, OperationFailed> {
        let body = QueryRequest { question };
        let reply: QueryResponse = self.post(Operation::Debate, "/query", true, &body).await?;
        Ok(reply.response)
    }

    async fn submit_topic(&self, topic: &str) -> Result<String, OperationFailed> {
        let body = PrepareRequest { topic };
        let reply: PrepareResponse = self
            .post(Operation::Prepare, "/prepare", false, &body)
            .await?;
        Ok(reply
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_PREPARE_CONFIRMATION.to_string()))
    }
}
