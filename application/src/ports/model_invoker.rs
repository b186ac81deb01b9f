//! Model Invoker port
//!
//! Defines the interface for sending a prompt to a generative-text service.
//! This is the pipeline's only I/O boundary.

use async_trait::async_trait;
use scholar_domain::Schema;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while invoking the model service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Model service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Unexpected response envelope: {0}")]
    InvalidEnvelope(String),

    #[error("Model declined to answer: {0}")]
    Blocked(String),

    #[error("Model returned no output")]
    EmptyOutput,

    #[error("No response within {0:?}")]
    Timeout(Duration),
}

impl ModelError {
    /// Check if this error represents a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, ModelError::Timeout(_))
    }
}

/// Gateway to a generative-text service
///
/// Each call sends exactly one request and returns the raw text of the
/// reply. Implementations must bound how long a call may wait, must not
/// retry on their own, and must not cache. Implementations live in the
/// infrastructure layer.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Short description of the backing service (e.g. `gemini:gemini-2.0-flash`)
    fn describe(&self) -> String;

    /// Send `prompt`, steering the reply toward `response_schema`.
    ///
    /// The schema is guidance only; callers re-validate the reply.
    async fn invoke(&self, prompt: &str, response_schema: &Schema) -> Result<String, ModelError>;
}
