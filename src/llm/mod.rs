//! Language model access for the narrative report sections.

pub mod cleaner;
pub mod serving;

use thiserror::Error;

pub use serving::{ServingEndpointClient, ServingSettings};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("Serving endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Cannot decode serving endpoint response: {0}")]
    Decode(String),

    #[error("Serving endpoint response contains no message content")]
    MissingContent,
}

/// A chat-completion backend producing Markdown text.
pub trait CompletionClient {
    /// Sends one system and one user message and returns the cleaned reply.
    fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String, LlmError>;

    /// Model identifier used in log output.
    fn model_name(&self) -> &str;
}
