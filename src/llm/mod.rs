//! LLM backend abstraction
//!
//! This module defines the seam between the session loop and whatever model
//! actually answers. The session controller only sees the [`Backend`] trait;
//! the concrete provider is chosen by the factory from configuration.

pub use async_trait::async_trait;

pub mod factory;
pub mod ollama;

pub use self::factory::create_backend;

use thiserror::Error;

use crate::context::Prompt;

/// Common trait for all LLM backends
#[async_trait]
pub trait Backend: Send + Sync {
    /// Send an assembled prompt to the model and return its reply
    ///
    /// Blocks the calling task until the model responds. There is no retry
    /// and no cancellation here; a failure is returned as-is for the caller
    /// to act on.
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;

    /// Get the provider name
    #[allow(dead_code)]
    fn name(&self) -> &str;

    /// Get the model name
    fn model(&self) -> &str;
}

/// Error types for LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// The API answered with a non-success status or unusable body
    #[error("API error: {0}")]
    Api(String),

    /// The backend was misconfigured
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure talking to the endpoint
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),
}
