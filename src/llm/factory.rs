//! LLM backend factory
//!
//! Builds the configured backend behind the [`Backend`] trait object. Only
//! Ollama is wired up today; the seam exists so another provider can slot in
//! without touching the session loop.

use crate::config::Config;
use crate::llm::ollama::OllamaBackend;
use crate::llm::{Backend, LlmError};

/// Create an LLM backend from configuration
pub fn create_backend(config: &Config) -> Result<Box<dyn Backend>, LlmError> {
    let backend = OllamaBackend::new(config.endpoint.clone(), config.model.clone())?;
    Ok(Box::new(backend))
}
