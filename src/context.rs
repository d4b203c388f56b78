//! Prompt context assembly
//!
//! This module bounds how much conversation history is fed back to the model.
//! Assembled context is clamped to a fixed character budget by keeping only
//! the trailing characters. The cut is not token-aware and may land mid-word;
//! that is a deliberate simplicity/latency tradeoff, not an oversight.

use serde::Serialize;
use thiserror::Error;

use crate::constants::DEFAULT_CONTEXT_WINDOW;

/// Configuration for context assembly
pub struct ContextConfig {
    /// Maximum number of characters of assembled context
    pub window: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}

/// Errors raised at the prompt assembly boundary
#[derive(Error, Debug, PartialEq)]
pub enum ContextError {
    /// The question field was empty or all whitespace
    #[error("prompt question must not be empty")]
    EmptyQuestion,
}

/// The payload handed to the model backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prompt {
    pub context: String,
    pub question: String,
}

/// Combine history context with a new interaction, clamped to the budget
///
/// Pure function. When the combined text fits the window it is returned
/// unchanged; otherwise only the trailing `window` characters survive.
pub fn prepare_context(
    history_context: &str,
    new_interaction: &str,
    config: &ContextConfig,
) -> String {
    let combined = format!("{}{}", history_context, new_interaction);
    let total = combined.chars().count();
    if total <= config.window {
        return combined;
    }
    combined.chars().skip(total - config.window).collect()
}

/// Build the typed prompt payload for the backend
///
/// Rejects an empty question here rather than letting a malformed payload
/// travel to the model collaborator.
pub fn format_prompt(context: String, question: &str) -> Result<Prompt, ContextError> {
    if question.trim().is_empty() {
        return Err(ContextError::EmptyQuestion);
    }
    Ok(Prompt {
        context,
        question: question.to_string(),
    })
}
