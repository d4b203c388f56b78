//! Configuration for the converse application
//!
//! This module handles loading and managing configuration values.

use std::path::PathBuf;

use crate::constants::{
    DEFAULT_CONTEXT_WINDOW, DEFAULT_ENDPOINT, DEFAULT_HISTORY_FILE, DEFAULT_MODEL,
    DEFAULT_RECENT_MESSAGES,
};

/// Application configuration structure
#[derive(Clone, Debug)]
pub struct Config {
    /// Model name to request from the Ollama endpoint
    pub model: String,

    /// Base URL of the Ollama HTTP endpoint
    pub endpoint: String,

    /// Path of the backing store for the durable conversation log
    pub history_file: PathBuf,

    /// Character budget for the assembled prompt context
    pub context_window: usize,

    /// How many recent interactions feed back into the context
    pub recent_messages: usize,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            context_window: DEFAULT_CONTEXT_WINDOW,
            recent_messages: DEFAULT_RECENT_MESSAGES,
        }
    }

    /// Apply environment variable overrides on top of the defaults
    ///
    /// `CONVERSE_MODEL` and `CONVERSE_ENDPOINT` sit between the built-in
    /// defaults and explicit command-line flags, so this runs before the CLI
    /// values are folded in.
    pub fn apply_env(&mut self) {
        if let Ok(model) = std::env::var("CONVERSE_MODEL") {
            if !model.is_empty() {
                self.model = model;
            }
        }
        if let Ok(endpoint) = std::env::var("CONVERSE_ENDPOINT") {
            if !endpoint.is_empty() {
                self.endpoint = endpoint;
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
