//! Command-line interface definition and argument parsing
//!
//! This module uses clap to define and parse command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for converse
#[derive(Parser, Debug)]
#[command(
    name = "converse",
    about = "An interactive LLM chat session manager for the terminal",
    version,
    long_about = "Converse keeps a durable conversation log, feeds a bounded slice of it \
back to a local Ollama model on every turn, and tracks response metrics across the session."
)]
pub struct Cli {
    /// The query to process in non-interactive mode
    pub query: Option<String>,

    /// The model to request from the Ollama endpoint
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the Ollama endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Path of the conversation history file
    #[arg(long)]
    pub history_file: Option<PathBuf>,

    /// Character budget for prompt context
    #[arg(long)]
    pub context_window: Option<usize>,

    /// Number of recent interactions fed back as context
    #[arg(long)]
    pub recent: Option<usize>,
}

/// Convert the Cli struct to the application's Config
pub fn cli_to_config(cli: &Cli) -> crate::config::Config {
    let mut config = crate::config::Config::new();

    // Environment overrides first, explicit flags win
    config.apply_env();

    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(path) = &cli.history_file {
        config.history_file = path.clone();
    }
    if let Some(window) = cli.context_window {
        config.context_window = window;
    }
    if let Some(recent) = cli.recent {
        config.recent_messages = recent;
    }

    config
}
