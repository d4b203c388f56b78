//! converse - interactive LLM chat sessions in the terminal
//!
//! This application wraps a local Ollama model with a durable conversation
//! log, bounded context assembly, and running response metrics.

mod cli;
mod config;
mod constants;
mod context;
mod history;
mod llm;
mod metrics;
mod session;

use anyhow::Result;
use clap::Parser;

use cli::{cli_to_config, Cli};
use constants::{
    CMD_EXIT, CMD_HISTORY, CMD_SUMMARY, FORMAT_BOLD, FORMAT_CYAN, FORMAT_RED, FORMAT_RESET,
};
use metrics::MetricsAggregator;
use session::SessionController;

/// Main entry point for the application
///
/// Loads configuration, builds the model backend, and runs either an
/// interactive session or a single query.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli_to_config(&cli);

    let backend = match llm::create_backend(&config) {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("{}Failed to configure model backend: {}{}", FORMAT_RED, e, FORMAT_RESET);
            std::process::exit(1);
        }
    };

    let mut controller = SessionController::new(config, backend, MetricsAggregator::new());

    let result = match cli.query {
        Some(query) => run_single_query_mode(&mut controller, &query).await,
        None => run_interactive_mode(&mut controller).await,
    };

    if let Err(e) = result {
        eprintln!("{}Session error: {}{}", FORMAT_RED, e, FORMAT_RESET);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the application in interactive mode
async fn run_interactive_mode(controller: &mut SessionController) -> Result<()> {
    // Skip the banner when input is piped in
    if atty::is(atty::Stream::Stdin) {
        print_banner(controller.model());
    }

    controller.run().await
}

/// Run the application in single query mode (non-interactive)
///
/// Outputs only the model's reply on stdout so the command composes in
/// shells and scripts.
async fn run_single_query_mode(controller: &mut SessionController, query: &str) -> Result<()> {
    if !session::validate_input(query) {
        eprintln!("{}Please provide a non-empty query.{}", FORMAT_RED, FORMAT_RESET);
        std::process::exit(2);
    }

    let response = controller.chat_turn(query).await?;
    println!("{}", response.trim());
    Ok(())
}

/// Print the interactive welcome banner
fn print_banner(model: &str) {
    println!(
        "{}Welcome to converse{} {}(model: {}){}",
        FORMAT_BOLD, FORMAT_RESET, FORMAT_CYAN, model, FORMAT_RESET
    );
    println!("Type \"{}\" to quit.", CMD_EXIT);
    println!("\"{}\" to see recent conversations", CMD_HISTORY);
    println!("\"{}\" to see session statistics", CMD_SUMMARY);
}
