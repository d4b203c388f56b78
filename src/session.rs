//! Interactive session control
//!
//! One controller drives one session: it validates input, short-circuits the
//! reserved control commands, assembles bounded context, calls the model
//! backend, and records the exchange in the history store and the metrics
//! aggregator. Turns are strictly sequential; the model call is the only
//! blocking step and there is no retry around it. A backend failure is
//! surfaced as an error to the caller rather than swallowed.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Result;

use crate::config::Config;
use crate::constants::{
    CMD_EXIT, CMD_HISTORY, CMD_SUMMARY, FORMAT_BOLD, FORMAT_CYAN, FORMAT_GRAY, FORMAT_GREEN,
    FORMAT_RESET, FORMAT_YELLOW,
};
use crate::context::{self, ContextConfig};
use crate::history::HistoryStore;
use crate::llm::Backend;
use crate::metrics::{MetricsAggregator, MetricsReport};

/// Outcome of handling one line of input
#[derive(Debug, PartialEq)]
pub enum Turn {
    /// Keep reading input
    Continue,
    /// The session ended via the exit command
    Exit,
}

/// Orchestrates one interactive session against a model backend
pub struct SessionController {
    config: Config,
    store: HistoryStore,
    context: ContextConfig,
    metrics: MetricsAggregator,
    backend: Box<dyn Backend>,
}

impl SessionController {
    /// Create a controller over an explicit metrics aggregator
    ///
    /// The aggregator is passed in rather than created here so several
    /// sessions (or tests) can share or isolate metrics as they choose.
    pub fn new(config: Config, backend: Box<dyn Backend>, metrics: MetricsAggregator) -> Self {
        let store = HistoryStore::open(&config.history_file);
        let context = ContextConfig {
            window: config.context_window,
        };
        Self {
            config,
            store,
            context,
            metrics,
            backend,
        }
    }

    /// Run the interactive loop until `exit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut line = String::new();

        loop {
            print!("{}You:{} ", FORMAT_BOLD, FORMAT_RESET);
            io::stdout().flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                // End of input behaves like an explicit exit
                println!();
                self.finish_session();
                return Ok(());
            }

            let input = line.trim_end_matches(['\r', '\n']);
            if self.handle_line(input).await? == Turn::Exit {
                return Ok(());
            }
        }
    }

    /// Handle one line of raw input and report whether the session goes on
    ///
    /// Reserved commands (`exit`, `history`, `summary`, case-insensitive)
    /// never reach the model and are never recorded. Invalid input prints a
    /// rejection and changes nothing. Everything else is a chat turn.
    pub async fn handle_line(&mut self, input: &str) -> Result<Turn> {
        match input.to_lowercase().as_str() {
            cmd if cmd == CMD_EXIT => {
                self.finish_session();
                return Ok(Turn::Exit);
            }
            cmd if cmd == CMD_HISTORY => {
                println!(
                    "\n{}Recent conversations:{}{}",
                    FORMAT_CYAN,
                    FORMAT_RESET,
                    self.store.get_recent_context(self.config.recent_messages)
                );
                return Ok(Turn::Continue);
            }
            cmd if cmd == CMD_SUMMARY => {
                let summary = self.store.summarize_session();
                println!(
                    "\n{}Session summary:{} {}",
                    FORMAT_CYAN,
                    FORMAT_RESET,
                    serde_json::to_string_pretty(&summary)?
                );
                return Ok(Turn::Continue);
            }
            _ => {}
        }

        if !validate_input(input) {
            println!("{}Bot: Please provide a valid input.{}", FORMAT_YELLOW, FORMAT_RESET);
            return Ok(Turn::Continue);
        }

        let response = self.chat_turn(input).await?;
        println!("{}Bot:{} {}", FORMAT_GREEN, FORMAT_RESET, response);
        Ok(Turn::Continue)
    }

    /// Run one validated chat turn and return the model's reply
    ///
    /// Measures the elapsed wall time around the backend call and records the
    /// exchange in both the history store and the metrics aggregator. A
    /// backend failure propagates; nothing is recorded for a failed turn.
    pub async fn chat_turn(&mut self, input: &str) -> Result<String> {
        let start = Instant::now();

        // The new input travels in the question field; only prior turns are
        // clamped into the context window.
        let recent = self.store.get_recent_context(self.config.recent_messages);
        let history_context = context::prepare_context(&recent, "", &self.context);
        let prompt = context::format_prompt(history_context, input)?;

        let response = self.backend.complete(&prompt).await?;

        self.store.add_interaction(input, &response)?;
        self.metrics
            .evaluate_response(&response, start.elapsed().as_secs_f64());

        Ok(response)
    }

    /// Close out the session: fold its summary into the metrics and print
    /// the final aggregate report
    fn finish_session(&mut self) {
        let summary = self.store.summarize_session();
        self.metrics.add_session_metrics(summary);

        let report = self.metrics.report();
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}Final metrics:{} {}", FORMAT_GRAY, FORMAT_RESET, text),
            Err(_) => println!("Final metrics unavailable"),
        }
    }

    /// Aggregate metrics recorded so far
    pub fn metrics_report(&self) -> MetricsReport {
        self.metrics.report()
    }

    /// The history store backing this session
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Model name the session is talking to
    pub fn model(&self) -> &str {
        self.backend.model()
    }
}

/// A line is a valid chat turn only if it contains non-whitespace text
pub fn validate_input(input: &str) -> bool {
    !input.trim().is_empty()
}
