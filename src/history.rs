//! Durable conversation history
//!
//! This module owns the append-only interaction log. Every recorded turn is
//! appended to both the durable log (persisted as a JSON array in the backing
//! file) and the current-session record, which only lives for this process
//! run. Context assembly and session summaries read the session record; the
//! durable log exists so history survives across runs.

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while persisting the conversation log
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Failed to write the backing file
    #[error("failed to write history file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the log
    #[error("failed to serialize history: {0}")]
    Json(#[from] serde_json::Error),
}

/// One recorded user/response pair
///
/// Immutable once created; the log never edits or reorders entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Wall-clock time of the exchange, second precision
    pub timestamp: String,
    pub user_input: String,
    pub bot_response: String,
}

/// Read-only digest of the current session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Timestamp of the first interaction, absent for an empty session
    pub session_start: Option<String>,
    /// Timestamp of the last interaction, absent for an empty session
    pub session_end: Option<String>,
    pub total_interactions: usize,
    /// First whitespace-delimited token of each user input, in session order.
    /// A coarse stand-in for topic extraction, deliberately not NLP.
    pub topics: Vec<String>,
}

/// Store for the durable interaction log and the current-session view
pub struct HistoryStore {
    path: PathBuf,
    history: Vec<Interaction>,
    current_session: Vec<Interaction>,
}

impl HistoryStore {
    /// Open the store backed by `path`, loading any existing log
    ///
    /// A missing file or one that does not parse as a JSON array of
    /// interactions degrades to an empty log. Corrupt history is never
    /// fatal; the next persisted write starts a fresh file.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let history = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();

        Self {
            path,
            history,
            current_session: Vec::new(),
        }
    }

    /// Record one exchange and persist the full log
    ///
    /// The entire log is rewritten on every call. A crash between append and
    /// write loses at most this interaction; earlier entries are never left
    /// half-written because the serialization is unconditional and complete.
    pub fn add_interaction(
        &mut self,
        user_input: &str,
        bot_response: &str,
    ) -> Result<(), HistoryError> {
        let interaction = Interaction {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            user_input: user_input.to_string(),
            bot_response: bot_response.to_string(),
        };

        self.current_session.push(interaction.clone());
        self.history.push(interaction);
        self.save()
    }

    fn save(&self) -> Result<(), HistoryError> {
        // serde_json writes UTF-8 without ASCII-escaping, so non-ASCII text
        // round-trips verbatim.
        let text = serde_json::to_string_pretty(&self.history)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// Render the last `n` interactions of the current session as context
    ///
    /// Only the current session feeds back into prompts; older runs stay in
    /// the durable log but are not resurfaced. Returns an empty string for an
    /// empty session.
    pub fn get_recent_context(&self, n: usize) -> String {
        let start = self.current_session.len().saturating_sub(n);
        let mut context = String::new();
        for msg in &self.current_session[start..] {
            context.push_str(&format!(
                "\nUser: {}\nBot: {}",
                msg.user_input, msg.bot_response
            ));
        }
        context
    }

    /// Summarize the current session
    pub fn summarize_session(&self) -> SessionSummary {
        SessionSummary {
            session_start: self
                .current_session
                .first()
                .map(|i| i.timestamp.clone()),
            session_end: self
                .current_session
                .last()
                .map(|i| i.timestamp.clone()),
            total_interactions: self.current_session.len(),
            topics: self
                .current_session
                .iter()
                .map(|i| {
                    i.user_input
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_string()
                })
                .collect(),
        }
    }

    /// Number of entries in the durable log
    pub fn log_len(&self) -> usize {
        self.history.len()
    }

    /// Full durable log, oldest first
    pub fn interactions(&self) -> &[Interaction] {
        &self.history
    }

    /// Number of interactions recorded this session
    pub fn session_len(&self) -> usize {
        self.current_session.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::open(dir.path().join("history.json"))
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.log_len(), 0);
        assert_eq!(store.session_len(), 0);
    }

    #[test]
    fn malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not json").unwrap();

        let store = HistoryStore::open(&path);
        assert_eq!(store.log_len(), 0);
    }

    #[test]
    fn log_grows_by_one_per_interaction() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        for i in 0..4 {
            let before = store.log_len();
            store.add_interaction(&format!("question {}", i), "answer").unwrap();
            assert_eq!(store.log_len(), before + 1);
        }
        assert_eq!(store.session_len(), 4);
    }

    #[test]
    fn round_trips_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = HistoryStore::open(&path);
        store.add_interaction("café ☕", "bien sûr").unwrap();
        let original = store.interactions().to_vec();

        let reloaded = HistoryStore::open(&path);
        assert_eq!(reloaded.interactions(), original.as_slice());
        assert_eq!(reloaded.interactions()[0].user_input, "café ☕");
    }

    #[test]
    fn reloaded_log_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = HistoryStore::open(&path);
        for i in 0..3 {
            store.add_interaction(&format!("q{}", i), &format!("a{}", i)).unwrap();
        }

        let reloaded = HistoryStore::open(&path);
        let inputs: Vec<_> = reloaded
            .interactions()
            .iter()
            .map(|i| i.user_input.as_str())
            .collect();
        assert_eq!(inputs, vec!["q0", "q1", "q2"]);
        // Prior runs stay out of the new session
        assert_eq!(reloaded.session_len(), 0);
        assert_eq!(reloaded.get_recent_context(5), "");
    }

    #[test]
    fn recent_context_is_a_bounded_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        for i in 0..7 {
            store.add_interaction(&format!("q{}", i), &format!("a{}", i)).unwrap();
        }

        let context = store.get_recent_context(5);
        // Oldest two fall outside the window
        assert!(!context.contains("q0"));
        assert!(!context.contains("q1"));
        assert!(context.contains("\nUser: q2\nBot: a2"));
        assert!(context.contains("\nUser: q6\nBot: a6"));
    }

    #[test]
    fn recent_context_returns_all_when_short() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.add_interaction("hello there", "hi").unwrap();

        assert_eq!(store.get_recent_context(5), "\nUser: hello there\nBot: hi");
    }

    #[test]
    fn empty_session_context_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get_recent_context(5), "");
    }

    #[test]
    fn summarize_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let summary = store.summarize_session();
        assert_eq!(summary.session_start, None);
        assert_eq!(summary.session_end, None);
        assert_eq!(summary.total_interactions, 0);
        assert!(summary.topics.is_empty());
    }

    #[test]
    fn summarize_collects_leading_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.add_interaction("weather in Paris", "sunny").unwrap();
        store.add_interaction("rust borrow checker", "borrows").unwrap();

        let summary = store.summarize_session();
        assert_eq!(summary.total_interactions, 2);
        assert_eq!(summary.topics, vec!["weather", "rust"]);
        assert!(summary.session_start.is_some());
        assert_eq!(summary.session_start, Some(store.interactions()[0].timestamp.clone()));
    }
}
