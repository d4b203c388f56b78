// These color constants are kept for future UI enhancements
// and to maintain a consistent color scheme across the application
#![allow(dead_code)]

pub const FORMAT_RESET: &str = "\x1b[0m";
pub const FORMAT_BOLD: &str = "\x1b[1m";
pub const FORMAT_GRAY: &str = "\x1b[90m";
pub const FORMAT_RED: &str = "\x1b[31m";
pub const FORMAT_GREEN: &str = "\x1b[32m";
pub const FORMAT_YELLOW: &str = "\x1b[33m";
pub const FORMAT_BLUE: &str = "\x1b[34m";
pub const FORMAT_MAGENTA: &str = "\x1b[35m";
pub const FORMAT_CYAN: &str = "\x1b[36m";

/// Default model served by the local Ollama instance
pub const DEFAULT_MODEL: &str = "llama3.2:latest";

/// Default Ollama endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default backing store for the durable conversation log
pub const DEFAULT_HISTORY_FILE: &str = "conversation_history.json";

/// Default character budget for assembled prompt context
pub const DEFAULT_CONTEXT_WINDOW: usize = 1000;

/// Default number of recent interactions pulled into context
pub const DEFAULT_RECENT_MESSAGES: usize = 5;

// Reserved session-control commands (matched case-insensitively)
pub const CMD_EXIT: &str = "exit";
pub const CMD_HISTORY: &str = "history";
pub const CMD_SUMMARY: &str = "summary";
