//! Structured console logging with box-drawing output.
//!
//! The CLI reports sun events and light targets as visually grouped blocks
//! (`┣` for block headers, `┃` for details). Level-prefixed messages
//! (`[WARN]`, `[ERR]`, ...) sit alongside the blocks for diagnostics.
//!
//! Output can be switched off globally, which the test-suite and library
//! callers that embed the crate use to keep stdout clean.

use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

/// Log level enumeration for categorizing message importance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Log,  // Operational detail, shown with --debug
    Warn, // Non-fatal issues such as ignored configuration
    Err,  // Recoverable failures
    Info, // Status updates
}

impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Log => "[LOG]",
            LogLevel::Warn => "[WARN]",
            LogLevel::Err => "[ERR]",
            LogLevel::Info => "[INFO]",
        }
    }
}

/// Main logging interface providing structured output formatting.
pub struct Log;

impl Log {
    /// Enable or disable all output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Log a message with a level prefix.
    pub fn log(level: LogLevel, message: &str) {
        if !Self::is_enabled() {
            return;
        }
        println!("{} {}", level.prefix(), message);
    }

    pub fn log_error(message: &str) {
        Self::log(LogLevel::Err, message);
    }

    pub fn log_warning(message: &str) {
        Self::log(LogLevel::Warn, message);
    }

    pub fn log_info(message: &str) {
        Self::log(LogLevel::Info, message);
    }

    pub fn log_debug(message: &str) {
        Self::log(LogLevel::Log, message);
    }

    // ═══ Visual Formatting Functions ═══

    /// Log a message attached to the current block.
    pub fn log_decorated(message: &str) {
        Self::write_line(&format!("┣ {}", message));
    }

    /// Log a detail line under the current block.
    pub fn log_indented(message: &str) {
        Self::write_line(&format!("┃   {}", message));
    }

    /// Log an empty spacer line.
    pub fn log_pipe() {
        Self::write_line("┃");
    }

    /// Start a new block, separated from the previous one by a spacer.
    pub fn log_block_start(message: &str) {
        Self::log_pipe();
        Self::log_decorated(message);
    }

    /// Log the header printed once when the CLI starts.
    pub fn log_version() {
        Self::write_line(&format!(
            "┏ adaptive-lighting v{} ━━╸",
            env!("CARGO_PKG_VERSION")
        ));
        Self::log_pipe();
    }

    /// Close the visual structure opened by [`Log::log_version`].
    pub fn log_end() {
        Self::write_line("╹");
    }

    fn write_line(line: &str) {
        if !Self::is_enabled() {
            return;
        }
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_prefixes() {
        assert_eq!(LogLevel::Log.prefix(), "[LOG]");
        assert_eq!(LogLevel::Warn.prefix(), "[WARN]");
        assert_eq!(LogLevel::Err.prefix(), "[ERR]");
        assert_eq!(LogLevel::Info.prefix(), "[INFO]");
    }
}
