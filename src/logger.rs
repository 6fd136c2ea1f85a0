//! Logging utilities with colored output.
//!
//! This module provides the `log!` macro for formatted terminal output with
//! colored module prefixes.
//!
//! # Example
//!
//! ```ignore
//! log!("page"; "wrote {}", slug);
//! log!("skip"; "{}: template", slug);
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{IsTerminal, Write, stdout},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Length of brackets around module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix: "[module] " <- this space
const SPACE_AFTER_PREFIX: usize = 1;

/// Calculate total prefix length for a module name.
///
/// Returns: `module.len() + 3` (for `[`, `]`, and trailing space)
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix.
///
/// On a terminal, long single-line messages are truncated to fit its width.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    let interactive = stdout.is_terminal();

    let message = if interactive && !message.contains('\n') {
        execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
        let width = get_terminal_width() as usize;
        let max_msg_len = width.saturating_sub(calc_prefix_len(module.len()));
        truncate_str(message, max_msg_len)
    } else {
        message
    };

    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module_lower {
        "page" | "listing" | "rss" | "gallery" => prefix.bright_green().bold(),
        "skip" | "warn" => prefix.bright_magenta().bold(),
        "error" => prefix.bright_red().bold(),
        "build" | "config" => prefix.bright_blue().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to fit within `max_len` bytes.
///
/// Ensures the result is valid UTF-8 by finding the nearest character boundary.
#[inline]
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    // Find the last valid UTF-8 boundary within max_len
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_prefix_len() {
        // "page" -> "[page] " = 4 + 2 + 1 = 7
        assert_eq!(calc_prefix_len(4), 7);
        // "" -> "[] " = 0 + 2 + 1 = 3
        assert_eq!(calc_prefix_len(0), 3);
    }

    #[test]
    fn test_truncate_str_short_string() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_str_needs_truncation() {
        assert_eq!(truncate_str("hello world", 5), "hello");
        assert_eq!(truncate_str("hello", 0), "");
    }

    #[test]
    fn test_truncate_str_unicode_boundary() {
        // "€" is 3 bytes; byte 4 falls inside the second one
        assert_eq!(truncate_str("€€", 4), "€");
        assert_eq!(truncate_str("a€b", 3), "a");
    }

    #[test]
    fn test_colorize_prefix_keeps_module_name() {
        colored::control::set_override(false);
        assert_eq!(colorize_prefix("page", "page").to_string(), "[page]");
        assert_eq!(colorize_prefix("ERROR", "error").to_string(), "[ERROR]");
    }
}
