//! Common utilities for output formatters

/// ANSI colors used by the pretty formatter
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const KEY: &str = "\x1b[36m";
    pub const STRING: &str = "\x1b[33m";
    pub const NUMBER: &str = "\x1b[35m";
    pub const LITERAL: &str = "\x1b[32m";
}

/// Wrap text in an ANSI color when enabled
pub fn colorize(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, colors::RESET)
    } else {
        text.to_string()
    }
}

/// Escape a value for CSV output
/// Handles commas, quotes, and newlines according to RFC 4180
pub fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
