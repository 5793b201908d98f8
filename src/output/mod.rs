//! Output formatting module
//!
//! Handles different output formats: pretty (colorized), plain, JSON, YAML, CSV

mod common;
mod csv;
mod json;
mod pretty;

use serde_json::Value;
use std::io::IsTerminal;

use crate::cli::OutputFormat;
use crate::error::Result;

pub use self::common::{colorize, escape_csv};
pub use self::csv::{normalize_rows, render_csv, CsvTable};
pub use self::json::{to_json, to_yaml};
pub use self::pretty::render_pretty;

/// Render a document in the requested format
///
/// `color` only affects `OutputFormat::Pretty`.
pub fn render(document: &Value, format: OutputFormat, color: bool) -> Result<String> {
    let text = match format {
        OutputFormat::Pretty => render_pretty(document, color),
        OutputFormat::Plain => render_pretty(document, false),
        OutputFormat::Json => to_json(document)?,
        OutputFormat::Yaml => to_yaml(document)?.trim_end_matches('\n').to_string(),
        OutputFormat::Csv => render_csv(document),
    };
    Ok(text)
}

/// Print a document to stdout, colorizing pretty output on a terminal
pub fn print_document(document: &Value, format: OutputFormat) -> Result<()> {
    let color = format == OutputFormat::Pretty && std::io::stdout().is_terminal();
    let text = render(document, format, color)?;
    if text.is_empty() && format == OutputFormat::Csv {
        return Ok(());
    }
    println!("{}", text);
    Ok(())
}
