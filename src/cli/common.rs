//! Common CLI types shared across commands

use clap::Args;

use crate::error::{NbError, Result};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Indented text, colorized on a terminal (default)
    #[default]
    Pretty,
    /// Indented text without color
    Plain,
    /// Pretty-printed JSON
    Json,
    /// YAML document
    Yaml,
    /// Comma-separated values
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Pretty => write!(f, "pretty"),
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Mutually exclusive output format flags, accepted anywhere on the line
#[derive(Args, Debug, Clone, Default)]
pub struct FormatArgs {
    /// Print plain text output
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml", "csv"])]
    pub plain: bool,

    /// Print JSON output
    #[arg(long, global = true, conflicts_with_all = ["plain", "yaml", "csv"])]
    pub json: bool,

    /// Print YAML output
    #[arg(long, global = true, conflicts_with_all = ["plain", "json", "csv"])]
    pub yaml: bool,

    /// Print CSV output
    #[arg(long, global = true, conflicts_with_all = ["plain", "json", "yaml"])]
    pub csv: bool,
}

impl FormatArgs {
    /// Selected format, `Pretty` when no flag is given
    ///
    /// clap misses conflicts split across the subcommand, so they fail here.
    pub fn format(&self) -> Result<OutputFormat> {
        let selected: Vec<OutputFormat> = [
            (self.plain, OutputFormat::Plain),
            (self.json, OutputFormat::Json),
            (self.yaml, OutputFormat::Yaml),
            (self.csv, OutputFormat::Csv),
        ]
        .into_iter()
        .filter_map(|(set, format)| set.then_some(format))
        .collect();

        match selected.as_slice() {
            [] => Ok(OutputFormat::Pretty),
            [format] => Ok(*format),
            _ => Err(NbError::InvalidArgument(
                "Only one of --plain, --json, --yaml, --csv may be given".to_string(),
            )),
        }
    }
}

/// Query arguments shared by `get` and `list`
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Query param in key=value form (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Filter in key=value form (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,
}
