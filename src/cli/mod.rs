//! CLI argument parsing

mod common;
mod dump;
mod get;
mod list;
mod show;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::defaults;
use crate::error::Result;

pub use common::{FormatArgs, OutputFormat, QueryArgs};
pub use dump::DumpArgs;
pub use get::GetArgs;
pub use list::ListArgs;
pub use show::{ShowArgs, ShowTarget};

/// NetBox API CLI
#[derive(Parser, Debug)]
#[command(name = "nbcli")]
#[command(version)]
#[command(about = "Interrogate a NetBox API from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// HTTP timeout in seconds (default: NETBOX_TIMEOUT or 30)
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<f64>,

    /// Disable TLS certificate verification
    #[arg(long, global = true, default_value_t = false)]
    pub insecure: bool,

    /// Settings file with NETBOX_URL and NETBOX_TOKEN (default: ./.env)
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    #[command(flatten)]
    pub format: FormatArgs,
}

impl Cli {
    /// Selected output format
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.format.format()
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch /api/status/
    Status(StatusArgs),

    /// GET an API path, e.g. dcim/devices/1
    Get(GetArgs),

    /// List an endpoint with optional pagination
    List(ListArgs),

    /// Dump all API objects to a file
    Dump(DumpArgs),

    /// Show verbs, apps or endpoints of the instance
    Show(ShowArgs),
}

/// Arguments for 'status' command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Select a value using a dotted path (e.g. .netbox-version)
    #[arg(long = "path", value_name = "SELECTOR")]
    pub select_path: Option<String>,
}
