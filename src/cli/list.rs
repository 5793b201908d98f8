//! List command arguments

use clap::Parser;

use super::common::QueryArgs;

/// Arguments for 'list' command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// API endpoint, e.g. dcim/devices (omit to list every endpoint)
    pub endpoint: Option<String>,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Select a value using a dotted path (e.g. .results.0.name)
    #[arg(long = "path", value_name = "SELECTOR")]
    pub select_path: Option<String>,

    /// Follow pagination and return all results
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// With --all, print the pages fetched before a failure
    #[arg(long, default_value_t = false, requires = "all")]
    pub partial: bool,
}
