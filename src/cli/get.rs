//! Get command arguments

use clap::Parser;

use super::common::QueryArgs;

/// Arguments for 'get' command
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// API path or full URL, e.g. dcim/devices/1
    ///
    /// Multiple words address special targets:
    ///   status       instance status (same as the status command)
    ///   cli config   resolved connection settings, token masked
    #[arg(required = true, num_args = 1.., verbatim_doc_comment)]
    pub target: Vec<String>,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Select a value using a dotted path (e.g. .timeout)
    #[arg(long = "path", value_name = "SELECTOR")]
    pub select_path: Option<String>,
}

impl GetArgs {
    /// Target words joined with spaces, for special target matching
    pub fn spaced_target(&self) -> String {
        self.target.join(" ")
    }

    /// Target words joined with `/`, for the request URL
    pub fn slashed_target(&self) -> String {
        self.target.join("/")
    }
}
