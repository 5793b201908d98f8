//! Dump command arguments

use clap::Parser;
use std::path::PathBuf;

/// Arguments for 'dump' command
#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// Output filename (YAML by default, JSON with --json); overwritten if present
    pub filename: PathBuf,

    /// Include jobs and object-changes in the dump
    #[arg(long, default_value_t = false)]
    pub include_all: bool,
}
