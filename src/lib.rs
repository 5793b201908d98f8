//! nbcli - Interrogate a NetBox API from the command line
//!
//! A read-only CLI for NetBox REST APIs.
//!
//! # Features
//!
//! - Fetch any API path with query params and filters
//! - Follow pagination to collect complete result sets
//! - Discover apps and endpoints of an instance
//! - Dump the whole instance to a YAML or JSON file
//! - Multiple output formats (pretty, plain, JSON, YAML, CSV)
//! - Dotted path selection on any response
//!
//! # Example
//!
//! ```bash
//! # Instance status
//! nbcli status
//!
//! # One device, only its name
//! nbcli get dcim/devices/1 --path .name
//!
//! # Every leaf switch, as CSV
//! nbcli list dcim/devices --filter role=leaf --all --csv
//!
//! # Export the instance
//! nbcli dump netbox.yaml
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod netbox;
pub mod output;
pub mod select;
pub mod ui;

pub use cli::{Cli, Command, OutputFormat};
pub use error::{NbError, Result};
pub use netbox::{run, NetBoxClient, Query, Settings, SettingsResolver};
pub use select::select;
