//! NetBox API access
//!
//! Client, pagination, endpoint discovery and the full-instance dump.

mod client;
mod commands;
mod dump;
mod index;
mod pager;
mod query;
mod settings;

pub use client::{auth_header_value, build_url, compose_url, NetBoxClient};
pub use commands::{
    cli_config_payload, dump_format, run, run_dump_command, run_get_command, run_list_command,
    run_show_command, run_status_command, show_payload, CliConfig, VERBS,
};
pub use dump::{build_dump_document, write_dump, DumpFormat, DumpMetadata, DumpReport};
pub use index::{ApiIndex, EndpointRef};
pub use pager::{Listing, PartialListing};
pub use query::{parse_kv, Query};
pub use settings::{mask_token, Settings, SettingsOverrides, SettingsResolver};
