//! Command handlers

use log::{debug, info};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::IsTerminal;

use crate::cli::{
    Cli, Command, DumpArgs, GetArgs, ListArgs, OutputFormat, ShowArgs, ShowTarget, StatusArgs,
};
use crate::config::api;
use crate::error::{NbError, Result};
use crate::netbox::client::NetBoxClient;
use crate::netbox::dump::{write_dump, DumpFormat};
use crate::netbox::query::Query;
use crate::netbox::settings::{Settings, SettingsOverrides, SettingsResolver};
use crate::output::print_document;
use crate::select::select_optional;
use crate::ui::{create_spinner, finish_spinner};

/// Verbs listed by `show verbs`
pub const VERBS: &[&str] = &["status", "get", "list", "dump", "show"];

/// Load settings, build the client and dispatch the command
pub async fn run(cli: &Cli) -> Result<()> {
    let format = cli.output_format()?;
    let overrides = SettingsOverrides {
        timeout: cli.timeout,
        insecure: cli.insecure,
    };
    let settings = SettingsResolver::new(cli.env_file.as_deref()).resolve(overrides)?;
    debug!(
        "Using {} (timeout {:?}, insecure {})",
        settings.base_url, settings.timeout, settings.insecure
    );
    let client = NetBoxClient::new(settings)?;

    match &cli.command {
        Command::Status(args) => run_status_command(&client, args, format).await,
        Command::Get(args) => run_get_command(&client, args, format).await,
        Command::List(args) => run_list_command(&client, args, format).await,
        Command::Dump(args) => run_dump_command(&client, args, format).await,
        Command::Show(args) => run_show_command(&client, args, format).await,
    }
}

/// Run the status command
pub async fn run_status_command(
    client: &NetBoxClient,
    args: &StatusArgs,
    format: OutputFormat,
) -> Result<()> {
    let payload = client.execute(api::STATUS, &Query::new()).await?;
    output_selected(payload, args.select_path.as_deref(), format)
}

/// Run the get command
pub async fn run_get_command(
    client: &NetBoxClient,
    args: &GetArgs,
    format: OutputFormat,
) -> Result<()> {
    let spaced = args.spaced_target();

    if is_cli_config_path(&spaced) {
        let payload = cli_config_payload(client.settings(), format)?;
        return output_selected(payload, args.select_path.as_deref(), format);
    }

    if is_status_path(&spaced) {
        let payload = client.execute(api::STATUS, &Query::new()).await?;
        return output_selected(payload, args.select_path.as_deref(), format);
    }

    let query = Query::from_args(&args.query.params, &args.query.filters)?;
    let payload = client.execute(&args.slashed_target(), &query).await?;
    output_selected(payload, args.select_path.as_deref(), format)
}

/// Run the list command
///
/// With `--all`, the selector applies to the aggregated
/// `{"count", "results"}` document.
pub async fn run_list_command(
    client: &NetBoxClient,
    args: &ListArgs,
    format: OutputFormat,
) -> Result<()> {
    let Some(endpoint) = args.endpoint.as_deref() else {
        let payload = show_payload(client, &ShowTarget::Endpoints).await?;
        return output_selected(payload, args.select_path.as_deref(), format);
    };

    let query = Query::from_args(&args.query.params, &args.query.filters)?;

    if !args.all {
        let payload = client.execute(endpoint, &query).await?;
        return output_selected(payload, args.select_path.as_deref(), format);
    }

    if args.partial {
        let partial = client.list_all_partial(endpoint, &query).await;
        info!(
            "Fetched {} items from {} page(s)",
            partial.listing.len(),
            partial.pages
        );
        output_selected(
            partial.listing.into_document(),
            args.select_path.as_deref(),
            format,
        )?;
        return match partial.error {
            Some(e) => Err(e),
            None => Ok(()),
        };
    }

    let listing = client.list_all(endpoint, &query).await?;
    info!("Fetched {} items", listing.len());
    output_selected(listing.into_document(), args.select_path.as_deref(), format)
}

/// Run the dump command
///
/// The file is written even when some endpoints failed; the failures are
/// then returned as `DumpIncomplete`.
pub async fn run_dump_command(
    client: &NetBoxClient,
    args: &DumpArgs,
    format: OutputFormat,
) -> Result<()> {
    let dump_format = dump_format(format)?;

    let spinner = create_spinner("Discovering endpoints...", !std::io::stderr().is_terminal());
    let result = client.dump(args.include_all, &spinner).await;
    finish_spinner(spinner);
    let (document, report) = result?;

    write_dump(&args.filename, &document, dump_format)?;
    println!("Wrote {}", args.filename.display());

    report.into_result()
}

/// Run the show command
pub async fn run_show_command(
    client: &NetBoxClient,
    args: &ShowArgs,
    format: OutputFormat,
) -> Result<()> {
    let target = args.resolve_target().ok_or_else(|| {
        NbError::InvalidArgument(
            "show: error: the following arguments are required: target".to_string(),
        )
    })?;
    let payload = show_payload(client, &target).await?;
    output_selected(payload, args.select_path.as_deref(), format)
}

/// Build the document printed by `show`
pub async fn show_payload(client: &NetBoxClient, target: &ShowTarget) -> Result<Value> {
    if *target == ShowTarget::Verbs {
        return Ok(json!({ "verbs": VERBS }));
    }

    let index = client.fetch_index().await?;
    Ok(match target {
        ShowTarget::Apps => json!({ "apps": index.apps() }),
        ShowTarget::Search(term) => json!({ "endpoints": index.search(term) }),
        _ => json!({ "endpoints": index.endpoint_paths() }),
    })
}

/// Apply the optional selector and print
fn output_selected(payload: Value, selector: Option<&str>, format: OutputFormat) -> Result<()> {
    let selected = select_optional(payload, selector)?;
    print_document(&selected, format)
}

/// Dump files are YAML or JSON only
pub fn dump_format(format: OutputFormat) -> Result<DumpFormat> {
    match format {
        OutputFormat::Pretty | OutputFormat::Yaml => Ok(DumpFormat::Yaml),
        OutputFormat::Json => Ok(DumpFormat::Json),
        OutputFormat::Plain | OutputFormat::Csv => Err(NbError::UnsupportedFormat(
            "Dump output supports YAML or JSON only.".to_string(),
        )),
    }
}

/// Resolved connection settings, as shown by `get cli config`
#[derive(Debug, Serialize)]
pub struct CliConfig {
    pub netbox_url: String,
    pub token_present: bool,
    pub token_masked: Option<String>,
    pub timeout: f64,
    pub insecure: bool,
    pub format: String,
}

impl CliConfig {
    pub fn from_settings(settings: &Settings, format: OutputFormat) -> Self {
        Self {
            netbox_url: settings.base_url.clone(),
            token_present: !settings.token.is_empty(),
            token_masked: settings.masked_token(),
            timeout: settings.timeout.as_secs_f64(),
            insecure: settings.insecure,
            format: format.to_string(),
        }
    }
}

/// `get cli config` document; the token itself is never included
pub fn cli_config_payload(settings: &Settings, format: OutputFormat) -> Result<Value> {
    Ok(serde_json::to_value(CliConfig::from_settings(settings, format))?)
}

/// Normalize a path for special target comparisons
fn normalize_path(path: &str) -> &str {
    let cleaned = path.trim().trim_start_matches('/');
    let cleaned = cleaned.strip_prefix("api/").unwrap_or(cleaned);
    cleaned.trim_end_matches('/')
}

pub fn is_status_path(path: &str) -> bool {
    normalize_path(path) == api::STATUS
}

pub fn is_cli_config_path(path: &str) -> bool {
    normalize_path(path) == "cli config"
}
