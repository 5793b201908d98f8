//! Full instance export
//!
//! Every discovered endpoint is listed with full pagination, one endpoint at a
//! time. Failures are recorded inline so one bad endpoint never aborts the
//! dump.

use chrono::{DateTime, Local, Utc};
use indicatif::ProgressBar;
use log::{debug, info};
use reqwest::Url;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

use crate::config::api;
use crate::config::dump as dump_config;
use crate::error::{NbError, Result};
use crate::netbox::client::NetBoxClient;
use crate::netbox::query::Query;
use crate::output::{to_json, to_yaml};

/// Serialization of the dump file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Yaml,
    Json,
}

/// Metadata block written at the top of a dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpMetadata {
    pub hostname: String,
    pub dump_datetime: String,
    pub dump_timezone: String,
    pub nb_id: String,
}

impl DumpMetadata {
    /// Collect metadata from the status document and the configured base URL
    pub fn collect(status: &Value, base_url: &str, now: DateTime<Utc>) -> Self {
        let hostname = status
            .get("hostname")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        Self {
            hostname,
            dump_datetime: now.format(dump_config::DATETIME_FORMAT).to_string(),
            dump_timezone: local_timezone(),
            nb_id: instance_id(base_url),
        }
    }
}

/// Which endpoints made it into the dump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpReport {
    pub succeeded: Vec<String>,
    /// `(app/endpoint, error message)`
    pub failed: Vec<(String, String)>,
}

impl DumpReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// `Err(DumpIncomplete)` when any endpoint failed
    pub fn into_result(self) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }
        Err(NbError::DumpIncomplete {
            failed: self
                .failed
                .into_iter()
                .map(|(endpoint, msg)| format!("{}: {}", endpoint, first_line(&msg)))
                .collect(),
        })
    }
}

/// Whether an endpoint is left out of a default dump
pub fn is_excluded(endpoint_path: &str, include_all: bool) -> bool {
    !include_all && dump_config::EXCLUDED_ENDPOINTS.contains(&endpoint_path)
}

/// First DNS label of the instance host, e.g. `netbox` for netbox.example.com
pub fn instance_id(base_url: &str) -> String {
    Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .and_then(|host| host.split('.').next().map(str::to_string))
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// `$TZ` if set, otherwise the local UTC offset
pub fn local_timezone() -> String {
    match std::env::var("TZ") {
        Ok(tz) if !tz.is_empty() => tz,
        _ => Local::now().format("%:z").to_string(),
    }
}

/// Inline error entry for a failed endpoint
pub fn error_descriptor(err: &NbError) -> Value {
    match err {
        NbError::Http { status, body, .. } => json!({
            "error": body,
            "status": status,
        }),
        other => json!({ "error": other.to_string() }),
    }
}

/// Assemble the final document
pub fn build_dump_document(metadata: DumpMetadata, data: Map<String, Value>) -> Value {
    let body = json!({
        "hostname": metadata.hostname,
        "dump_datetime": metadata.dump_datetime,
        "dump_timezone": metadata.dump_timezone,
        "nb_id": metadata.nb_id,
        "data": data,
    });
    let mut root = Map::new();
    root.insert(dump_config::ROOT_KEY.to_string(), body);
    Value::Object(root)
}

/// Serialize and write the dump, replacing any existing file
pub fn write_dump(path: &Path, document: &Value, format: DumpFormat) -> Result<()> {
    let content = match format {
        DumpFormat::Yaml => to_yaml(document)?,
        DumpFormat::Json => to_json(document)?,
    };
    fs::write(path, content)
        .map_err(|e| NbError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    debug!("Wrote dump to {}", path.display());
    Ok(())
}

fn first_line(msg: &str) -> &str {
    msg.lines().next().unwrap_or("")
}

impl NetBoxClient {
    /// Collect the whole instance into one document
    ///
    /// Status and API discovery failures are fatal; per-endpoint failures are
    /// recorded in the document and the report.
    pub async fn dump(
        &self,
        include_all: bool,
        spinner: &Option<ProgressBar>,
    ) -> Result<(Value, DumpReport)> {
        let status = self.get_json(self.endpoint_url(api::STATUS)?).await?;
        let metadata = DumpMetadata::collect(&status, &self.settings().base_url, Utc::now());
        let index = self.fetch_index().await?;

        let mut data = Map::new();
        let mut report = DumpReport::default();

        for app in index.apps() {
            let mut app_data = Map::new();
            for endpoint in index.endpoints(app) {
                let endpoint_path = endpoint.path();
                if is_excluded(&endpoint_path, include_all) {
                    debug!("Skipping {}", endpoint_path);
                    continue;
                }
                if let Some(s) = spinner {
                    s.set_message(format!("Dumping {}...", endpoint_path));
                }

                let entry = match self.list_all(&endpoint.url, &Query::new()).await {
                    Ok(listing) => {
                        report.succeeded.push(endpoint_path);
                        listing.into_document()
                    }
                    Err(e) => {
                        let msg = format!("Failed to dump {}: {}", endpoint_path, e);
                        match spinner {
                            Some(s) => s.suspend(|| debug!("{}", msg)),
                            None => debug!("{}", msg),
                        }
                        let descriptor = error_descriptor(&e);
                        report.failed.push((endpoint_path, e.to_string()));
                        descriptor
                    }
                };
                app_data.insert(endpoint.name.clone(), entry);
            }
            data.insert(app.to_string(), Value::Object(app_data));
        }

        info!(
            "Dumped {} endpoints, {} failed",
            report.succeeded.len(),
            report.failed.len()
        );
        Ok((build_dump_document(metadata, data), report))
    }
}
