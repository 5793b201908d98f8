//! API root discovery
//!
//! `/api/` maps app names to app roots, and each app root maps endpoint
//! names to list URLs. Together they describe every endpoint an instance
//! exposes.

use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::api;
use crate::error::Result;
use crate::netbox::client::NetBoxClient;

/// A discovered list endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRef {
    pub app: String,
    pub name: String,
    pub url: String,
}

impl EndpointRef {
    /// `app/endpoint` form, as typed on the command line
    pub fn path(&self) -> String {
        format!("{}/{}", self.app, self.name)
    }
}

/// Apps and their endpoints, sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiIndex {
    apps: BTreeMap<String, Vec<EndpointRef>>,
}

impl ApiIndex {
    /// Build an index from already fetched app payloads
    pub fn from_apps(apps: Vec<(String, String, Value)>) -> Self {
        let mut index = BTreeMap::new();
        for (app, app_url, payload) in apps {
            let mut names: Vec<&String> = match &payload {
                Value::Object(map) => map.keys().collect(),
                _ => Vec::new(),
            };
            names.sort();
            let endpoints = names
                .into_iter()
                .map(|name| EndpointRef {
                    app: app.clone(),
                    name: name.clone(),
                    url: join_url(&app_url, name),
                })
                .collect();
            index.insert(app, endpoints);
        }
        Self { apps: index }
    }

    /// App names
    pub fn apps(&self) -> Vec<&str> {
        self.apps.keys().map(String::as_str).collect()
    }

    /// Endpoints of one app, empty if the app is unknown
    pub fn endpoints(&self, app: &str) -> &[EndpointRef] {
        self.apps.get(app).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every endpoint, grouped by app, in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &EndpointRef> {
        self.apps.values().flatten()
    }

    /// Every endpoint as `app/endpoint`
    pub fn endpoint_paths(&self) -> Vec<String> {
        self.iter().map(EndpointRef::path).collect()
    }

    /// Endpoint paths containing `term` (case-insensitive)
    pub fn search(&self, term: &str) -> Vec<String> {
        let needle = term.to_lowercase();
        self.iter()
            .map(EndpointRef::path)
            .filter(|p| p.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Join a base URL and a path segment with exactly one `/`, ending in `/`
pub fn join_url(base: &str, segment: &str) -> String {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segment.trim_start_matches('/')
    );
    if joined.ends_with('/') {
        joined
    } else {
        format!("{}/", joined)
    }
}

impl NetBoxClient {
    /// Fetch `/api/`
    pub async fn fetch_api_root(&self) -> Result<Value> {
        let url = self.endpoint_url("")?;
        self.get_json(url).await
    }

    /// Discover every app and endpoint (one request per app)
    pub async fn fetch_index(&self) -> Result<ApiIndex> {
        let root = self.fetch_api_root().await?;
        let entries: Vec<(String, Value)> = match root {
            Value::Object(map) => map.into_iter().collect(),
            _ => Vec::new(),
        };

        let mut apps = Vec::new();
        for (app, link) in entries {
            if app == api::STATUS {
                continue;
            }
            let app_url = match link {
                Value::String(url) => url,
                _ => self.endpoint_url(&app)?.to_string(),
            };
            debug!("Discovering endpoints of app '{}'", app);
            let payload = self.get_json(self.endpoint_url(&app_url)?).await?;
            apps.push((app, app_url, payload));
        }

        let index = ApiIndex::from_apps(apps);
        debug!(
            "Discovered {} endpoints in {} apps",
            index.iter().count(),
            index.apps().len()
        );
        Ok(index)
    }
}
