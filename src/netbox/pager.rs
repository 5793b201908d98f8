//! Pagination over NetBox list responses
//!
//! NetBox list pages look like `{"count", "next", "previous", "results"}`.
//! The pager follows `next` until it is absent or null.

use log::debug;
use reqwest::Url;
use serde_json::{json, Map, Value};

use crate::config::api;
use crate::error::{NbError, Result};
use crate::netbox::client::{compose_url, NetBoxClient};
use crate::netbox::query::Query;

/// Outcome of following pagination
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    /// Items of every page, in page order
    Paged(Vec<Value>),
    /// The response was not a paginated list and is kept as-is
    Single(Value),
}

impl Listing {
    /// Document form: `{"count": N, "results": [...]}` for paged listings
    pub fn into_document(self) -> Value {
        match self {
            Listing::Paged(results) => json!({
                "count": results.len(),
                "results": results,
            }),
            Listing::Single(value) => value,
        }
    }

    /// Number of collected items (1 for a single document)
    pub fn len(&self) -> usize {
        match self {
            Listing::Paged(results) => results.len(),
            Listing::Single(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Results gathered before an optional failure
#[derive(Debug)]
pub struct PartialListing {
    pub listing: Listing,
    pub pages: usize,
    pub error: Option<NbError>,
}

impl PartialListing {
    fn failed(results: Vec<Value>, pages: usize, error: NbError) -> Self {
        Self {
            listing: Listing::Paged(results),
            pages,
            error: Some(error),
        }
    }
}

impl NetBoxClient {
    /// Fetch every page of a list endpoint
    ///
    /// Fails as a whole if any page fails.
    pub async fn list_all(&self, endpoint: &str, query: &Query) -> Result<Listing> {
        let partial = self.list_all_partial(endpoint, query).await;
        match partial.error {
            Some(e) => Err(e),
            None => Ok(partial.listing),
        }
    }

    /// Fetch every page, keeping the items gathered before a failure
    pub async fn list_all_partial(&self, endpoint: &str, query: &Query) -> PartialListing {
        let first_url = match compose_url(&self.settings().base_url, endpoint, query) {
            Ok(url) => url,
            Err(e) => return PartialListing::failed(Vec::new(), 0, e),
        };

        let mut results: Vec<Value> = Vec::new();
        let mut pages = 0;
        let mut next = Some(first_url);

        while let Some(page_url) = next.take() {
            let payload = match self.get_json(page_url).await {
                Ok(payload) => payload,
                Err(e) => {
                    debug!("Page {} failed after {} items", pages + 1, results.len());
                    return PartialListing::failed(results, pages, e);
                }
            };

            let page = match into_list_page(payload) {
                Ok(page) => page,
                Err(payload) if pages == 0 => {
                    debug!("Response is not a list page, returning it unchanged");
                    return PartialListing {
                        listing: Listing::Single(payload),
                        pages: 1,
                        error: None,
                    };
                }
                Err(_) => {
                    let e = NbError::Json(format!("Page {} is not a list response", pages + 1));
                    return PartialListing::failed(results, pages, e);
                }
            };

            pages += 1;
            let (items, next_link) = match split_page(page) {
                Ok(split) => split,
                Err(e) => return PartialListing::failed(results, pages - 1, e),
            };
            debug!("Page {} returned {} items", pages, items.len());
            results.extend(items);
            next = next_link;
        }

        debug!("Fetched {} items across {} page(s)", results.len(), pages);
        PartialListing {
            listing: Listing::Paged(results),
            pages,
            error: None,
        }
    }
}

/// Keep the payload only if it is an object with a `results` key
fn into_list_page(payload: Value) -> std::result::Result<Map<String, Value>, Value> {
    match payload {
        Value::Object(map) if map.contains_key(api::RESULTS_KEY) => Ok(map),
        other => Err(other),
    }
}

/// Extract the page items and the next page cursor
fn split_page(mut page: Map<String, Value>) -> Result<(Vec<Value>, Option<Url>)> {
    let items = match page.remove(api::RESULTS_KEY) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            return Err(NbError::Json(format!(
                "'{}' is not a list",
                api::RESULTS_KEY
            )))
        }
    };

    let next = match page.remove(api::NEXT_KEY) {
        Some(Value::String(link)) if !link.is_empty() => Some(
            Url::parse(&link)
                .map_err(|e| NbError::Json(format!("Invalid next link '{}': {}", link, e)))?,
        ),
        _ => None,
    };

    Ok((items, next))
}
