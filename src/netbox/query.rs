//! Query parameters for NetBox requests

use crate::error::{NbError, Result};

/// Ordered query parameters
///
/// Generic params come first, filters after. Repeated keys are kept, which is
/// how NetBox expresses OR-filters (`?site=dc1&site=dc2`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from raw `--param` and `--filter` values
    pub fn from_args(params: &[String], filters: &[String]) -> Result<Self> {
        let mut query = Self::new();
        for raw in params.iter().chain(filters.iter()) {
            let (key, value) = parse_kv(raw)?;
            query.push(key, value);
        }
        Ok(query)
    }

    /// Append a pair
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Split a `key=value` argument on the first `=`
pub fn parse_kv(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(NbError::InvalidArgument(format!(
            "Invalid param '{}'. Use key=value.",
            raw
        ))),
    }
}
