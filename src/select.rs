//! Dotted path selection over JSON documents
//!
//! A selector such as `.results.0.name` walks the document one segment at a
//! time: object segments are key lookups, array segments are indexes.

use serde_json::Value;

use crate::error::{NbError, Result};

/// Select a nested value from `document`
///
/// The leading `.` is optional. An empty selector (or a lone `.`) returns the
/// whole document. A segment that does not match the current value's type,
/// a missing key, or an out-of-range index fails with `PathNotFound`.
pub fn select<'a>(document: &'a Value, path: &str) -> Result<&'a Value> {
    let trimmed = path.trim();
    let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if body.is_empty() {
        return Ok(document);
    }

    let mut current = document;
    for segment in body.split('.') {
        current = step(current, segment).ok_or_else(|| NbError::PathNotFound {
            segment: segment.to_string(),
            path: trimmed.to_string(),
        })?;
    }
    Ok(current)
}

/// Apply an optional selector, returning an owned value
pub fn select_optional(document: Value, path: Option<&str>) -> Result<Value> {
    match path {
        Some(p) => select(&document, p).cloned(),
        None => Ok(document),
    }
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            segment.parse::<usize>().ok().and_then(|i| items.get(i))
        }
        _ => None,
    }
}
