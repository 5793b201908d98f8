//! JSON and YAML serialization of documents

use serde_json::Value;

use crate::error::Result;

/// Pretty-printed JSON
pub fn to_json(document: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// YAML document text
pub fn to_yaml(document: &Value) -> Result<String> {
    Ok(serde_yml::to_string(document)?)
}
