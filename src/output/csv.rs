//! CSV output formatter

use serde_json::{Map, Value};
use std::collections::BTreeSet;

use super::common::escape_csv;
use crate::config::api;

/// Header and rows of a CSV table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Column used for rows that are not objects
const VALUE_COLUMN: &str = "value";

/// Map a document onto CSV rows
///
/// - an object with a `results` list uses the list items as rows
/// - a list uses its items as rows
/// - any other object becomes a `key,value` table of flattened dotted keys
/// - a scalar becomes a single `value` row
///
/// The header is the sorted union of every row's keys; absent fields are empty.
pub fn normalize_rows(document: &Value) -> CsvTable {
    let rows: Vec<&Value> = match document {
        Value::Object(map) => match map.get(api::RESULTS_KEY) {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => return flattened_table(map),
        },
        Value::Array(items) => items.iter().collect(),
        scalar => vec![scalar],
    };

    if rows.is_empty() {
        return CsvTable {
            headers: Vec::new(),
            rows: Vec::new(),
        };
    }

    let mut header_set: BTreeSet<&str> = BTreeSet::new();
    for row in &rows {
        match row {
            Value::Object(fields) => header_set.extend(fields.keys().map(String::as_str)),
            _ => {
                header_set.insert(VALUE_COLUMN);
            }
        }
    }
    let headers: Vec<String> = header_set.into_iter().map(str::to_string).collect();

    let rows = rows
        .into_iter()
        .map(|row| match row {
            Value::Object(fields) => headers
                .iter()
                .map(|h| fields.get(h).map(cell_text).unwrap_or_default())
                .collect(),
            other => headers
                .iter()
                .map(|h| {
                    if h == VALUE_COLUMN {
                        cell_text(other)
                    } else {
                        String::new()
                    }
                })
                .collect(),
        })
        .collect();

    CsvTable { headers, rows }
}

/// Render a document as CSV text (empty when there are no rows)
pub fn render_csv(document: &Value) -> String {
    let table = normalize_rows(document);
    if table.rows.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    lines.push(join_row(&table.headers));
    for row in &table.rows {
        lines.push(join_row(row));
    }
    lines.join("\n")
}

fn join_row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| escape_csv(c))
        .collect::<Vec<_>>()
        .join(",")
}

fn flattened_table(map: &Map<String, Value>) -> CsvTable {
    let mut pairs = Vec::new();
    flatten_into(map, "", &mut pairs);
    CsvTable {
        headers: vec!["key".to_string(), VALUE_COLUMN.to_string()],
        rows: pairs.into_iter().map(|(k, v)| vec![k, v]).collect(),
    }
}

/// Flatten nested objects into dotted keys; lists stay as JSON text
fn flatten_into(map: &Map<String, Value>, prefix: &str, out: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let joined = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(nested) => flatten_into(nested, &joined, out),
            other => out.push((joined, cell_text(other))),
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}
