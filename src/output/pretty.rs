//! Indented text output, optionally colorized

use serde_json::Value;

use super::common::{colorize, colors};

const INDENT: usize = 2;

/// Render a document as indented `key: value` text
///
/// Objects print one key per line, arrays one `- item` per element, nested
/// containers are indented under their key. Top-level strings print raw.
pub fn render_pretty(document: &Value, color: bool) -> String {
    match document {
        Value::Object(map) if !map.is_empty() => render_lines(document, 0, color).join("\n"),
        Value::Array(items) if !items.is_empty() => render_lines(document, 0, color).join("\n"),
        scalar => scalar_text(scalar, color),
    }
}

fn render_lines(value: &Value, indent: usize, color: bool) -> Vec<String> {
    let pad = " ".repeat(indent);
    let mut lines = Vec::new();

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let key = colorize(key, colors::KEY, color);
                if is_nested(child) {
                    lines.push(format!("{}{}:", pad, key));
                    lines.extend(render_lines(child, indent + INDENT, color));
                } else {
                    let text = inline_text(child, indent + INDENT, color);
                    lines.push(format!("{}{}: {}", pad, key, text));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if is_nested(item) {
                    let mut nested = render_lines(item, indent + INDENT, color);
                    if let Some(first) = nested.first_mut() {
                        *first = format!("{}- {}", pad, first.trim_start());
                    }
                    lines.extend(nested);
                } else {
                    let text = inline_text(item, indent + INDENT, color);
                    lines.push(format!("{}- {}", pad, text));
                }
            }
        }
        scalar => lines.push(format!("{}{}", pad, scalar_text(scalar, color))),
    }

    lines
}

/// Non-empty object or array
fn is_nested(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

/// Scalar text whose continuation lines are indented to `indent`
fn inline_text(value: &Value, indent: usize, color: bool) -> String {
    let text = scalar_text(value, color);
    if !text.contains('\n') {
        return text;
    }
    let continuation = format!("\n{}", " ".repeat(indent));
    text.split('\n').collect::<Vec<_>>().join(&continuation)
}

fn scalar_text(value: &Value, color: bool) -> String {
    match value {
        Value::String(s) => colorize(s, colors::STRING, color),
        Value::Number(n) => colorize(&n.to_string(), colors::NUMBER, color),
        Value::Bool(b) => colorize(&b.to_string(), colors::LITERAL, color),
        Value::Null => colorize("null", colors::LITERAL, color),
        Value::Object(_) => "{}".to_string(),
        Value::Array(_) => "[]".to_string(),
    }
}
