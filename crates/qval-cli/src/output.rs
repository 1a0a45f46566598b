use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => {
            let mut out = String::new();
            render_text(&mut out, &serde_json::to_value(value)?, 0);
            Ok(out.trim_end().to_string())
        }
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Indented `key: value` lines; arrays of scalars on one line, arrays of
/// objects as `-` blocks.
fn render_text(out: &mut String, value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                if is_inline(value) {
                    let _ = writeln!(out, "{pad}{key}: {}", scalar_cell(value));
                } else {
                    let _ = writeln!(out, "{pad}{key}:");
                    render_text(out, value, indent + 1);
                }
            }
        }
        Value::Array(_) if is_inline(value) => {
            let _ = writeln!(out, "{pad}{}", scalar_cell(value));
        }
        Value::Array(items) => {
            for item in items {
                let _ = writeln!(out, "{pad}-");
                render_text(out, item, indent + 1);
            }
        }
        scalar => {
            let _ = writeln!(out, "{pad}{}", scalar_cell(scalar));
        }
    }
}

fn is_inline(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items
            .iter()
            .all(|item| !matches!(item, Value::Object(_) | Value::Array(_))),
        _ => true,
    }
}

fn scalar_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items.iter().map(scalar_cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => "{}".to_string(),
    }
}

fn format_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => {
            let rounded = format!("{f:.4}");
            rounded
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        }
        _ => n.to_string(),
    }
}
