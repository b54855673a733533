use std::io::Write;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    write_to(&mut std::io::stdout().lock(), value, format)
}

/// Write a rendered response followed by a newline.
pub fn write_to<W: Write, T: Serialize>(
    writer: &mut W,
    value: &T,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    writeln!(writer, "{rendered}")?;
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
        scalar => {
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&["value"], &rows, table_options()))
        }
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, table_options());
    }

    // Column order follows the first row; keys only later rows carry go last.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
