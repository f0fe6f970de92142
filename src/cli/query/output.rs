use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::cli::args::QueryArgs;
use crate::log;

/// Print (or write) query output as JSON.
pub(super) fn output_results<T: Serialize>(results: &T, args: &QueryArgs) -> Result<()> {
    let value = serde_json::to_value(results)?;
    let output = shape(value, args.fields.as_deref(), args.filter_empty);

    let formatted = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("failed to create {}", output_path.display()))?;
        writeln!(file, "{}", formatted)?;
        log!("query"; "wrote output to {}", output_path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

/// Apply field selection and empty-value filtering to every array item.
fn shape(value: JsonValue, fields: Option<&[String]>, filter_empty: bool) -> JsonValue {
    let JsonValue::Array(items) = value else {
        return value;
    };

    let items = items
        .into_iter()
        .map(|item| {
            let item = match fields {
                Some(fields) => select_fields(&item, fields),
                None => item,
            };
            if filter_empty {
                strip_empty(item)
            } else {
                item
            }
        })
        .collect();
    JsonValue::Array(items)
}

/// Keep only `fields`, with `url` always first.
///
/// Dotted names reach into nested objects: `meta.title` is emitted under the
/// key `meta.title`. Missing fields come out as `null`.
fn select_fields(item: &JsonValue, fields: &[String]) -> JsonValue {
    let mut obj = Map::new();
    if let Some(url) = item.get("url") {
        obj.insert("url".to_string(), url.clone());
    }

    for field in fields.iter().filter(|f| f.as_str() != "url") {
        let value = field
            .split('.')
            .try_fold(item, |v, key| v.get(key))
            .cloned()
            .unwrap_or(JsonValue::Null);
        obj.insert(field.clone(), value);
    }

    JsonValue::Object(obj)
}

/// Drop null, `""`, `[]` and `{}` values recursively.
fn strip_empty(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .map(|(k, v)| (k, strip_empty(v)))
                .filter(|(_, v)| !is_empty_value(v))
                .collect(),
        ),
        JsonValue::Array(items) => JsonValue::Array(
            items
                .into_iter()
                .map(strip_empty)
                .filter(|v| !is_empty_value(v))
                .collect(),
        ),
        other => other,
    }
}

/// Check if a JSON value is considered "empty" (null, "", [] or {})
fn is_empty_value(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(arr) => arr.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        _ => false,
    }
}
