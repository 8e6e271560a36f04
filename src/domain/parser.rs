use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::schema::{FieldKind, FieldSchema, ItemSchema};

/// Loose field description as authored in schema documents:
/// `{"type": "...", "placeholder": "...", "items": {...}}`.
#[derive(Debug, Deserialize)]
struct RawField {
    #[serde(rename = "type")]
    kind: Option<String>,
    placeholder: Option<String>,
    items: Option<Box<RawItems>>,
}

#[derive(Debug, Deserialize)]
struct RawItems {
    #[serde(rename = "type")]
    kind: Option<String>,
    properties: Option<IndexMap<String, RawField>>,
}

/// Parse a schema document into the typed model.
///
/// Accepts either a plain mapping of field name to field description, or the
/// same mapping wrapped in `{"type": "object", "properties": {...}}`.
/// Unknown field kinds degrade to plain text with a logged warning; parsing
/// fails only on structurally impossible input.
pub fn parse_item_schema(value: &Value) -> Result<ItemSchema> {
    let body = unwrap_properties(value);
    let raw: IndexMap<String, RawField> = Deserialize::deserialize(body)
        .context("schema document must be an object mapping field names to field descriptions")?;
    build_fields(raw)
}

fn unwrap_properties(value: &Value) -> &Value {
    let is_wrapper = match value.get("type").and_then(Value::as_str) {
        Some(kind) => kind.eq_ignore_ascii_case("object"),
        None => false,
    };
    if is_wrapper
        && let Some(properties) = value.get("properties")
    {
        return properties;
    }
    value
}

fn build_fields(raw: IndexMap<String, RawField>) -> Result<ItemSchema> {
    let mut fields = IndexMap::with_capacity(raw.len());
    for (name, field) in raw {
        let schema = build_field(&name, field)?;
        fields.insert(name, schema);
    }
    Ok(ItemSchema { fields })
}

fn build_field(name: &str, raw: RawField) -> Result<FieldSchema> {
    let kind = match raw.kind.as_deref() {
        Some("text") | None => FieldKind::Text,
        Some("textarea") => FieldKind::Textarea,
        Some("number") => FieldKind::Number,
        Some("array") => {
            let items = raw
                .items
                .with_context(|| format!("array field '{name}' must define items"))?;
            detect_item_kind(name, *items)?
        }
        Some(other) => {
            tracing::warn!(field = name, kind = other, "unknown field type, treating as text");
            FieldKind::Text
        }
    };

    Ok(FieldSchema {
        name: name.to_string(),
        label: prettify_label(name),
        placeholder: raw.placeholder,
        kind,
    })
}

fn detect_item_kind(name: &str, items: RawItems) -> Result<FieldKind> {
    match items.kind.as_deref() {
        Some("object") => {
            let properties = items
                .properties
                .with_context(|| format!("object items of field '{name}' must define properties"))?;
            Ok(FieldKind::ObjectList(build_fields(properties)?))
        }
        Some("string") | Some("text") | None => Ok(FieldKind::ScalarList),
        Some(other) => {
            tracing::warn!(
                field = name,
                item_kind = other,
                "unknown array item type, treating entries as text"
            );
            Ok(FieldKind::ScalarList)
        }
    }
}

pub(crate) fn prettify_label(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut result = String::with_capacity(raw.len());
    let mut capitalize = true;
    for ch in raw.chars() {
        if ch == '_' || ch == '-' {
            result.push(' ');
            capitalize = true;
            continue;
        }

        if capitalize {
            result.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            result.push(ch);
        }
    }

    result.trim().to_string()
}
