use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::domain::{
    Collection, FieldKind, FieldValue, ItemSchema, ObjectEntry, ScalarEntry, ScalarValue,
};

/// Seed a collection from a caller-supplied JSON value.
///
/// The result is shape-normalized against the schema: every schema field is
/// present on every item, array-kind fields always hold lists, and values
/// the schema cannot represent degrade to empty text. Entry ids are
/// assigned here and live only for the editing session.
pub fn collection_from_value(value: &Value, schema: &ItemSchema) -> Collection {
    let items = match value.as_array() {
        Some(items) => items
            .iter()
            .map(|item| item_from_value(item, schema))
            .collect(),
        None => Vec::new(),
    };
    Collection { items }
}

/// Build the collection back into the JSON value handed to the caller on
/// every change notification. Entry ids are stripped; field order follows
/// the order the fields were seeded in, which is schema order.
pub fn collection_to_value(collection: &Collection) -> Value {
    Value::Array(collection.items.iter().map(item_to_value).collect())
}

fn item_from_value(value: &Value, schema: &ItemSchema) -> ObjectEntry {
    let source = value.as_object();
    let mut fields = IndexMap::with_capacity(schema.len());
    for (name, field) in schema.iter() {
        let supplied = source.and_then(|map| map.get(name));
        fields.insert(name.clone(), field_from_value(supplied, &field.kind));
    }
    ObjectEntry::new(fields)
}

fn field_from_value(value: Option<&Value>, kind: &FieldKind) -> FieldValue {
    match kind {
        FieldKind::Text | FieldKind::Textarea | FieldKind::Number => {
            FieldValue::Scalar(match value {
                Some(Value::String(text)) => ScalarValue::Text(text.clone()),
                Some(Value::Number(num)) => ScalarValue::Number(num.clone()),
                _ => ScalarValue::empty(),
            })
        }
        FieldKind::ScalarList => match value {
            Some(Value::Array(items)) => {
                FieldValue::ScalarList(items.iter().map(scalar_entry_from_value).collect())
            }
            _ => FieldValue::ScalarList(Vec::new()),
        },
        FieldKind::ObjectList(nested) => match value {
            Some(Value::Array(items)) => FieldValue::ObjectList(
                items.iter().map(|item| item_from_value(item, nested)).collect(),
            ),
            _ => FieldValue::ObjectList(Vec::new()),
        },
    }
}

fn scalar_entry_from_value(value: &Value) -> ScalarEntry {
    let text = match value {
        Value::String(text) => text.clone(),
        Value::Number(num) => num.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    ScalarEntry::new(text)
}

fn item_to_value(item: &ObjectEntry) -> Value {
    let mut map = Map::with_capacity(item.fields.len());
    for (name, value) in &item.fields {
        map.insert(name.clone(), field_to_value(value));
    }
    Value::Object(map)
}

fn field_to_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Scalar(ScalarValue::Text(text)) => Value::String(text.clone()),
        FieldValue::Scalar(ScalarValue::Number(num)) => Value::Number(num.clone()),
        FieldValue::ScalarList(entries) => Value::Array(
            entries
                .iter()
                .map(|entry| Value::String(entry.value.clone()))
                .collect(),
        ),
        FieldValue::ObjectList(entries) => {
            Value::Array(entries.iter().map(item_to_value).collect())
        }
    }
}
