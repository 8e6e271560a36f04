use indexmap::IndexMap;

use crate::domain::{FieldKind, FieldValue, ItemSchema, ObjectEntry, ScalarValue};

/// Type-appropriate empty value for one field.
pub fn default_value(kind: &FieldKind) -> FieldValue {
    match kind {
        FieldKind::Text | FieldKind::Textarea | FieldKind::Number => {
            FieldValue::Scalar(ScalarValue::empty())
        }
        FieldKind::ScalarList => FieldValue::ScalarList(Vec::new()),
        FieldKind::ObjectList(_) => FieldValue::ObjectList(Vec::new()),
    }
}

/// A fresh item with every schema field present, in schema order.
pub fn default_item(schema: &ItemSchema) -> ObjectEntry {
    let mut fields = IndexMap::with_capacity(schema.len());
    for (name, field) in schema.iter() {
        fields.insert(name.clone(), default_value(&field.kind));
    }
    ObjectEntry::new(fields)
}

/// A fresh entry for an object list; the same rule applied to the nested
/// schema.
pub fn default_entry(schema: &ItemSchema) -> ObjectEntry {
    default_item(schema)
}
