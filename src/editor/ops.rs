use indexmap::IndexMap;

use crate::domain::{Collection, FieldKind, FieldValue, ItemSchema, ScalarEntry};

use super::defaults::{default_entry, default_item};
use super::path::{ListPath, PathStep};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("item index {0} is out of bounds")]
    ItemOutOfBounds(usize),
    #[error("no item with the requested id")]
    UnknownItem,
    #[error("field '{0}' is not defined by the schema")]
    UnknownField(String),
    #[error("field '{field}' is not {expected}")]
    KindMismatch {
        field: String,
        expected: &'static str,
    },
    #[error("entry index {index} is out of bounds for field '{field}'")]
    EntryOutOfBounds { field: String, index: usize },
    #[error("no entry with the requested id in field '{0}'")]
    UnknownEntry(String),
}

/// One edit of a list field, applied at any depth through [`edit_list`].
#[derive(Debug, Clone)]
pub enum ListOp {
    Append,
    Remove {
        entry: usize,
    },
    /// Wholesale replacement of one scalar entry.
    SetEntry {
        entry: usize,
        value: String,
    },
    /// Shallow merge into one object entry; fields absent from the patch are
    /// preserved.
    PatchEntry {
        entry: usize,
        patch: IndexMap<String, FieldValue>,
    },
}

/// Every operation in this module returns a new collection; the input value
/// is left untouched. Siblings off the edit path keep their entry ids, so
/// identity survives unrelated edits.
pub fn append_item(collection: &Collection, schema: &ItemSchema) -> Collection {
    let mut next = collection.clone();
    next.items.push(default_item(schema));
    next
}

pub fn remove_item(collection: &Collection, index: usize) -> Result<Collection, EditError> {
    if index >= collection.items.len() {
        return Err(EditError::ItemOutOfBounds(index));
    }
    let mut next = collection.clone();
    next.items.remove(index);
    Ok(next)
}

/// Wholesale replacement of a field value on one item. The value must match
/// the field's declared shape; the editor does not coerce.
pub fn set_field(
    collection: &Collection,
    schema: &ItemSchema,
    item: usize,
    field: &str,
    value: FieldValue,
) -> Result<Collection, EditError> {
    check_kind(schema, field, &value)?;
    let mut next = collection.clone();
    let target = next
        .items
        .get_mut(item)
        .ok_or(EditError::ItemOutOfBounds(item))?;
    target.fields.insert(field.to_string(), value);
    Ok(next)
}

/// Shallow merge of a field patch into one item; used by custom renderers,
/// whose edits arrive as replacement field sets.
pub fn merge_item(
    collection: &Collection,
    schema: &ItemSchema,
    item: usize,
    patch: IndexMap<String, FieldValue>,
) -> Result<Collection, EditError> {
    for (name, value) in &patch {
        check_kind(schema, name, value)?;
    }
    let mut next = collection.clone();
    let target = next
        .items
        .get_mut(item)
        .ok_or(EditError::ItemOutOfBounds(item))?;
    for (name, value) in patch {
        target.fields.insert(name, value);
    }
    Ok(next)
}

/// Apply one list edit at the addressed path. This is the recursive core:
/// the flat helpers below are one-step paths, and deeper nesting reuses the
/// same walk.
pub fn edit_list(
    collection: &Collection,
    schema: &ItemSchema,
    path: &ListPath,
    op: ListOp,
) -> Result<Collection, EditError> {
    let mut next = collection.clone();
    let item = next
        .items
        .get_mut(path.item)
        .ok_or(EditError::ItemOutOfBounds(path.item))?;
    let (fields, owner_schema) = descend(&mut item.fields, schema, &path.steps)?;

    let field_schema = owner_schema
        .field(&path.field)
        .ok_or_else(|| EditError::UnknownField(path.field.clone()))?;
    let value = fields
        .get_mut(&path.field)
        .ok_or_else(|| EditError::UnknownField(path.field.clone()))?;

    match op {
        ListOp::Append => match (&field_schema.kind, value) {
            (FieldKind::ScalarList, FieldValue::ScalarList(entries)) => {
                entries.push(ScalarEntry::new(""));
            }
            (FieldKind::ObjectList(nested), FieldValue::ObjectList(entries)) => {
                entries.push(default_entry(nested));
            }
            _ => {
                return Err(EditError::KindMismatch {
                    field: path.field.clone(),
                    expected: "a list",
                });
            }
        },
        ListOp::Remove { entry } => match value {
            FieldValue::ScalarList(entries) => {
                bounds_check(&path.field, entries.len(), entry)?;
                entries.remove(entry);
            }
            FieldValue::ObjectList(entries) => {
                bounds_check(&path.field, entries.len(), entry)?;
                entries.remove(entry);
            }
            FieldValue::Scalar(_) => {
                return Err(EditError::KindMismatch {
                    field: path.field.clone(),
                    expected: "a list",
                });
            }
        },
        ListOp::SetEntry { entry, value: text } => match value {
            FieldValue::ScalarList(entries) => {
                bounds_check(&path.field, entries.len(), entry)?;
                entries[entry].value = text;
            }
            _ => {
                return Err(EditError::KindMismatch {
                    field: path.field.clone(),
                    expected: "a scalar list",
                });
            }
        },
        ListOp::PatchEntry { entry, patch } => match (&field_schema.kind, value) {
            (FieldKind::ObjectList(nested), FieldValue::ObjectList(entries)) => {
                bounds_check(&path.field, entries.len(), entry)?;
                for (name, value) in &patch {
                    check_kind(nested, name, value)?;
                }
                let target = &mut entries[entry].fields;
                for (name, value) in patch {
                    target.insert(name, value);
                }
            }
            _ => {
                return Err(EditError::KindMismatch {
                    field: path.field.clone(),
                    expected: "an object list",
                });
            }
        },
    }

    Ok(next)
}

pub fn append_entry(
    collection: &Collection,
    schema: &ItemSchema,
    item: usize,
    field: &str,
) -> Result<Collection, EditError> {
    edit_list(collection, schema, &ListPath::top(item, field), ListOp::Append)
}

pub fn remove_entry(
    collection: &Collection,
    schema: &ItemSchema,
    item: usize,
    field: &str,
    entry: usize,
) -> Result<Collection, EditError> {
    edit_list(
        collection,
        schema,
        &ListPath::top(item, field),
        ListOp::Remove { entry },
    )
}

pub fn set_entry(
    collection: &Collection,
    schema: &ItemSchema,
    item: usize,
    field: &str,
    entry: usize,
    value: impl Into<String>,
) -> Result<Collection, EditError> {
    edit_list(
        collection,
        schema,
        &ListPath::top(item, field),
        ListOp::SetEntry {
            entry,
            value: value.into(),
        },
    )
}

pub fn patch_entry(
    collection: &Collection,
    schema: &ItemSchema,
    item: usize,
    field: &str,
    entry: usize,
    patch: IndexMap<String, FieldValue>,
) -> Result<Collection, EditError> {
    edit_list(
        collection,
        schema,
        &ListPath::top(item, field),
        ListOp::PatchEntry { entry, patch },
    )
}

fn descend<'a>(
    fields: &'a mut IndexMap<String, FieldValue>,
    schema: &'a ItemSchema,
    steps: &[PathStep],
) -> Result<(&'a mut IndexMap<String, FieldValue>, &'a ItemSchema), EditError> {
    let mut fields = fields;
    let mut schema = schema;
    for step in steps {
        let field_schema = schema
            .field(&step.field)
            .ok_or_else(|| EditError::UnknownField(step.field.clone()))?;
        let FieldKind::ObjectList(nested) = &field_schema.kind else {
            return Err(EditError::KindMismatch {
                field: step.field.clone(),
                expected: "an object list",
            });
        };
        let value = fields
            .get_mut(&step.field)
            .ok_or_else(|| EditError::UnknownField(step.field.clone()))?;
        let FieldValue::ObjectList(entries) = value else {
            return Err(EditError::KindMismatch {
                field: step.field.clone(),
                expected: "an object list",
            });
        };
        let entry = entries
            .get_mut(step.entry)
            .ok_or_else(|| EditError::EntryOutOfBounds {
                field: step.field.clone(),
                index: step.entry,
            })?;
        fields = &mut entry.fields;
        schema = nested;
    }
    Ok((fields, schema))
}

fn bounds_check(field: &str, len: usize, index: usize) -> Result<(), EditError> {
    if index >= len {
        return Err(EditError::EntryOutOfBounds {
            field: field.to_string(),
            index,
        });
    }
    Ok(())
}

fn check_kind(schema: &ItemSchema, field: &str, value: &FieldValue) -> Result<(), EditError> {
    let field_schema = schema
        .field(field)
        .ok_or_else(|| EditError::UnknownField(field.to_string()))?;
    let (matches, expected) = match &field_schema.kind {
        FieldKind::Text | FieldKind::Textarea | FieldKind::Number => {
            (matches!(value, FieldValue::Scalar(_)), "a scalar")
        }
        FieldKind::ScalarList => (matches!(value, FieldValue::ScalarList(_)), "a scalar list"),
        FieldKind::ObjectList(_) => (matches!(value, FieldValue::ObjectList(_)), "an object list"),
    };
    if matches {
        Ok(())
    } else {
        Err(EditError::KindMismatch {
            field: field.to_string(),
            expected,
        })
    }
}
