use crate::domain::{
    Collection, EntryId, FieldKind, FieldSchema, FieldValue, ItemSchema, ObjectEntry,
};
use crate::editor::{EntryStep, FieldAddress};

use super::custom::ItemRenderer;

/// Where typing into a row routes.
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    ItemScalar {
        field: String,
        numeric: bool,
    },
    EntryValue {
        list: FieldAddress,
        entry: EntryId,
    },
    EntryField {
        list: FieldAddress,
        entry: EntryId,
        field: String,
        numeric: bool,
    },
    CustomLine {
        line: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    ItemHeader,
    ListHeader,
    EntryHeader,
    Append,
    Static,
    Input(EditTarget),
}

/// One focusable line of the editor. Rows carry the id-based addresses their
/// interactions dispatch with; identifier-to-index resolution happens when
/// the resulting command is applied, never here.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub item: EntryId,
    pub depth: usize,
    pub label: String,
    pub text: String,
    pub placeholder: Option<String>,
    pub multiline: bool,
    pub kind: RowKind,
    /// Innermost list this row belongs to; the append target.
    pub list_scope: Option<FieldAddress>,
    /// Innermost list entry containing this row; the remove target.
    pub entry_scope: Option<(FieldAddress, EntryId)>,
}

impl Row {
    pub fn is_editable(&self) -> bool {
        matches!(self.kind, RowKind::Input(_))
    }
}

/// Flatten the collection into its rendered rows. A custom renderer, when
/// present, replaces the schema-driven rows of every item; the item header
/// stays either way so items remain addressable for removal.
pub fn build_rows(
    collection: &Collection,
    schema: &ItemSchema,
    custom: Option<&dyn ItemRenderer>,
) -> Vec<Row> {
    let mut rows = Vec::new();
    for (index, item) in collection.items.iter().enumerate() {
        rows.push(Row {
            item: item.id,
            depth: 0,
            label: format!("Item {}", index + 1),
            text: String::new(),
            placeholder: None,
            multiline: false,
            kind: RowKind::ItemHeader,
            list_scope: None,
            entry_scope: None,
        });
        match custom {
            Some(renderer) => push_custom_rows(&mut rows, renderer, item, index),
            None => push_object_rows(&mut rows, item, schema, item.id, &[], 1),
        }
    }
    rows
}

fn push_custom_rows(
    rows: &mut Vec<Row>,
    renderer: &dyn ItemRenderer,
    item: &ObjectEntry,
    index: usize,
) {
    for (line, rendered) in renderer.lines(item, index).into_iter().enumerate() {
        let kind = if rendered.editable {
            RowKind::Input(EditTarget::CustomLine { line })
        } else {
            RowKind::Static
        };
        rows.push(Row {
            item: item.id,
            depth: 1,
            label: rendered.label,
            text: rendered.text,
            placeholder: None,
            multiline: false,
            kind,
            list_scope: None,
            entry_scope: None,
        });
    }
}

fn push_object_rows(
    rows: &mut Vec<Row>,
    object: &ObjectEntry,
    schema: &ItemSchema,
    item: EntryId,
    steps: &[EntryStep],
    depth: usize,
) {
    let (outer_list, outer_entry) = scopes(item, steps);

    for (name, field) in schema.iter() {
        let Some(value) = object.field(name) else {
            continue;
        };
        match (&field.kind, value) {
            (FieldKind::Text | FieldKind::Textarea | FieldKind::Number, FieldValue::Scalar(scalar)) => {
                let numeric = field.kind == FieldKind::Number;
                let target = match &outer_entry {
                    None => EditTarget::ItemScalar {
                        field: name.clone(),
                        numeric,
                    },
                    Some((list, entry)) => EditTarget::EntryField {
                        list: list.clone(),
                        entry: *entry,
                        field: name.clone(),
                        numeric,
                    },
                };
                rows.push(Row {
                    item,
                    depth,
                    label: field.label.clone(),
                    text: scalar.display(),
                    placeholder: field.placeholder.clone(),
                    multiline: field.kind == FieldKind::Textarea,
                    kind: RowKind::Input(target),
                    list_scope: outer_list.clone(),
                    entry_scope: outer_entry.clone(),
                });
            }
            (FieldKind::ScalarList, FieldValue::ScalarList(entries)) => {
                let list = FieldAddress {
                    item,
                    steps: steps.to_vec(),
                    field: name.clone(),
                };
                rows.push(list_header(item, depth, field, entries.len(), &list, &outer_entry));
                for (position, entry) in entries.iter().enumerate() {
                    rows.push(Row {
                        item,
                        depth: depth + 1,
                        label: format!("#{}", position + 1),
                        text: entry.value.clone(),
                        placeholder: field.placeholder.clone(),
                        multiline: false,
                        kind: RowKind::Input(EditTarget::EntryValue {
                            list: list.clone(),
                            entry: entry.id,
                        }),
                        list_scope: Some(list.clone()),
                        entry_scope: Some((list.clone(), entry.id)),
                    });
                }
                rows.push(append_control(item, depth + 1, field, &list, &outer_entry));
            }
            (FieldKind::ObjectList(nested), FieldValue::ObjectList(entries)) => {
                let list = FieldAddress {
                    item,
                    steps: steps.to_vec(),
                    field: name.clone(),
                };
                rows.push(list_header(item, depth, field, entries.len(), &list, &outer_entry));
                for (position, entry) in entries.iter().enumerate() {
                    rows.push(Row {
                        item,
                        depth: depth + 1,
                        label: format!("#{}", position + 1),
                        text: String::new(),
                        placeholder: None,
                        multiline: false,
                        kind: RowKind::EntryHeader,
                        list_scope: Some(list.clone()),
                        entry_scope: Some((list.clone(), entry.id)),
                    });
                    let mut entry_steps = steps.to_vec();
                    entry_steps.push(EntryStep {
                        field: name.clone(),
                        entry: entry.id,
                    });
                    push_object_rows(rows, entry, nested, item, &entry_steps, depth + 2);
                }
                rows.push(append_control(item, depth + 1, field, &list, &outer_entry));
            }
            // Shapes disagreeing with the schema are normalized away at the
            // seeding boundary; anything left is skipped.
            _ => {}
        }
    }
}

fn scopes(
    item: EntryId,
    steps: &[EntryStep],
) -> (Option<FieldAddress>, Option<(FieldAddress, EntryId)>) {
    match steps.split_last() {
        None => (None, None),
        Some((last, init)) => {
            let list = FieldAddress {
                item,
                steps: init.to_vec(),
                field: last.field.clone(),
            };
            (Some(list.clone()), Some((list, last.entry)))
        }
    }
}

fn list_header(
    item: EntryId,
    depth: usize,
    field: &FieldSchema,
    len: usize,
    list: &FieldAddress,
    outer_entry: &Option<(FieldAddress, EntryId)>,
) -> Row {
    Row {
        item,
        depth,
        label: field.label.clone(),
        text: format!("({len})"),
        placeholder: None,
        multiline: false,
        kind: RowKind::ListHeader,
        list_scope: Some(list.clone()),
        entry_scope: outer_entry.clone(),
    }
}

fn append_control(
    item: EntryId,
    depth: usize,
    field: &FieldSchema,
    list: &FieldAddress,
    outer_entry: &Option<(FieldAddress, EntryId)>,
) -> Row {
    Row {
        item,
        depth,
        label: format!("+ Add to {}", field.label),
        text: String::new(),
        placeholder: None,
        multiline: false,
        kind: RowKind::Append,
        list_scope: Some(list.clone()),
        entry_scope: outer_entry.clone(),
    }
}
