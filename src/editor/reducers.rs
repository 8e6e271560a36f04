use crate::domain::{Collection, EntryId, FieldValue, ItemSchema};

use super::actions::EditorCommand;
use super::ops::{self, EditError, ListOp};
use super::path::{FieldAddress, ListPath, PathStep};

/// Apply one command, returning the replacement collection.
///
/// Commands address items and entries by id; a command whose address no
/// longer resolves (the entry was removed by an earlier interaction) is
/// logged and dropped rather than applied to whatever shifted into its
/// place.
pub fn apply_command(
    collection: &Collection,
    schema: &ItemSchema,
    command: &EditorCommand,
) -> Option<Collection> {
    match run(collection, schema, command) {
        Ok(next) => Some(next),
        Err(err) => {
            tracing::debug!(%err, "dropping edit that no longer resolves");
            None
        }
    }
}

fn run(
    collection: &Collection,
    schema: &ItemSchema,
    command: &EditorCommand,
) -> Result<Collection, EditError> {
    match command {
        EditorCommand::AppendItem => Ok(ops::append_item(collection, schema)),
        EditorCommand::RemoveItem { item } => {
            let index = resolve_item(collection, *item)?;
            ops::remove_item(collection, index)
        }
        EditorCommand::MergeItem { item, patch } => {
            let index = resolve_item(collection, *item)?;
            ops::merge_item(collection, schema, index, patch.clone())
        }
        EditorCommand::SetScalar { item, field, value } => {
            let index = resolve_item(collection, *item)?;
            ops::set_field(
                collection,
                schema,
                index,
                field,
                FieldValue::Scalar(value.clone()),
            )
        }
        EditorCommand::AppendEntry { list } => {
            let (path, _) = resolve_list(collection, list)?;
            ops::edit_list(collection, schema, &path, ListOp::Append)
        }
        EditorCommand::RemoveEntry { list, entry } => {
            let (path, value) = resolve_list(collection, list)?;
            let position = entry_position(value, *entry, &list.field)?;
            ops::edit_list(collection, schema, &path, ListOp::Remove { entry: position })
        }
        EditorCommand::SetEntry { list, entry, value } => {
            let (path, list_value) = resolve_list(collection, list)?;
            let position = entry_position(list_value, *entry, &list.field)?;
            ops::edit_list(
                collection,
                schema,
                &path,
                ListOp::SetEntry {
                    entry: position,
                    value: value.clone(),
                },
            )
        }
        EditorCommand::PatchEntry { list, entry, patch } => {
            let (path, value) = resolve_list(collection, list)?;
            let position = entry_position(value, *entry, &list.field)?;
            ops::edit_list(
                collection,
                schema,
                &path,
                ListOp::PatchEntry {
                    entry: position,
                    patch: patch.clone(),
                },
            )
        }
    }
}

fn resolve_item(collection: &Collection, id: EntryId) -> Result<usize, EditError> {
    collection.position_of(id).ok_or(EditError::UnknownItem)
}

/// Resolve an id-based address to positions, returning the addressed list
/// value alongside so entry ids can be located within it.
fn resolve_list<'a>(
    collection: &'a Collection,
    address: &FieldAddress,
) -> Result<(ListPath, &'a FieldValue), EditError> {
    let item_index = resolve_item(collection, address.item)?;
    let mut fields = &collection.items[item_index].fields;
    let mut steps = Vec::with_capacity(address.steps.len());

    for step in &address.steps {
        let value = fields
            .get(&step.field)
            .ok_or_else(|| EditError::UnknownField(step.field.clone()))?;
        let FieldValue::ObjectList(entries) = value else {
            return Err(EditError::KindMismatch {
                field: step.field.clone(),
                expected: "an object list",
            });
        };
        let position = entries
            .iter()
            .position(|entry| entry.id == step.entry)
            .ok_or_else(|| EditError::UnknownEntry(step.field.clone()))?;
        steps.push(PathStep {
            field: step.field.clone(),
            entry: position,
        });
        fields = &entries[position].fields;
    }

    let value = fields
        .get(&address.field)
        .ok_or_else(|| EditError::UnknownField(address.field.clone()))?;
    Ok((
        ListPath {
            item: item_index,
            steps,
            field: address.field.clone(),
        },
        value,
    ))
}

fn entry_position(value: &FieldValue, entry: EntryId, field: &str) -> Result<usize, EditError> {
    let position = match value {
        FieldValue::ScalarList(entries) => entries.iter().position(|e| e.id == entry),
        FieldValue::ObjectList(entries) => entries.iter().position(|e| e.id == entry),
        FieldValue::Scalar(_) => None,
    };
    position.ok_or_else(|| EditError::UnknownEntry(field.to_string()))
}
