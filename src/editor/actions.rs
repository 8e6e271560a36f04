use indexmap::IndexMap;

use crate::domain::{EntryId, FieldValue, ScalarValue};

use super::path::FieldAddress;

/// Edits dispatched by the UI. Items and entries are addressed by their
/// stable ids; positions are resolved when the command is applied.
#[derive(Debug, Clone)]
pub enum EditorCommand {
    AppendItem,
    RemoveItem {
        item: EntryId,
    },
    /// Shallow merge of a replacement field set into one item; the route
    /// custom renderers update through.
    MergeItem {
        item: EntryId,
        patch: IndexMap<String, FieldValue>,
    },
    SetScalar {
        item: EntryId,
        field: String,
        value: ScalarValue,
    },
    AppendEntry {
        list: FieldAddress,
    },
    RemoveEntry {
        list: FieldAddress,
        entry: EntryId,
    },
    SetEntry {
        list: FieldAddress,
        entry: EntryId,
        value: String,
    },
    PatchEntry {
        list: FieldAddress,
        entry: EntryId,
        patch: IndexMap<String, FieldValue>,
    },
}
