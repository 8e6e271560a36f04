#![deny(rust_2018_idioms)]

mod domain;
mod editor;
mod io;
mod render;
mod runtime;

pub use domain::{
    Collection, EntryId, FieldKind, FieldSchema, FieldValue, ItemSchema, ObjectEntry,
    ScalarEntry, ScalarValue, parse_item_schema,
};
pub use editor::{
    EditError, EditorCommand, EntryStep, FieldAddress, ListOp, ListPath, PathStep,
    append_entry, append_item, apply_command, collection_from_value, collection_to_value,
    default_entry, default_item, default_value, edit_list, merge_item, patch_entry,
    remove_entry, remove_item, set_entry, set_field,
};
pub use io::{DocumentFormat, OutputDestination, OutputOptions, emit, parse_document_str};
pub use render::{EditTarget, ItemRenderer, RenderedLine, Row, RowKind, build_rows};
pub use runtime::{ListUI, UiOptions};

pub mod prelude {
    pub use super::{ItemRenderer, ListUI, RenderedLine, UiOptions};
}

#[cfg(test)]
mod tests;
