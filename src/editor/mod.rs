mod actions;
mod convert;
mod defaults;
mod ops;
mod path;
mod reducers;

pub use actions::EditorCommand;
pub use convert::{collection_from_value, collection_to_value};
pub use defaults::{default_entry, default_item, default_value};
pub use ops::{
    EditError, ListOp, append_entry, append_item, edit_list, merge_item, patch_entry,
    remove_entry, remove_item, set_entry, set_field,
};
pub use path::{EntryStep, FieldAddress, ListPath, PathStep};
pub use reducers::apply_command;
