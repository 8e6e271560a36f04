use indexmap::IndexMap;

use crate::domain::{FieldValue, ObjectEntry};

/// One line produced by a custom item renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    pub label: String,
    pub text: String,
    pub editable: bool,
}

impl RenderedLine {
    pub fn editable(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            editable: true,
        }
    }

    pub fn readonly(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            editable: false,
        }
    }
}

/// Caller-supplied replacement for schema-driven rendering of one item.
///
/// When a renderer is installed it fully replaces the schema-inferred rows
/// for every item, but its edits still flow through the editor: an edited
/// line is translated into a field patch applied with the editor's merge
/// semantics, and removal uses the editor's regular remove operation. Simple
/// flat lists can bypass the schema machinery this way without giving up
/// the state-transition contract.
pub trait ItemRenderer {
    fn lines(&self, item: &ObjectEntry, index: usize) -> Vec<RenderedLine>;

    /// Translate an edit of line `line` into a patch of the item's fields.
    /// Returning `None` drops the edit.
    fn apply(
        &self,
        item: &ObjectEntry,
        line: usize,
        input: &str,
    ) -> Option<IndexMap<String, FieldValue>>;
}
