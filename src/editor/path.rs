use crate::domain::EntryId;

/// One positional descent: into entry `entry` of object-list field `field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub field: String,
    pub entry: usize,
}

/// Positional address of a list field: the owning item, descent steps
/// through object-list entries, then the list field name on the final
/// object. An empty `steps` addresses a list directly on the item, the
/// shape the original two-level editor supported; deeper paths fall out of
/// the same walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPath {
    pub item: usize,
    pub steps: Vec<PathStep>,
    pub field: String,
}

impl ListPath {
    pub fn top(item: usize, field: impl Into<String>) -> Self {
        Self {
            item,
            steps: Vec::new(),
            field: field.into(),
        }
    }
}

/// Identifier-based counterpart of [`PathStep`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryStep {
    pub field: String,
    pub entry: EntryId,
}

/// Identifier-based address of a list field. Commands carry these; they are
/// resolved to a [`ListPath`] when the command is applied, so an address
/// captured before a removal simply stops resolving instead of landing on a
/// shifted neighbour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAddress {
    pub item: EntryId,
    pub steps: Vec<EntryStep>,
    pub field: String,
}

impl FieldAddress {
    pub fn top(item: EntryId, field: impl Into<String>) -> Self {
        Self {
            item,
            steps: Vec::new(),
            field: field.into(),
        }
    }
}
