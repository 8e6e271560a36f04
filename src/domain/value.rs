use indexmap::IndexMap;
use serde_json::Number;
use uuid::Uuid;

/// Surrogate identity for items and list entries.
///
/// Ids exist only inside an editing session: they are assigned when a
/// collection is seeded from a JSON value and stripped when it is built back
/// into one. Addressing edits by id instead of position makes a stale
/// address a no-op rather than a corruption of a neighbouring entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// A scalar field holds whatever the caller supplied; the editor never
/// coerces. Number-kind fields start out as empty text and only carry a
/// `Number` when the seeded document (or an edit) provides one.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Text(String),
    Number(Number),
}

impl ScalarValue {
    pub fn empty() -> Self {
        ScalarValue::Text(String::new())
    }

    pub fn display(&self) -> String {
        match self {
            ScalarValue::Text(text) => text.clone(),
            ScalarValue::Number(num) => num.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ScalarValue::Text(text) if text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarEntry {
    pub id: EntryId,
    pub value: String,
}

impl ScalarEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectEntry {
    pub id: EntryId,
    pub fields: IndexMap<String, FieldValue>,
}

impl ObjectEntry {
    pub fn new(fields: IndexMap<String, FieldValue>) -> Self {
        Self {
            id: EntryId::new(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Scalar(ScalarValue),
    ScalarList(Vec<ScalarEntry>),
    ObjectList(Vec<ObjectEntry>),
}

impl FieldValue {
    pub fn is_list(&self) -> bool {
        matches!(self, FieldValue::ScalarList(_) | FieldValue::ObjectList(_))
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            FieldValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn list_len(&self) -> Option<usize> {
        match self {
            FieldValue::ScalarList(entries) => Some(entries.len()),
            FieldValue::ObjectList(entries) => Some(entries.len()),
            FieldValue::Scalar(_) => None,
        }
    }
}

/// The ordered sequence of records exchanged with the caller on every edit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    pub items: Vec<ObjectEntry>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ObjectEntry> {
        self.items.get(index)
    }

    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}
