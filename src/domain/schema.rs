use indexmap::IndexMap;

/// Closed set of field shapes the editor understands.
///
/// `ObjectList` carries the schema of its entries, which makes the model
/// recursive: an object entry may itself contain scalar lists or further
/// object lists.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    ScalarList,
    ObjectList(ItemSchema),
}

impl FieldKind {
    pub fn is_list(&self) -> bool {
        matches!(self, FieldKind::ScalarList | FieldKind::ObjectList(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub kind: FieldKind,
}

/// Ordered description of one record shape. Field order is the insertion
/// order of the source document and drives both display order and the order
/// in which default values are constructed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemSchema {
    pub fields: IndexMap<String, FieldSchema>,
}

impl ItemSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldSchema)> {
        self.fields.iter()
    }
}
