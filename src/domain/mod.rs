mod parser;
mod schema;
mod value;

pub use parser::parse_item_schema;
pub use schema::{FieldKind, FieldSchema, ItemSchema};
pub use value::{Collection, EntryId, FieldValue, ObjectEntry, ScalarEntry, ScalarValue};
