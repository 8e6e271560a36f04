use indexmap::IndexMap;
use serde_json::json;

use crate::{
    Collection, EditTarget, FieldValue, ItemRenderer, ItemSchema, ObjectEntry, RenderedLine,
    Row, RowKind, ScalarValue, build_rows, collection_from_value, parse_item_schema,
};

fn goal_schema() -> ItemSchema {
    parse_item_schema(&json!({
        "title": {"type": "text"},
        "needs": {"type": "array", "items": {"type": "string"}},
        "tags": {
            "type": "array",
            "items": {
                "type": "object",
                "properties": {"name": {"type": "text"}, "value": {"type": "text"}}
            }
        }
    }))
    .expect("schema parses")
}

fn seeded(schema: &ItemSchema) -> Collection {
    collection_from_value(
        &json!([{
            "title": "goal",
            "needs": ["x", "y"],
            "tags": [{"name": "a", "value": "1"}]
        }]),
        schema,
    )
}

fn kinds(rows: &[Row]) -> Vec<&'static str> {
    rows.iter()
        .map(|row| match &row.kind {
            RowKind::ItemHeader => "item",
            RowKind::ListHeader => "list",
            RowKind::EntryHeader => "entry",
            RowKind::Append => "append",
            RowKind::Static => "static",
            RowKind::Input(_) => "input",
        })
        .collect()
}

#[test]
fn schema_rows_follow_schema_order() {
    let schema = goal_schema();
    let collection = seeded(&schema);
    let rows = build_rows(&collection, &schema, None);

    assert_eq!(
        kinds(&rows),
        vec![
            "item",   // Item 1
            "input",  // title
            "list",   // needs (2)
            "input",  // #1 x
            "input",  // #2 y
            "append", // + add to needs
            "list",   // tags (1)
            "entry",  // #1
            "input",  // name
            "input",  // value
            "append", // + add to tags
        ]
    );
    assert_eq!(rows[1].label, "Title");
    assert_eq!(rows[1].text, "goal");
    assert_eq!(rows[3].text, "x");
}

#[test]
fn append_rows_carry_their_list_address() {
    let schema = goal_schema();
    let collection = seeded(&schema);
    let rows = build_rows(&collection, &schema, None);

    let append = rows
        .iter()
        .find(|row| matches!(row.kind, RowKind::Append) && row.label.contains("Needs"))
        .expect("needs append row");
    let list = append.list_scope.as_ref().expect("append row has a list");
    assert_eq!(list.field, "needs");
    assert!(list.steps.is_empty());
    assert_eq!(list.item, collection.items[0].id);
}

#[test]
fn nested_field_rows_route_through_entry_patches() {
    let schema = goal_schema();
    let collection = seeded(&schema);
    let rows = build_rows(&collection, &schema, None);

    let name_row = rows
        .iter()
        .find(|row| {
            matches!(
                &row.kind,
                RowKind::Input(EditTarget::EntryField { field, .. }) if field == "name"
            )
        })
        .expect("tag name row");
    let RowKind::Input(EditTarget::EntryField { list, entry, .. }) = &name_row.kind else {
        unreachable!();
    };
    assert_eq!(list.field, "tags");
    let tag_id = match collection.items[0].field("tags") {
        Some(FieldValue::ObjectList(entries)) => entries[0].id,
        other => panic!("expected object list, got {other:?}"),
    };
    assert_eq!(*entry, tag_id);
}

#[test]
fn deep_lists_extend_the_address_steps() {
    let schema = parse_item_schema(&json!({
        "sections": {
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "heading": {"type": "text"},
                    "bullets": {"type": "array", "items": {"type": "string"}}
                }
            }
        }
    }))
    .expect("schema parses");
    let collection = collection_from_value(
        &json!([{"sections": [{"heading": "h", "bullets": ["deep"]}]}]),
        &schema,
    );
    let rows = build_rows(&collection, &schema, None);

    let bullet_row = rows
        .iter()
        .find(|row| matches!(&row.kind, RowKind::Input(EditTarget::EntryValue { .. })))
        .expect("bullet row");
    let RowKind::Input(EditTarget::EntryValue { list, .. }) = &bullet_row.kind else {
        unreachable!();
    };
    assert_eq!(list.field, "bullets");
    assert_eq!(list.steps.len(), 1);
    assert_eq!(list.steps[0].field, "sections");
}

struct TitleOnly;

impl ItemRenderer for TitleOnly {
    fn lines(&self, item: &ObjectEntry, index: usize) -> Vec<RenderedLine> {
        let title = match item.field("title") {
            Some(FieldValue::Scalar(scalar)) => scalar.display(),
            _ => String::new(),
        };
        vec![
            RenderedLine::readonly("Position", format!("{}", index + 1)),
            RenderedLine::editable("Title", title),
        ]
    }

    fn apply(
        &self,
        _item: &ObjectEntry,
        line: usize,
        input: &str,
    ) -> Option<IndexMap<String, FieldValue>> {
        if line != 1 {
            return None;
        }
        let mut patch = IndexMap::new();
        patch.insert(
            "title".to_string(),
            FieldValue::Scalar(ScalarValue::Text(input.to_string())),
        );
        Some(patch)
    }
}

#[test]
fn custom_renderer_replaces_schema_rows() {
    let schema = goal_schema();
    let collection = seeded(&schema);
    let rows = build_rows(&collection, &schema, Some(&TitleOnly));

    assert_eq!(kinds(&rows), vec!["item", "static", "input"]);
    assert_eq!(rows[2].label, "Title");
    assert_eq!(rows[2].text, "goal");
    assert!(matches!(
        rows[2].kind,
        RowKind::Input(EditTarget::CustomLine { line: 1 })
    ));
}
