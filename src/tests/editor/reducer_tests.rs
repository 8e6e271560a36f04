use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{
    Collection, EditorCommand, EntryId, FieldAddress, FieldValue, ItemSchema, ScalarValue,
    apply_command, collection_from_value, parse_item_schema,
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
        &json!([
            {"title": "a", "needs": ["x", "y", "z"], "tags": []},
            {"title": "b", "needs": [], "tags": []},
            {"title": "c", "needs": [], "tags": [{"name": "k", "value": "1"}]}
        ]),
        schema,
    )
}

fn title_of(collection: &Collection, index: usize) -> String {
    match collection.items[index].field("title") {
        Some(FieldValue::Scalar(scalar)) => scalar.display(),
        other => panic!("expected scalar title, got {other:?}"),
    }
}

fn need_ids(collection: &Collection, index: usize) -> Vec<EntryId> {
    match collection.items[index].field("needs") {
        Some(FieldValue::ScalarList(entries)) => entries.iter().map(|entry| entry.id).collect(),
        other => panic!("expected scalar list, got {other:?}"),
    }
}

fn need_texts(collection: &Collection, index: usize) -> Vec<String> {
    match collection.items[index].field("needs") {
        Some(FieldValue::ScalarList(entries)) => {
            entries.iter().map(|entry| entry.value.clone()).collect()
        }
        other => panic!("expected scalar list, got {other:?}"),
    }
}

#[test]
fn item_ids_keep_resolving_after_an_earlier_removal() {
    let schema = goal_schema();
    let collection = seeded(&schema);
    let id_b = collection.items[1].id;
    let id_c = collection.items[2].id;

    let collection = apply_command(&collection, &schema, &EditorCommand::RemoveItem { item: id_b })
        .expect("removal applies");
    assert_eq!(collection.len(), 2);

    // "c" shifted to index 1, but its id still addresses it.
    let collection = apply_command(
        &collection,
        &schema,
        &EditorCommand::SetScalar {
            item: id_c,
            field: "title".to_string(),
            value: ScalarValue::Text("edited".to_string()),
        },
    )
    .expect("edit applies");
    assert_eq!(title_of(&collection, 0), "a");
    assert_eq!(title_of(&collection, 1), "edited");
}

#[test]
fn commands_with_stale_ids_are_dropped() {
    let schema = goal_schema();
    let collection = seeded(&schema);
    let id_b = collection.items[1].id;

    let next = apply_command(&collection, &schema, &EditorCommand::RemoveItem { item: id_b })
        .expect("removal applies");
    assert!(
        apply_command(&next, &schema, &EditorCommand::RemoveItem { item: id_b }).is_none(),
        "a second removal through the same id must not land on a neighbour"
    );
    assert_eq!(next.len(), 2);
}

#[test]
fn entry_ids_keep_resolving_after_a_sibling_removal() {
    let schema = goal_schema();
    let collection = seeded(&schema);
    let item = collection.items[0].id;
    let needs = FieldAddress::top(item, "needs");
    let ids = need_ids(&collection, 0);

    let collection = apply_command(
        &collection,
        &schema,
        &EditorCommand::RemoveEntry {
            list: needs.clone(),
            entry: ids[0],
        },
    )
    .expect("removal applies");
    assert_eq!(need_texts(&collection, 0), vec!["y", "z"]);

    let collection = apply_command(
        &collection,
        &schema,
        &EditorCommand::SetEntry {
            list: needs,
            entry: ids[2],
            value: "last".to_string(),
        },
    )
    .expect("edit applies");
    assert_eq!(need_texts(&collection, 0), vec!["y", "last"]);
}

#[test]
fn append_entry_through_an_address_grows_the_right_list() {
    let schema = goal_schema();
    let collection = seeded(&schema);
    let item = collection.items[1].id;

    let collection = apply_command(
        &collection,
        &schema,
        &EditorCommand::AppendEntry {
            list: FieldAddress::top(item, "needs"),
        },
    )
    .expect("append applies");
    assert_eq!(need_texts(&collection, 1), vec![""]);
    assert_eq!(need_texts(&collection, 0), vec!["x", "y", "z"]);
}

#[test]
fn merge_item_patches_only_named_fields() {
    let schema = goal_schema();
    let collection = seeded(&schema);
    let item = collection.items[0].id;

    let mut patch = IndexMap::new();
    patch.insert(
        "title".to_string(),
        FieldValue::Scalar(ScalarValue::Text("merged".to_string())),
    );
    let collection = apply_command(
        &collection,
        &schema,
        &EditorCommand::MergeItem { item, patch },
    )
    .expect("merge applies");

    assert_eq!(title_of(&collection, 0), "merged");
    assert_eq!(need_texts(&collection, 0), vec!["x", "y", "z"]);
}

#[test]
fn nested_entry_patches_resolve_by_id() {
    let schema = goal_schema();
    let collection = seeded(&schema);
    let item = collection.items[2].id;
    let tags = FieldAddress::top(item, "tags");
    let tag_id = match collection.items[2].field("tags") {
        Some(FieldValue::ObjectList(entries)) => entries[0].id,
        other => panic!("expected object list, got {other:?}"),
    };

    let mut patch = IndexMap::new();
    patch.insert(
        "value".to_string(),
        FieldValue::Scalar(ScalarValue::Text("2".to_string())),
    );
    let collection = apply_command(
        &collection,
        &schema,
        &EditorCommand::PatchEntry {
            list: tags,
            entry: tag_id,
            patch,
        },
    )
    .expect("patch applies");

    match collection.items[2].field("tags") {
        Some(FieldValue::ObjectList(entries)) => {
            assert_eq!(
                entries[0].field("name"),
                Some(&FieldValue::Scalar(ScalarValue::Text("k".to_string())))
            );
            assert_eq!(
                entries[0].field("value"),
                Some(&FieldValue::Scalar(ScalarValue::Text("2".to_string())))
            );
        }
        other => panic!("expected object list, got {other:?}"),
    }
}
