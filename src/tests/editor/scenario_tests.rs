use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{
    Collection, EditorCommand, FieldAddress, FieldValue, ItemSchema, ScalarValue,
    apply_command, collection_to_value, parse_item_schema,
};

fn goal_schema() -> ItemSchema {
    parse_item_schema(&json!({
        "title": {"type": "text", "placeholder": "Goal title"},
        "desired_outcomes": {"type": "textarea"},
        "needs": {"type": "array", "items": {"type": "string"}},
        "variables": {
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "name": {"type": "text", "placeholder": "Variable name"},
                    "value": {"type": "text", "placeholder": "Variable value"}
                }
            }
        }
    }))
    .expect("schema parses")
}

fn apply(collection: Collection, schema: &ItemSchema, command: EditorCommand) -> Collection {
    apply_command(&collection, schema, &command).expect("command applies")
}

fn scalar_patch(field: &str, text: &str) -> IndexMap<String, FieldValue> {
    let mut patch = IndexMap::new();
    patch.insert(
        field.to_string(),
        FieldValue::Scalar(ScalarValue::Text(text.to_string())),
    );
    patch
}

/// Authoring a prompt goal from scratch, the way the surrounding console
/// drives the editor: every interaction is one command, every command yields
/// the full replacement collection.
#[test]
fn authoring_a_goal_from_an_empty_collection() {
    let schema = goal_schema();
    let mut collection = Collection::new();

    collection = apply(collection, &schema, EditorCommand::AppendItem);
    let item = collection.items[0].id;

    collection = apply(
        collection,
        &schema,
        EditorCommand::SetScalar {
            item,
            field: "title".to_string(),
            value: ScalarValue::Text("Summarize tickets".to_string()),
        },
    );
    collection = apply(
        collection,
        &schema,
        EditorCommand::SetScalar {
            item,
            field: "desired_outcomes".to_string(),
            value: ScalarValue::Text("A two-line summary\nwith owner and status".to_string()),
        },
    );

    let needs = FieldAddress::top(item, "needs");
    collection = apply(collection, &schema, EditorCommand::AppendEntry { list: needs.clone() });
    let first_need = match collection.items[0].field("needs") {
        Some(FieldValue::ScalarList(entries)) => entries[0].id,
        other => panic!("expected scalar list, got {other:?}"),
    };
    collection = apply(
        collection,
        &schema,
        EditorCommand::SetEntry {
            list: needs.clone(),
            entry: first_need,
            value: "ticket body".to_string(),
        },
    );
    collection = apply(collection, &schema, EditorCommand::AppendEntry { list: needs.clone() });
    let second_need = match collection.items[0].field("needs") {
        Some(FieldValue::ScalarList(entries)) => entries[1].id,
        other => panic!("expected scalar list, got {other:?}"),
    };
    collection = apply(
        collection,
        &schema,
        EditorCommand::SetEntry {
            list: needs,
            entry: second_need,
            value: "ticket status".to_string(),
        },
    );

    let variables = FieldAddress::top(item, "variables");
    collection = apply(
        collection,
        &schema,
        EditorCommand::AppendEntry {
            list: variables.clone(),
        },
    );
    let variable = match collection.items[0].field("variables") {
        Some(FieldValue::ObjectList(entries)) => entries[0].id,
        other => panic!("expected object list, got {other:?}"),
    };
    collection = apply(
        collection,
        &schema,
        EditorCommand::PatchEntry {
            list: variables.clone(),
            entry: variable,
            patch: scalar_patch("name", "tone"),
        },
    );
    collection = apply(
        collection,
        &schema,
        EditorCommand::PatchEntry {
            list: variables,
            entry: variable,
            patch: scalar_patch("value", "concise"),
        },
    );

    assert_eq!(
        collection_to_value(&collection),
        json!([{
            "title": "Summarize tickets",
            "desired_outcomes": "A two-line summary\nwith owner and status",
            "needs": ["ticket body", "ticket status"],
            "variables": [{"name": "tone", "value": "concise"}]
        }])
    );
}
