//! Alternate target: a JSON Schema (draft 2020-12 vocabulary) for the same tree.

use serde_json::{json, Map, Value};

use crate::ir::{Field, SchemaNode};

// ————————————————————————————————————————————————————————————————————————————
// JSON SCHEMA CG
// ————————————————————————————————————————————————————————————————————————————

pub fn to_json_schema(node: &SchemaNode) -> Value {
    match node {
        SchemaNode::Null => json!({ "type": "null" }),
        SchemaNode::String => json!({ "type": "string" }),
        SchemaNode::Number { is_integer: true } => json!({ "type": "integer" }),
        SchemaNode::Number { is_integer: false } => json!({ "type": "number" }),
        SchemaNode::Boolean => json!({ "type": "boolean" }),
        // nothing validates against an absent value
        SchemaNode::Undefined => Value::Bool(false),
        SchemaNode::Array(element) => json!({
            "type": "array",
            "items": to_json_schema(element),
        }),
        SchemaNode::Object(fields) => object_schema(fields),
        SchemaNode::Union(options) => json!({
            "oneOf": options.iter().map(to_json_schema).collect::<Vec<_>>(),
        }),
        SchemaNode::Unknown => json!({}),
    }
}

fn object_schema(fields: &[Field]) -> Value {
    let mut props = Map::new();
    let mut required = Vec::new();
    for field in fields {
        props.insert(field.name.clone(), to_json_schema(&field.node));
        if field.node != SchemaNode::Undefined {
            required.push(Value::from(field.name.clone()));
        }
    }
    let mut o = json!({ "type": "object", "properties": props });
    if !required.is_empty() {
        o["required"] = Value::Array(required);
    }
    o
}
