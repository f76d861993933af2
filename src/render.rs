//! Render a `SchemaNode` tree as Zod source.
//!
//! Output is deterministic: the same tree always yields the same text. Objects
//! are the only construct that spans lines; each field sits one indent level
//! deeper than its object, and the closing `})` returns to the object's level.
//! Arrays and unions render their children at their own level.
use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{Field, SchemaNode};

const INDENT: &str = "  ";

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap());

pub fn render(node: &SchemaNode, indent_level: usize) -> String {
    match node {
        SchemaNode::Null => "z.null()".to_owned(),
        SchemaNode::String => "z.string()".to_owned(),
        SchemaNode::Number { is_integer: true } => "z.number().int()".to_owned(),
        SchemaNode::Number { is_integer: false } => "z.number()".to_owned(),
        SchemaNode::Boolean => "z.boolean()".to_owned(),
        SchemaNode::Undefined => "z.undefined()".to_owned(),
        SchemaNode::Array(element) => format!("z.array({})", render(element, indent_level)),
        SchemaNode::Union(options) => {
            let options = options
                .iter()
                .map(|option| render(option, indent_level))
                .collect::<Vec<_>>()
                .join(", ");
            format!("z.union([{options}])")
        }
        SchemaNode::Object(fields) => render_object(fields, indent_level),
        SchemaNode::Unknown => "z.unknown()".to_owned(),
    }
}

fn render_object(fields: &[Field], indent_level: usize) -> String {
    if fields.is_empty() {
        return "z.object({})".to_owned();
    }
    let indent = INDENT.repeat(indent_level);
    let nested_indent = INDENT.repeat(indent_level + 1);
    let shape = fields
        .iter()
        .map(|field| {
            let value = render(&field.node, indent_level + 1);
            format!("{nested_indent}{}: {value}", object_key(&field.name))
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!("z.object({{\n{shape}\n{indent}}})")
}

/// Bare JS identifier (ASCII only), usable unquoted as an object key.
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

/// Key as it appears in an object literal: bare when it can be, otherwise a
/// double-quoted literal with JSON escaping (a valid JS string literal too).
pub fn object_key(name: &str) -> Cow<'_, str> {
    if is_identifier(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(serde_json::Value::from(name).to_string())
    }
}
