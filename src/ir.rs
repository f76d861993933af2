// Strongly-typed IR shared by inference and the renderers. No serde_json::Value here.

/// Shape of one JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaNode {
    Null,
    String,
    Number { is_integer: bool },
    Boolean,
    Undefined,                  // absent, not null
    Array(Box<SchemaNode>),     // element shape
    Object(Vec<Field>),         // input key order, never sorted
    Union(Vec<SchemaNode>),     // only built by the union array mode or by hand
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub node: SchemaNode,
}

impl SchemaNode {
    pub fn integer() -> Self {
        Self::Number { is_integer: true }
    }
    pub fn float() -> Self {
        Self::Number { is_integer: false }
    }
    pub fn array_of(element: SchemaNode) -> Self {
        Self::Array(Box::new(element))
    }

    /// Short label for the node's kind, e.g. for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String => "string",
            Self::Number { .. } => "number",
            Self::Boolean => "boolean",
            Self::Undefined => "undefined",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Union(_) => "union",
            Self::Unknown => "unknown",
        }
    }
}

impl Field {
    pub fn new(name: impl Into<String>, node: SchemaNode) -> Self {
        Self { name: name.into(), node }
    }
}
