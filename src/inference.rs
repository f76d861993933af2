//! Single-sample shape inference.
//!
//! Walk one JSON value and build the `SchemaNode` tree describing it. The walk
//! is structural recursion over `serde_json::Value`: every value maps to
//! exactly one node, objects keep their key order (serde_json is built with
//! `preserve_order`), and arrays are typed from their elements according to
//! the configured `ArrayMode`.
//!
//! Nothing here fails. Depth limits are the caller's concern, see
//! [`nesting_depth`].
pub mod arr;
pub mod num;
pub mod obj;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ir::SchemaNode;

// ------------------------------- Policy ---------------------------------- //

/// How an array's element shape is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayMode {
    /// Only the first element is inspected; the rest are assumed to match.
    #[default]
    FirstElement,
    /// Every element is inspected; distinct shapes are kept as a union.
    Union,
}

// ------------------------------ Observe ---------------------------------- //

/// Infer with the default policy (first-element arrays).
pub fn infer(v: &Value) -> SchemaNode {
    Inference::new().infer(v)
}

/// Like [`infer`], but `None` stands for an absent value.
pub fn infer_slot(v: Option<&Value>) -> SchemaNode {
    Inference::new().infer_slot(v)
}

// ------------------------------- Front API -------------------------------- //

#[derive(Clone, Copy, Debug, Default)]
pub struct Inference {
    array_mode: ArrayMode,
}

impl Inference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_array_mode(array_mode: ArrayMode) -> Self {
        Self { array_mode }
    }

    pub fn array_mode(&self) -> ArrayMode {
        self.array_mode
    }

    pub fn infer(&self, v: &Value) -> SchemaNode {
        match v {
            Value::Null => SchemaNode::Null,
            Value::Array(xs) => arr::infer_array(self, xs),
            Value::String(_) => SchemaNode::String,
            Value::Number(n) => SchemaNode::Number { is_integer: num::is_integer(n) },
            Value::Bool(_) => SchemaNode::Boolean,
            Value::Object(m) => obj::infer_object(self, m),
        }
    }

    pub fn infer_slot(&self, v: Option<&Value>) -> SchemaNode {
        match v {
            Some(v) => self.infer(v),
            None => SchemaNode::Undefined,
        }
    }
}

// ------------------------------- Utilities -------------------------------- //

/// Container nesting depth: scalars are 0, `[]` and `{}` are 1.
/// Iterative, so it is safe to call on inputs too deep to recurse over.
pub fn nesting_depth(v: &Value) -> usize {
    let mut max = 0;
    let mut stack: Vec<(&Value, usize)> = vec![(v, 0)];
    while let Some((v, depth)) = stack.pop() {
        match v {
            Value::Array(xs) => {
                let depth = depth + 1;
                max = max.max(depth);
                stack.extend(xs.iter().map(|x| (x, depth)));
            }
            Value::Object(m) => {
                let depth = depth + 1;
                max = max.max(depth);
                stack.extend(m.values().map(|x| (x, depth)));
            }
            _ => {}
        }
    }
    max
}

// ------------------------------- Tests ------------------------------------ //
