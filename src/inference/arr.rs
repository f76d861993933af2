use indexmap::IndexSet;
use serde_json::Value;

use super::{ArrayMode, Inference};
use crate::ir::SchemaNode;

pub(super) fn infer_array(inf: &Inference, xs: &[Value]) -> SchemaNode {
    let element = match inf.array_mode() {
        // homogeneous assumption: the tail is never inspected
        ArrayMode::FirstElement => match xs.first() {
            Some(first) => inf.infer(first),
            None => SchemaNode::Unknown,
        },
        ArrayMode::Union => union_of_elements(inf, xs),
    };
    SchemaNode::array_of(element)
}

fn union_of_elements(inf: &Inference, xs: &[Value]) -> SchemaNode {
    let mut shapes: IndexSet<SchemaNode> = xs.iter().map(|x| inf.infer(x)).collect();
    if shapes.len() > 1 {
        SchemaNode::Union(shapes.into_iter().collect())
    } else {
        shapes.pop().unwrap_or(SchemaNode::Unknown)
    }
}
