use serde_json::{Map, Value};

use super::Inference;
use crate::ir::{Field, SchemaNode};

pub(super) fn infer_object(inf: &Inference, map: &Map<String, Value>) -> SchemaNode {
    let fields = map
        .iter()
        .map(|(k, v)| Field::new(k.clone(), inf.infer(v)))
        .collect();
    SchemaNode::Object(fields)
}
