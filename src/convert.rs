//! JSON text in, schema text out.
//!
//! Parse → depth guard → infer → render, with the optional header the
//! interactive tool prints (`import { z } from "zod"` plus a `const` binding).
use serde_json::Value;
use tracing::debug;

use crate::config::{type_name_for, ConvertOptions};
use crate::error::{ConvertError, Result};
use crate::inference::{nesting_depth, Inference};
use crate::ir::SchemaNode;
use crate::json_schema::to_json_schema;
use crate::render::render;

pub const ZOD_IMPORT: &str = "import { z } from \"zod\";";

/// Bare Zod expression for `json_text`, using default options.
pub fn convert(json_text: &str) -> Result<String> {
    convert_with(json_text, &ConvertOptions::default())
}

pub fn convert_with(json_text: &str, options: &ConvertOptions) -> Result<String> {
    let value = parse(json_text)?;
    convert_value(&value, options)
}

pub fn convert_value(value: &Value, options: &ConvertOptions) -> Result<String> {
    options.validate()?;
    let node = infer_checked(value, options)?;
    let expression = render(&node, 0);
    if options.header {
        Ok(with_header(&expression, options))
    } else {
        Ok(expression)
    }
}

/// Pretty-printed JSON Schema for `json_text`.
pub fn schema_with(json_text: &str, options: &ConvertOptions) -> Result<String> {
    let value = parse(json_text)?;
    Ok(format!("{:#}", schema_value(&value, options)?))
}

pub fn schema_value(value: &Value, options: &ConvertOptions) -> Result<Value> {
    options.validate()?;
    let node = infer_checked(value, options)?;
    Ok(to_json_schema(&node))
}

fn parse(json_text: &str) -> Result<Value> {
    let value = serde_json::from_str(json_text)?;
    Ok(value)
}

fn infer_checked(value: &Value, options: &ConvertOptions) -> Result<SchemaNode> {
    let depth = nesting_depth(value);
    if depth > options.max_depth {
        return Err(ConvertError::DepthExceeded { depth, limit: options.max_depth });
    }
    let node = Inference::with_array_mode(options.array_mode).infer(value);
    debug!(kind = node.kind(), depth, array_mode = ?options.array_mode, "inferred schema");
    Ok(node)
}

fn with_header(expression: &str, options: &ConvertOptions) -> String {
    let entry = ModuleEntry {
        label: None,
        binding: options.binding.clone(),
        expression,
    };
    zod_module(&[entry], options.emit_type)
}

/// One `const` binding in a generated module.
#[derive(Debug, Clone)]
pub struct ModuleEntry<'a> {
    /// Written as a `//` comment above the binding.
    pub label: Option<&'a str>,
    pub binding: String,
    pub expression: &'a str,
}

/// The zod import once, then each entry as its own `const` (and type alias).
/// Bindings must be distinct identifiers for the module to type-check.
pub fn zod_module(entries: &[ModuleEntry<'_>], emit_type: bool) -> String {
    let mut out = ZOD_IMPORT.to_owned();
    for entry in entries {
        out.push_str("\n\n");
        if let Some(label) = entry.label {
            // a line break inside the label would end the comment early
            out.push_str(&format!("// {}\n", label.replace(['\r', '\n'], " ")));
        }
        out.push_str(&format!("const {} = {}", entry.binding, entry.expression));
        if emit_type {
            out.push_str(&format!(
                "\n\nexport type {} = z.infer<typeof {}>",
                type_name_for(&entry.binding),
                entry.binding,
            ));
        }
    }
    out
}
