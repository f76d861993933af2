//! Infer a Zod schema from a sample JSON document.
//!
//! ```
//! let schema = json_zod::convert(r#"{"name": "John", "age": 30}"#).unwrap();
//! assert_eq!(schema, "z.object({\n  name: z.string(),\n  age: z.number().int()\n})");
//! ```
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod inference;
pub mod ir;
pub mod jq_exec;
pub mod json_schema;
pub mod render;

pub use config::ConvertOptions;
pub use convert::{convert, convert_value, convert_with, schema_value, schema_with};
pub use error::{ConfigError, ConvertError};
pub use inference::{infer, infer_slot, ArrayMode, Inference};
pub use ir::{Field, SchemaNode};
pub use render::render;
