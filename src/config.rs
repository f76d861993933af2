//! Conversion options, loadable from a JSON options file.
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::inference::ArrayMode;
use crate::render::is_identifier;

pub const DEFAULT_BINDING: &str = "schema";

/// Matches serde_json's own parser nesting limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Highest `max_depth` accepted; inference and rendering recurse once per level.
pub const MAX_DEPTH_CEILING: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Prefix the expression with the zod import and a `const` binding.
    pub header: bool,
    /// Name of the `const` the expression is bound to.
    pub binding: String,
    /// Append an exported `z.infer` type alias (needs `header`).
    pub emit_type: bool,
    pub array_mode: ArrayMode,
    /// Deepest container nesting accepted before inference.
    pub max_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            header: false,
            binding: DEFAULT_BINDING.to_owned(),
            emit_type: false,
            array_mode: ArrayMode::FirstElement,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConvertOptions {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options: Self = from_str_with_path(&source).map_err(|message| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        })?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_identifier(&self.binding) {
            return Err(ConfigError::InvalidBinding(self.binding.clone()));
        }
        if self.max_depth > MAX_DEPTH_CEILING {
            return Err(ConfigError::DepthLimitTooHigh {
                requested: self.max_depth,
                ceiling: MAX_DEPTH_CEILING,
            });
        }
        Ok(())
    }

    pub fn type_name(&self) -> String {
        type_name_for(&self.binding)
    }
}

/// Type alias name: the binding with its first letter uppercased.
pub fn type_name_for(binding: &str) -> String {
    let mut chars = binding.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        format!("at JSON path {path} → {}", err.into_inner())
    })
}
