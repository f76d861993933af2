use std::path::PathBuf;

use thiserror::Error;

/// Crate-local result type for conversions.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors produced while turning JSON text into schema text.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input is not well-formed JSON; the parser's message is kept verbatim.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
    /// Input nests deeper than the configured limit.
    #[error("input nesting depth {depth} exceeds limit {limit}")]
    DepthExceeded {
        /// Measured container depth.
        depth: usize,
        /// Configured maximum.
        limit: usize,
    },
    /// Options that cannot produce valid output (e.g. a bad binding name).
    #[error(transparent)]
    Options(#[from] ConfigError),
}

/// Errors produced while loading conversion options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read options file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options file {path}: {message}")]
    Invalid { path: PathBuf, message: String },
    #[error("binding name {0:?} is not a valid identifier")]
    InvalidBinding(String),
    #[error("max_depth {requested} exceeds the supported ceiling {ceiling}")]
    DepthLimitTooHigh { requested: usize, ceiling: usize },
}

/// Errors from the jq pre-filter.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("{0}")]
    Compile(String),
    #[error("jq runtime error: {0}")]
    Runtime(String),
    #[error("jq produced non-JSON output: {0}")]
    Output(#[from] serde_json::Error),
}
