//! Error types for the binding generator.
//!
//! `MalformedSignature` is per-candidate and always recovered by the model
//! builder. `BindgenError` is what callers of the crate-level entry points see.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedSignature {
    #[error("invalid function signature format")]
    Shape,
    #[error("malformed argument: {0}")]
    Parameter(String),
}

#[derive(Debug, Error)]
pub enum BindgenError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("header '{file}' not found under {}", .root.display())]
    HeaderNotFound { root: PathBuf, file: String },
    #[error("declaration template must contain the placeholder exactly once (found {occurrences})")]
    InvalidTemplate { occurrences: usize },
    #[error("no function declarations were recognised in the header")]
    NoFunctions,
}

pub type Result<T> = std::result::Result<T, BindgenError>;
