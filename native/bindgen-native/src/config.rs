//! Generator options.
//!
//! Every table the pipeline treats as configuration lives here, except the
//! type table (`types`) and the rewrite rules (`preprocess`), which are
//! policy objects of their own.

use serde::{Deserialize, Serialize};

use crate::error::{BindgenError, Result};

pub const DEFAULT_WRAPPER_MACRO: &str = "ext_def";
pub const DEFAULT_SYMBOL_PREFIX: &str = "_";
pub const DEFAULT_HEADER_FILE: &str = "swephexp.h";
pub const DEFAULT_PREVIEW_LENGTH: usize = 50;

/// Allocator exports that precede every generated symbol.
pub const RUNTIME_SYMBOLS: &[&str] = &["_free", "_malloc"];

/// Runtime helpers the compiler is asked to keep alongside the exports.
pub const RUNTIME_METHODS: &[&str] = &[
    "setValue",
    "getValue",
    "stringToUTF8",
    "UTF8ToString",
    "lengthBytesUTF8",
    "FS",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BindgenOptions {
    pub wrapper_macro: String,
    pub symbol_prefix: String,
    pub runtime_symbols: Vec<String>,
    pub runtime_methods: Vec<String>,
    pub header_file: String,
    pub preview_length: usize,
    /// Parse candidates on the rayon pool. Output order is unaffected.
    pub parallel: bool,
}

impl Default for BindgenOptions {
    fn default() -> Self {
        Self {
            wrapper_macro: DEFAULT_WRAPPER_MACRO.to_string(),
            symbol_prefix: DEFAULT_SYMBOL_PREFIX.to_string(),
            runtime_symbols: RUNTIME_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            runtime_methods: RUNTIME_METHODS.iter().map(|s| s.to_string()).collect(),
            header_file: DEFAULT_HEADER_FILE.to_string(),
            preview_length: DEFAULT_PREVIEW_LENGTH,
            parallel: false,
        }
    }
}

impl BindgenOptions {
    /// Load options from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: BindgenOptions = serde_json::from_str(json)
            .map_err(|e| BindgenError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        let is_ident = !self.wrapper_macro.is_empty()
            && self
                .wrapper_macro
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !is_ident {
            return Err(BindgenError::InvalidOptions(format!(
                "wrapperMacro must be a C identifier, got '{}'",
                self.wrapper_macro
            )));
        }
        if self.header_file.trim().is_empty() {
            return Err(BindgenError::InvalidOptions(
                "headerFile must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Prefixed symbol for a C function name, e.g. `swe_calc` -> `_swe_calc`.
    pub fn symbol_for(&self, name: &str) -> String {
        format!("{}{}", self.symbol_prefix, name)
    }
}
