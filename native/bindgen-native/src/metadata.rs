//! Metadata model builder.
//!
//! Drives the tokenizer and signature parser over a whole header and folds
//! the results into the canonical descriptor list, sorted by name. Rejected
//! candidates become diagnostics; nothing here aborts the batch.

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::BindgenOptions;
use crate::error::{MalformedSignature, Result};
use crate::preprocess::PreprocessPolicy;
use crate::signature::{FunctionDescriptor, SignatureParser};
use crate::tokenize::Tokenizer;

pub const DIAG_MALFORMED_SIGNATURE: &str = "malformed-signature";
pub const DIAG_DUPLICATE_FUNCTION: &str = "duplicate-function";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
    /// Leading characters of the offending candidate.
    pub preview: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingModel {
    pub functions: Vec<FunctionDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
    pub candidate_count: usize,
}

impl BindingModel {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.functions
            .binary_search_by(|f| f.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.functions[i])
    }
}

#[derive(Debug, Clone)]
pub struct ModelBuilder {
    tokenizer: Tokenizer,
    parser: SignatureParser,
    preview_length: usize,
    parallel: bool,
}

impl ModelBuilder {
    /// Builder for the Swiss Ephemeris header, with its rules built for
    /// `options.wrapper_macro`.
    pub fn new(options: &BindgenOptions) -> Result<Self> {
        options.validate()?;
        Self::with_policy(options, PreprocessPolicy::swisseph_for(&options.wrapper_macro)?)
    }

    pub fn with_policy(options: &BindgenOptions, policy: PreprocessPolicy) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            tokenizer: Tokenizer::new(policy, &options.wrapper_macro)?,
            parser: SignatureParser::new(&options.wrapper_macro)?,
            preview_length: options.preview_length,
            parallel: options.parallel,
        })
    }

    pub fn build(&self, header: &str) -> BindingModel {
        let candidates = self.tokenizer.tokenize(header);
        info!("Found {} potential functions in header file.", candidates.len());

        // Parse order is irrelevant to the result; only the final sort decides output order.
        let parsed: Vec<std::result::Result<FunctionDescriptor, MalformedSignature>> =
            if self.parallel {
                candidates.par_iter().map(|c| self.parser.parse(c)).collect()
            } else {
                candidates.iter().map(|c| self.parser.parse(c)).collect()
            };

        let mut seen = HashSet::new();
        let (mut functions, diagnostics) = candidates.iter().zip(parsed).fold(
            (Vec::new(), Vec::new()),
            |(mut functions, mut diagnostics), (candidate, result)| {
                match result {
                    Ok(descriptor) if seen.insert(descriptor.name.clone()) => {
                        functions.push(descriptor);
                    }
                    Ok(descriptor) => diagnostics.push(self.diagnostic(
                        DIAG_DUPLICATE_FUNCTION,
                        format!("duplicate declaration of '{}'", descriptor.name),
                        candidate,
                    )),
                    Err(e) => diagnostics.push(self.diagnostic(
                        DIAG_MALFORMED_SIGNATURE,
                        e.to_string(),
                        candidate,
                    )),
                }
                (functions, diagnostics)
            },
        );

        functions.sort_by(|a, b| a.name.cmp(&b.name));

        if functions.is_empty() {
            warn!("No functions parsed; the header does not match the expected declaration shape.");
        } else {
            info!("Successfully parsed {} functions.", functions.len());
        }

        BindingModel {
            functions,
            diagnostics,
            candidate_count: candidates.len(),
        }
    }

    fn diagnostic(&self, code: &str, reason: String, candidate: &str) -> Diagnostic {
        let preview: String = candidate.chars().take(self.preview_length).collect();
        warn!("Skipped function signature: {}... ({})", preview, reason);
        Diagnostic {
            code: code.to_string(),
            message: reason,
            preview,
        }
    }
}
