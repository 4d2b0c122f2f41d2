//! Candidate declaration extraction.

use regex::Regex;

use crate::error::Result;
use crate::preprocess::PreprocessPolicy;

/// Splits normalised header text into candidate declarations.
///
/// A candidate is every run starting at the wrapper macro token and ending at
/// the next `;`, found in source order.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    policy: PreprocessPolicy,
    candidate_re: Regex,
}

impl Tokenizer {
    pub fn new(policy: PreprocessPolicy, wrapper_macro: &str) -> Result<Self> {
        let candidate_re = Regex::new(&format!(
            r"\b{}\s*\([^;]*;",
            regex::escape(wrapper_macro)
        ))?;
        Ok(Self {
            policy,
            candidate_re,
        })
    }

    pub fn policy(&self) -> &PreprocessPolicy {
        &self.policy
    }

    /// Preprocess `header` and return its candidates.
    pub fn tokenize(&self, header: &str) -> Vec<String> {
        let text = self.policy.apply(header);
        self.extract(&text)
    }

    /// Extract candidates from text that is already normalised.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.candidate_re
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
