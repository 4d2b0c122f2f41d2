//! Header preprocessing policy.
//!
//! Raw header text is normalised before candidates are extracted: block
//! comments are removed, a list of named rewrite rules neutralises macro
//! noise and patches known quirks, then whitespace runs collapse to a single
//! space. Rules are applied in insertion order.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::DEFAULT_WRAPPER_MACRO;

lazy_static! {
    static ref BLOCK_COMMENT_RE: Regex = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();

    static ref DEFAULT_MACRO_RULE: RewriteRule =
        RewriteRule::macro_definition(DEFAULT_WRAPPER_MACRO).unwrap();

    /// Rules for swephexp.h that do not depend on the wrapper macro.
    static ref SWISSEPH_RULES: Vec<RewriteRule> = vec![
        RewriteRule::new("strip-const", r"\bconst\b", "").unwrap(),
        // The two declarations below omit their parameter names.
        RewriteRule::new(
            "name-swe-version-arg",
            r"swe_version\s*\(\s*char\s*\*\s*\)",
            "swe_version(char *s)",
        )
        .unwrap(),
        RewriteRule::new(
            "name-swe-get-library-path-arg",
            r"swe_get_library_path\s*\(\s*char\s*\*\s*\)",
            "swe_get_library_path(char *s)",
        )
        .unwrap(),
    ];
}

/// A single named regex rewrite.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    name: String,
    pattern: Regex,
    replacement: String,
}

impl RewriteRule {
    pub fn new(name: &str, pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.to_string(),
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }

    /// Removes the `NAME(x)` head of `#define NAME(x) ...`, so the definition
    /// of the wrapper macro is never read as a declaration.
    pub fn macro_definition(wrapper_macro: &str) -> Result<Self, regex::Error> {
        Self::new(
            "drop-macro-definition",
            &format!(
                r"(#\s*define\s+){}\s*\(\s*\w+\s*\)",
                regex::escape(wrapper_macro)
            ),
            "${1}",
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreprocessPolicy {
    rules: Vec<RewriteRule>,
}

impl PreprocessPolicy {
    /// A policy with no rewrite rules. Comments and whitespace are still normalised.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The rules needed to read the Swiss Ephemeris public header.
    pub fn swisseph() -> Self {
        let mut rules = vec![DEFAULT_MACRO_RULE.clone()];
        rules.extend(SWISSEPH_RULES.iter().cloned());
        Self { rules }
    }

    /// Swiss Ephemeris rules with the macro definition rule built for `wrapper_macro`.
    pub fn swisseph_for(wrapper_macro: &str) -> Result<Self, regex::Error> {
        let mut rules = vec![RewriteRule::macro_definition(wrapper_macro)?];
        rules.extend(SWISSEPH_RULES.iter().cloned());
        Ok(Self { rules })
    }

    pub fn with_rule(mut self, rule: RewriteRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&RewriteRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn apply(&self, header: &str) -> String {
        let mut text = strip_block_comments(header);
        for rule in &self.rules {
            text = rule.apply(&text);
        }
        collapse_whitespace(&text)
    }
}

pub fn strip_block_comments(text: &str) -> String {
    BLOCK_COMMENT_RE.replace_all(text, "").into_owned()
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}
