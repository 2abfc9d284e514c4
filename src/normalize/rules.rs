//! Ordered rule substitution.
//!
//! A [`RuleSet`] applies its rules one after another, each over the output
//! of the previous one. Put longer or more specific patterns first so that a
//! short rule cannot eat part of a longer phrase.

use regex::{NoExpand, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Serializable description of a rule, as found in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Regular expression, or literal text when `literal` is set
    pub pattern: String,

    /// Replacement text (inserted verbatim, no `$` expansion)
    pub replacement: String,

    /// Treat `pattern` as plain text
    #[serde(default)]
    pub literal: bool,

    /// Match without regard to case
    #[serde(default)]
    pub ignore_case: bool,
}

/// A compiled substitution rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    /// Compile a regular-expression rule.
    pub fn new(pattern: &str, replacement: impl Into<String>, ignore_case: bool) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|e| Error::InvalidRule {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            pattern: regex,
            replacement: replacement.into(),
        })
    }

    /// Compile a rule matching `text` literally (case-sensitive).
    pub fn literal(text: &str, replacement: impl Into<String>) -> Result<Self> {
        Self::new(&regex::escape(text), replacement, false)
    }

    /// Compile a rule from its serialized form.
    pub fn from_spec(spec: &RuleSpec) -> Result<Self> {
        let pattern = if spec.literal {
            regex::escape(&spec.pattern)
        } else {
            spec.pattern.clone()
        };
        Self::new(&pattern, spec.replacement.clone(), spec.ignore_case)
    }

    /// Source pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Replacement text.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Apply this rule to every match in `text`.
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, NoExpand(&self.replacement))
            .into_owned()
    }
}

/// An ordered list of substitution rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rule set from `(pattern, replacement)` regex pairs.
    pub fn from_patterns(pairs: &[(&str, &str)], ignore_case: bool) -> Result<Self> {
        let rules = pairs
            .iter()
            .map(|(pattern, replacement)| Rule::new(pattern, *replacement, ignore_case))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Build a rule set from serialized rules.
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self> {
        let rules = specs
            .iter()
            .map(Rule::from_spec)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Parse serialized rules from JSON (an array of [`RuleSpec`]).
    pub fn from_json(json: &str) -> Result<Self> {
        let specs: Vec<RuleSpec> = serde_json::from_str(json)?;
        Self::from_specs(&specs)
    }

    /// Append a rule.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Append a rule and return self.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order. Empty input is returned unchanged.
    pub fn apply(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }
}
