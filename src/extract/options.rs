//! Extraction options and configuration.

use crate::normalize::{place_rules, residence_rules, RuleSet};

use super::layout::TemplateLayout;

/// Options for extracting certificate records.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Which table cell holds which field
    pub layout: TemplateLayout,

    /// Exonym rules applied to places, the residence and the header
    pub place_rules: RuleSet,

    /// Abbreviation rules applied to the residence before `place_rules`
    pub residence_rules: RuleSet,

    /// Batch error handling mode
    pub error_mode: ErrorMode,

    /// Whether batches are processed in parallel
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another template layout.
    pub fn with_layout(mut self, layout: TemplateLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Replace the exonym rules.
    pub fn with_place_rules(mut self, rules: RuleSet) -> Self {
        self.place_rules = rules;
        self
    }

    /// Replace the residence abbreviation rules.
    pub fn with_residence_rules(mut self, rules: RuleSet) -> Self {
        self.residence_rules = rules;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Keep going when a document in a batch fails.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            layout: TemplateLayout::default(),
            place_rules: place_rules().clone(),
            residence_rules: residence_rules().clone(),
            error_mode: ErrorMode::Strict,
            parallel: true,
        }
    }
}

/// What a batch does when one document fails.
///
/// A single document never degrades silently on malformed input; this only
/// decides whether the remaining documents are still processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Stop at the first failed document
    #[default]
    Strict,
    /// Record the failure and continue with the next document
    Lenient,
}
