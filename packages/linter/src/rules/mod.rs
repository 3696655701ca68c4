mod content_length;
mod cta;
mod media;
mod theme;

pub use content_length::{BodyLengthRule, HeadlineLengthRule, BODY_MAX_LEN, HEADLINE_MAX_LEN};
pub use cta::{CtaEmptyUrlRule, CtaLabelLengthRule, CTA_LABEL_MAX_LEN};
pub use media::{ImageMissingSourceRule, MediaSlotRule};
pub use theme::{ColorFormatRule, ModeBackgroundRule};

use crate::diagnostic::Diagnostic;
use popdoc_schema::PopupDocument;

/// Trait for implementing lint rules
pub trait LintRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check a document. Each rule reports at most one message per run,
    /// so a document with many instances of the same problem does not
    /// flood the warnings list.
    fn check(&self, doc: &PopupDocument) -> Option<Diagnostic>;
}

/// Registry of all available lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(HeadlineLengthRule),
                Box::new(BodyLengthRule),
                Box::new(CtaLabelLengthRule),
                Box::new(CtaEmptyUrlRule),
                Box::new(MediaSlotRule),
                Box::new(ImageMissingSourceRule),
                Box::new(ColorFormatRule),
                Box::new(ModeBackgroundRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
