use crate::diagnostic::Diagnostic;
use crate::rules::RuleRegistry;
use popdoc_schema::PopupDocument;

/// Options for configuring the linter
#[derive(Debug, Default)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,
}

/// Lint a popup document and return diagnostics. Read-only: the document
/// is never mutated or rejected here.
pub fn lint_document(document: &PopupDocument, options: LintOptions) -> Vec<Diagnostic> {
    let registry = options.registry.unwrap_or_default();

    registry
        .rules()
        .iter()
        .filter_map(|rule| rule.check(document))
        .collect()
}

/// Diagnostic messages only, in the shape `document.warnings` carries.
pub fn lint_messages(document: &PopupDocument) -> Vec<String> {
    lint_document(document, LintOptions::default())
        .into_iter()
        .map(|d| d.message)
        .collect()
}

/// Refresh `document.warnings` from a fresh lint run.
///
/// The list is REPLACED, not appended to: whether warnings accumulate
/// across regenerations is a caller policy, and a caller that wants
/// accumulation can collect `lint_messages` itself.
pub fn apply_warnings(document: &mut PopupDocument) {
    document.warnings = lint_messages(document);
}
