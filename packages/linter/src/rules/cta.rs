use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use popdoc_schema::{CtaAction, ElementKind, PopupDocument};

/// CTA labels longer than this wrap or truncate on most buttons.
pub const CTA_LABEL_MAX_LEN: usize = 24;

/// Flags over-long CTA labels
pub struct CtaLabelLengthRule;

impl LintRule for CtaLabelLengthRule {
    fn name(&self) -> &'static str {
        "cta-label-length"
    }

    fn description(&self) -> &'static str {
        "Keep CTA labels short enough for a button"
    }

    fn check(&self, doc: &PopupDocument) -> Option<Diagnostic> {
        doc.elements.iter().find_map(|e| {
            let ElementKind::Cta(props) = &e.kind else {
                return None;
            };
            let length = props.label.chars().count();
            if length <= CTA_LABEL_MAX_LEN {
                return None;
            }
            Some(
                Diagnostic::warning(
                    self.name(),
                    format!(
                        "CTA label \"{}\" is {length} characters; keep it under {CTA_LABEL_MAX_LEN}",
                        props.label
                    ),
                )
                .on_element(&e.id),
            )
        })
    }
}

/// Flags a url-type action with an empty value.
///
/// The validator already rejects this shape in raw input; the rule
/// covers documents constructed directly through the typed model.
pub struct CtaEmptyUrlRule;

impl LintRule for CtaEmptyUrlRule {
    fn name(&self) -> &'static str {
        "cta-empty-url"
    }

    fn description(&self) -> &'static str {
        "A url action needs a destination"
    }

    fn check(&self, doc: &PopupDocument) -> Option<Diagnostic> {
        doc.elements.iter().find_map(|e| {
            let ElementKind::Cta(props) = &e.kind else {
                return None;
            };
            match &props.action {
                CtaAction::Url { value } if value.is_empty() => Some(
                    Diagnostic::warning(
                        self.name(),
                        "CTA opens a URL but its value is empty",
                    )
                    .on_element(&e.id)
                    .with_suggestion("Set a destination URL or switch the action to dismiss"),
                ),
                _ => None,
            }
        })
    }
}
