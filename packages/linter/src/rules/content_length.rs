use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use popdoc_schema::{Element, ElementKind, PopupDocument, TextProps};

/// Headlines longer than this read badly in a popup.
pub const HEADLINE_MAX_LEN: usize = 60;

/// Body copy longer than this overflows small containers.
pub const BODY_MAX_LEN: usize = 220;

/// The headline is the first text element in render sequence.
fn headline_of(doc: &PopupDocument) -> Option<(&Element, &TextProps)> {
    doc.elements_sorted().into_iter().find_map(|e| match &e.kind {
        ElementKind::Text(props) => Some((e, props)),
        _ => None,
    })
}

/// Flags an over-long headline
pub struct HeadlineLengthRule;

impl LintRule for HeadlineLengthRule {
    fn name(&self) -> &'static str {
        "headline-length"
    }

    fn description(&self) -> &'static str {
        "Keep the headline short enough to scan"
    }

    fn check(&self, doc: &PopupDocument) -> Option<Diagnostic> {
        let (element, props) = headline_of(doc)?;
        let length = props.text.chars().count();
        if length <= HEADLINE_MAX_LEN {
            return None;
        }

        Some(
            Diagnostic::warning(
                self.name(),
                format!("headline is {length} characters; keep it under {HEADLINE_MAX_LEN}"),
            )
            .on_element(&element.id)
            .with_suggestion("Move detail into the body text"),
        )
    }
}

/// Flags over-long body copy (any text element after the headline)
pub struct BodyLengthRule;

impl LintRule for BodyLengthRule {
    fn name(&self) -> &'static str {
        "body-length"
    }

    fn description(&self) -> &'static str {
        "Keep body copy short enough for a popup"
    }

    fn check(&self, doc: &PopupDocument) -> Option<Diagnostic> {
        let headline_id = headline_of(doc).map(|(e, _)| e.id.clone());

        doc.elements_sorted().into_iter().find_map(|e| {
            if Some(&e.id) == headline_id.as_ref() {
                return None;
            }
            let ElementKind::Text(props) = &e.kind else {
                return None;
            };
            let length = props.text.chars().count();
            if length <= BODY_MAX_LEN {
                return None;
            }
            Some(
                Diagnostic::warning(
                    self.name(),
                    format!("body text is {length} characters; keep it under {BODY_MAX_LEN}"),
                )
                .on_element(&e.id),
            )
        })
    }
}
