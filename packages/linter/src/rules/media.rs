use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use popdoc_schema::{ElementKind, ImageSource, PopupDocument};

/// Flags disagreement between the container's media region and the
/// element list, in either direction.
pub struct MediaSlotRule;

impl LintRule for MediaSlotRule {
    fn name(&self) -> &'static str {
        "media-slot-mismatch"
    }

    fn description(&self) -> &'static str {
        "The chrome's media region and the image elements must agree"
    }

    fn check(&self, doc: &PopupDocument) -> Option<Diagnostic> {
        let has_image = doc
            .elements
            .iter()
            .any(|e| matches!(e.kind, ElementKind::Image(_)));

        match (doc.container.media_slot, has_image) {
            (true, false) => Some(
                Diagnostic::warning(
                    self.name(),
                    "container reserves a media region but the document has no image element",
                )
                .with_suggestion("Add an image element or disable the media region"),
            ),
            (false, true) => Some(
                Diagnostic::warning(
                    self.name(),
                    "document has an image element but the container reserves no media region",
                )
                .with_suggestion("Enable the container's media region"),
            ),
            _ => None,
        }
    }
}

/// Flags an image element whose source is still `none`: visible in the
/// tree, nothing to render.
pub struct ImageMissingSourceRule;

impl LintRule for ImageMissingSourceRule {
    fn name(&self) -> &'static str {
        "image-missing-source"
    }

    fn description(&self) -> &'static str {
        "Image elements need a url and alt text"
    }

    fn check(&self, doc: &PopupDocument) -> Option<Diagnostic> {
        doc.elements.iter().find_map(|e| {
            let ElementKind::Image(props) = &e.kind else {
                return None;
            };
            match props.source {
                ImageSource::None => Some(
                    Diagnostic::warning(
                        self.name(),
                        "image element has no url or alt text",
                    )
                    .on_element(&e.id)
                    .with_suggestion("Set the image source or remove the element"),
                ),
                ImageSource::Url { .. } => None,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popdoc_schema::{Element, ImageProps, Mode, PopupType};

    fn empty_doc() -> PopupDocument {
        PopupDocument::empty(PopupType::Modal, Mode::Light, "#2563EB")
    }

    #[test]
    fn agreement_in_both_directions_is_clean() {
        let doc = empty_doc();
        assert!(MediaSlotRule.check(&doc).is_none());

        let mut doc = empty_doc();
        doc.container.media_slot = true;
        doc.elements.push(Element::new_image("img"));
        assert!(MediaSlotRule.check(&doc).is_none());
    }

    #[test]
    fn reserved_region_without_image_is_flagged() {
        let mut doc = empty_doc();
        doc.container.media_slot = true;
        let diagnostic = MediaSlotRule.check(&doc).unwrap();
        assert!(diagnostic.message.contains("no image element"));
    }

    #[test]
    fn image_without_reserved_region_is_flagged() {
        let mut doc = empty_doc();
        doc.elements.push(Element::new_image("img"));
        let diagnostic = MediaSlotRule.check(&doc).unwrap();
        assert!(diagnostic.message.contains("no media region"));
    }

    #[test]
    fn sourceless_image_is_flagged() {
        let mut doc = empty_doc();
        doc.container.media_slot = true;
        let mut image = Element::new_image("img");
        if let ElementKind::Image(ImageProps { source, .. }) = &mut image.kind {
            *source = ImageSource::None;
        }
        doc.elements.push(image);

        let diagnostic = ImageMissingSourceRule.check(&doc).unwrap();
        assert_eq!(diagnostic.element_id.as_deref(), Some("img"));
    }
}
