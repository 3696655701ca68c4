//! Deterministic text-to-document generation.
//!
//! `generate` is a total function: any instruction text plus style
//! parameters yields a valid document, with no external calls, no clock
//! and no randomness. Element ids are seeded from the instruction text,
//! so identical inputs produce structurally identical documents.

use serde::{Deserialize, Serialize};

use popdoc_editor::ordering;
use popdoc_schema::{
    Align, CtaAction, CtaVariant, Element, ElementKind, FontWeight, IdGenerator, ImageSource,
    Mode, PopupDocument, PopupType,
};

use crate::rules::{
    matches_any, rewrite_trailing_urgent, select_cta_label, select_tone,
    truncate_at_word_boundary, IMAGE_KEYWORDS, MINIMAL_BODY_MAX, MINIMAL_KEYWORDS,
    SECONDARY_CTA_KEYWORDS, URGENCY_KEYWORDS,
};

/// Hero image placeholder used for generated image blocks.
pub const HERO_IMAGE_URL: &str = "https://placehold.co/1200x600/png";
pub const HERO_IMAGE_ALT: &str = "Placeholder image";

/// Style parameters applied deterministically, never inferred from the
/// instruction text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleParams {
    pub brand_color: String,
    pub mode: Mode,
    pub popup_type: PopupType,
}

/// Map an instruction plus style parameters to a valid document.
pub fn generate(instruction: &str, style: &StyleParams) -> PopupDocument {
    let lowered = instruction.to_lowercase();
    let mut ids = IdGenerator::new(instruction);

    let mut doc = PopupDocument::empty(style.popup_type, style.mode, &style.brand_color);
    let is_banner = style.popup_type == PopupType::Banner;

    let wants_image = matches_any(&lowered, IMAGE_KEYWORDS);
    let wants_secondary = matches_any(&lowered, SECONDARY_CTA_KEYWORDS);
    let tone = select_tone(&lowered);

    let mut body = tone.body.to_string();
    if matches_any(&lowered, URGENCY_KEYWORDS) {
        body = rewrite_trailing_urgent(&body);
    }
    if matches_any(&lowered, MINIMAL_KEYWORDS) {
        body = truncate_at_word_boundary(&body, MINIMAL_BODY_MAX);
    }

    if wants_image {
        // The chrome's media region must agree with the element list or
        // the linter reports a mismatch.
        doc.container.media_slot = true;

        let mut image = Element::new_image(ids.next_id());
        image.name = "Image 1".to_string();
        if let ElementKind::Image(props) = &mut image.kind {
            props.source = ImageSource::Url {
                url: HERO_IMAGE_URL.to_string(),
                alt: HERO_IMAGE_ALT.to_string(),
            };
            props.height = if is_banner { 140 } else { 220 };
            props.corner_radius = 16;
        }
        doc.elements.push(image);
    }

    let mut headline = Element::new_text(ids.next_id());
    headline.name = "Text 1".to_string();
    if let ElementKind::Text(props) = &mut headline.kind {
        props.text = tone.headline.to_string();
        props.font_size = if is_banner { 18 } else { 22 };
        props.font_weight = FontWeight::W700;
    }
    doc.elements.push(headline);

    let mut body_text = Element::new_text(ids.next_id());
    body_text.name = "Text 2".to_string();
    if let ElementKind::Text(props) = &mut body_text.kind {
        props.text = body;
        props.font_size = 14;
        props.font_weight = FontWeight::W500;
        props.color = Some(doc.theme.muted_text_color.clone());
    }
    doc.elements.push(body_text);

    let mut primary = Element::new_cta(ids.next_id());
    primary.name = "CTA 1".to_string();
    primary.align = Align::Center;
    if let ElementKind::Cta(props) = &mut primary.kind {
        props.label = select_cta_label(&lowered).to_string();
        props.variant = CtaVariant::Primary;
        props.full_width = !is_banner;
    }
    doc.elements.push(primary);

    if wants_secondary {
        let mut secondary = Element::new_cta(ids.next_id());
        secondary.name = "CTA 2".to_string();
        secondary.align = Align::Center;
        if let ElementKind::Cta(props) = &mut secondary.kind {
            props.label = "Later".to_string();
            props.variant = CtaVariant::Secondary;
            props.full_width = !is_banner;
            props.action = CtaAction::Dismiss;
        }
        doc.elements.push(secondary);
    }

    ordering::reindex(&mut doc.elements);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use popdoc_schema::ElementType;

    fn style() -> StyleParams {
        StyleParams {
            brand_color: "#2563EB".to_string(),
            mode: Mode::Light,
            popup_type: PopupType::Modal,
        }
    }

    #[test]
    fn baseline_is_headline_body_and_one_cta() {
        let doc = generate("say hello", &style());
        assert_eq!(doc.count_kind(ElementType::Text), 2);
        assert_eq!(doc.count_kind(ElementType::Cta), 1);
        assert_eq!(doc.count_kind(ElementType::Image), 0);
        assert!(!doc.container.media_slot);
    }

    #[test]
    fn secondary_cta_dismisses() {
        let doc = generate("offer with a no thanks button", &style());
        let ctas: Vec<_> = doc
            .elements
            .iter()
            .filter_map(|e| match &e.kind {
                ElementKind::Cta(props) => Some(props),
                _ => None,
            })
            .collect();
        assert_eq!(ctas.len(), 2);
        assert_eq!(ctas[1].variant, CtaVariant::Secondary);
        assert_eq!(ctas[1].action, CtaAction::Dismiss);
    }

    #[test]
    fn banner_layout_tightens_the_hero_image() {
        let banner_style = StyleParams {
            popup_type: PopupType::Banner,
            ..style()
        };
        let doc = generate("banner with product photo", &banner_style);

        let image = doc
            .elements
            .iter()
            .find_map(|e| match &e.kind {
                ElementKind::Image(props) => Some(props),
                _ => None,
            })
            .unwrap();
        assert_eq!(image.height, 140);
        assert_eq!(doc.container.max_width, 860);
    }
}
