//! Default values for documents and elements.
//!
//! Every fallback the repairer reaches for lives here, so that repair,
//! editing and generation all agree on what "unset" looks like.

use crate::document::{
    Align, AspectRatio, CtaAction, CtaProps, CtaVariant, Element, ElementKind, ElementType,
    FontWeight, ImageFit, ImageProps, ImageSource, Mode, PopupContainer, PopupDocument,
    PopupTheme, PopupType, Spacing, TextProps, SCHEMA_VERSION,
};

/// Safe substitute for a missing or malformed CTA target.
pub const PLACEHOLDER_ACTION_URL: &str = "https://example.com";

/// Safe substitute for a missing or malformed image url.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/800x400/png";

pub const PLACEHOLDER_IMAGE_ALT: &str = "Image";

pub const DEFAULT_BRAND_COLOR: &str = "#2563EB";

impl PopupTheme {
    /// Mode-dependent theme defaults around a caller-supplied brand color.
    pub fn for_mode(mode: Mode, brand_color: &str) -> Self {
        match mode {
            Mode::Dark => Self {
                mode,
                brand_color: brand_color.to_string(),
                background_color: "#0B1220".to_string(),
                text_color: "#E5E7EB".to_string(),
                muted_text_color: "#9CA3AF".to_string(),
            },
            Mode::Light => Self {
                mode,
                brand_color: brand_color.to_string(),
                background_color: "#FFFFFF".to_string(),
                text_color: "#0F172A".to_string(),
                muted_text_color: "#475569".to_string(),
            },
        }
    }
}

impl PopupContainer {
    /// Structural presentation defaults per popup type.
    pub fn for_type(popup_type: PopupType, mode: Mode) -> Self {
        let background_color = match mode {
            Mode::Dark => "#0B1220".to_string(),
            Mode::Light => "#FFFFFF".to_string(),
        };

        let base = Self {
            aspect_ratio: AspectRatio::Auto,
            background_color,
            corner_radius: 18,
            show_close_icon: true,
            padding: 24,
            backdrop: true,
            dismissible: true,
            max_width: 420,
            media_slot: false,
        };

        match popup_type {
            PopupType::Modal => base,
            PopupType::Banner => Self {
                corner_radius: 14,
                padding: 16,
                backdrop: false,
                max_width: 860,
                ..base
            },
            PopupType::Slideup => Self {
                corner_radius: 16,
                padding: 20,
                backdrop: false,
                max_width: 480,
                ..base
            },
        }
    }
}

impl PopupDocument {
    /// An empty but valid document for the given style parameters.
    pub fn empty(popup_type: PopupType, mode: Mode, brand_color: &str) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            popup_type,
            theme: PopupTheme::for_mode(mode, brand_color),
            container: PopupContainer::for_type(popup_type, mode),
            elements: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl Element {
    pub fn new(element_type: ElementType, id: impl Into<String>) -> Self {
        match element_type {
            ElementType::Text => Self::new_text(id),
            ElementType::Image => Self::new_image(id),
            ElementType::Cta => Self::new_cta(id),
        }
    }

    pub fn new_text(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "Text".to_string(),
            order: 0,
            align: Align::Left,
            margin: Spacing::new(0, 0, 12, 0),
            padding: Spacing::ZERO,
            kind: ElementKind::Text(TextProps {
                text: "New text".to_string(),
                font_size: 16,
                font_weight: FontWeight::W600,
                color: None,
            }),
        }
    }

    pub fn new_image(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "Image".to_string(),
            order: 0,
            align: Align::Center,
            margin: Spacing::new(0, 0, 12, 0),
            padding: Spacing::ZERO,
            kind: ElementKind::Image(ImageProps {
                source: ImageSource::Url {
                    url: PLACEHOLDER_IMAGE_URL.to_string(),
                    alt: PLACEHOLDER_IMAGE_ALT.to_string(),
                },
                height: 160,
                corner_radius: 12,
                fit: ImageFit::Cover,
            }),
        }
    }

    pub fn new_cta(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: "CTA".to_string(),
            order: 0,
            align: Align::Center,
            margin: Spacing::new(0, 0, 12, 0),
            padding: Spacing::ZERO,
            kind: ElementKind::Cta(CtaProps {
                label: "Click here".to_string(),
                variant: CtaVariant::Primary,
                full_width: true,
                action: CtaAction::Url {
                    value: PLACEHOLDER_ACTION_URL.to_string(),
                },
            }),
        }
    }
}
