//! # Popdoc Schema
//!
//! Canonical type definitions and structural checks for popup documents.
//!
//! Both hand edits and generator output are untrusted until validated,
//! so every constraint in the data model is expressible as a runtime
//! check: `validate` turns an arbitrary JSON value into a typed
//! [`PopupDocument`] or a [`ViolationList`].

pub mod defaults;
pub mod document;
pub mod id_generator;
pub mod validate;
pub mod violation;

pub use document::{
    clamp_to, Align, AspectRatio, CtaAction, CtaProps, CtaVariant, Element, ElementKind,
    ElementType, FontWeight, ImageFit, ImageProps, ImageSource, Mode, PopupContainer,
    PopupDocument, PopupTheme, PopupType, Spacing, TextProps, CONTAINER_PADDING_MAX,
    CONTAINER_RADIUS_MAX, FONT_SIZE_MAX, FONT_SIZE_MIN, IMAGE_HEIGHT_MAX, IMAGE_HEIGHT_MIN,
    IMAGE_RADIUS_MAX, MAX_WIDTH_MAX, MAX_WIDTH_MIN, SCHEMA_VERSION, SPACING_MAX,
};
pub use id_generator::{seed_from, IdGenerator};
pub use validate::validate;
pub use violation::{Violation, ViolationList};
