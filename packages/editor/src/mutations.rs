//! # Document Mutations
//!
//! High-level semantic operations on popup documents.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation is one semantic operation
//! 2. **Typed**: one operation per field group, no generic patch objects,
//!    so unknown keys cannot slip through a merge
//! 3. **Replacement, not patching**: `apply` returns a new document value
//!    and leaves the input untouched
//! 4. **Valid at every entry point**: numeric edits clamp to schema
//!    bounds, URL-bearing edits are checked, structural edits reindex
//!
//! ## Edge cases
//!
//! Move, duplicate and remove with an unknown id are no-ops. Field
//! updates with an unknown id are errors: silently ignoring a field edit
//! would lose user input.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use popdoc_schema::{
    clamp_to, Align, CtaAction, CtaProps, Element, ElementKind, ElementType, IdGenerator,
    ImageProps, ImageSource, PopupContainer, PopupDocument, PopupTheme, Spacing, TextProps,
    CONTAINER_PADDING_MAX, CONTAINER_RADIUS_MAX, FONT_SIZE_MAX, FONT_SIZE_MIN, IMAGE_HEIGHT_MAX,
    IMAGE_HEIGHT_MIN, IMAGE_RADIUS_MAX, MAX_WIDTH_MAX, MAX_WIDTH_MIN,
};

use crate::ordering;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a defaulted element of the given kind
    AppendElement { element_type: ElementType },

    /// Move an element to a position in the render sequence
    MoveElement { element_id: String, index: usize },

    /// Clone an element directly after its source
    DuplicateElement { element_id: String },

    /// Remove an element by id
    RemoveElement { element_id: String },

    /// Rename an element (display label only)
    RenameElement { element_id: String, name: String },

    SetAlign { element_id: String, align: Align },

    SetMargin { element_id: String, margin: Spacing },

    SetPadding { element_id: String, padding: Spacing },

    /// Replace the text payload of a text element
    UpdateText { element_id: String, props: TextProps },

    /// Replace the image payload of an image element
    UpdateImage { element_id: String, props: ImageProps },

    /// Replace the CTA payload of a CTA element
    UpdateCta { element_id: String, props: CtaProps },

    /// Replace the container chrome record
    UpdateContainer { container: PopupContainer },

    /// Replace the theme record
    UpdateTheme { theme: PopupTheme },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("element {id} is not a {expected} element")]
    KindMismatch { id: String, expected: &'static str },

    #[error("\"{0}\" is not a valid URL")]
    InvalidUrl(String),

    #[error("image alt text is required alongside a url source")]
    MissingAltText,
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    /// The replacement document
    pub document: PopupDocument,

    /// Id of an element created by this mutation (append/duplicate)
    pub inserted_id: Option<String>,
}

impl Mutation {
    /// Validate without applying.
    pub fn validate(&self, doc: &PopupDocument) -> Result<(), MutationError> {
        match self {
            // Structural operations tolerate unknown ids (no-op on apply).
            Mutation::AppendElement { .. }
            | Mutation::MoveElement { .. }
            | Mutation::DuplicateElement { .. }
            | Mutation::RemoveElement { .. }
            | Mutation::UpdateContainer { .. }
            | Mutation::UpdateTheme { .. } => Ok(()),

            Mutation::RenameElement { element_id, .. }
            | Mutation::SetAlign { element_id, .. }
            | Mutation::SetMargin { element_id, .. }
            | Mutation::SetPadding { element_id, .. } => {
                Self::require_element(doc, element_id).map(|_| ())
            }

            Mutation::UpdateText { element_id, .. } => {
                match &Self::require_element(doc, element_id)?.kind {
                    ElementKind::Text(_) => Ok(()),
                    _ => Err(MutationError::KindMismatch {
                        id: element_id.clone(),
                        expected: "text",
                    }),
                }
            }

            Mutation::UpdateImage { element_id, props } => {
                match &Self::require_element(doc, element_id)?.kind {
                    ElementKind::Image(_) => Self::check_image_source(&props.source),
                    _ => Err(MutationError::KindMismatch {
                        id: element_id.clone(),
                        expected: "image",
                    }),
                }
            }

            Mutation::UpdateCta { element_id, props } => {
                match &Self::require_element(doc, element_id)?.kind {
                    ElementKind::Cta(_) => Self::check_action(&props.action),
                    _ => Err(MutationError::KindMismatch {
                        id: element_id.clone(),
                        expected: "cta",
                    }),
                }
            }
        }
    }

    /// Apply the mutation, returning a replacement document. The input
    /// document is never modified.
    pub fn apply(
        &self,
        doc: &PopupDocument,
        ids: &mut IdGenerator,
    ) -> Result<MutationOutcome, MutationError> {
        self.validate(doc)?;

        let mut next = doc.clone();
        let mut inserted_id = None;

        match self {
            Mutation::AppendElement { element_type } => {
                let id = ids.unique_id(&next);
                let mut element = Element::new(*element_type, &id);
                element.name = format!(
                    "{} {}",
                    element_type.display_name(),
                    next.count_kind(*element_type) + 1
                );
                element.order = ordering::append_order(&next.elements);
                next.elements.push(element);
                ordering::reindex(&mut next.elements);
                inserted_id = Some(id);
            }

            Mutation::MoveElement { element_id, index } => {
                ordering::move_to(&mut next.elements, element_id, *index);
            }

            Mutation::DuplicateElement { element_id } => {
                let new_id = ids.unique_id(&next);
                if ordering::duplicate_after(&mut next.elements, element_id, new_id.clone()) {
                    inserted_id = Some(new_id);
                }
            }

            Mutation::RemoveElement { element_id } => {
                ordering::remove(&mut next.elements, element_id);
            }

            Mutation::RenameElement { element_id, name } => {
                let element = Self::require_element_mut(&mut next, element_id)?;
                element.name = name.clone();
            }

            Mutation::SetAlign { element_id, align } => {
                let element = Self::require_element_mut(&mut next, element_id)?;
                element.align = *align;
            }

            Mutation::SetMargin { element_id, margin } => {
                let element = Self::require_element_mut(&mut next, element_id)?;
                element.margin = margin.clamped();
            }

            Mutation::SetPadding { element_id, padding } => {
                let element = Self::require_element_mut(&mut next, element_id)?;
                element.padding = padding.clamped();
            }

            Mutation::UpdateText { element_id, props } => {
                let element = Self::require_element_mut(&mut next, element_id)?;
                match &mut element.kind {
                    ElementKind::Text(existing) => {
                        *existing = TextProps {
                            font_size: clamp_to(
                                props.font_size as i64,
                                FONT_SIZE_MIN,
                                FONT_SIZE_MAX,
                            ),
                            ..props.clone()
                        };
                    }
                    _ => {
                        return Err(MutationError::KindMismatch {
                            id: element_id.clone(),
                            expected: "text",
                        })
                    }
                }
            }

            Mutation::UpdateImage { element_id, props } => {
                let element = Self::require_element_mut(&mut next, element_id)?;
                match &mut element.kind {
                    ElementKind::Image(existing) => {
                        *existing = ImageProps {
                            height: clamp_to(
                                props.height as i64,
                                IMAGE_HEIGHT_MIN,
                                IMAGE_HEIGHT_MAX,
                            ),
                            corner_radius: clamp_to(
                                props.corner_radius as i64,
                                0,
                                IMAGE_RADIUS_MAX,
                            ),
                            ..props.clone()
                        };
                    }
                    _ => {
                        return Err(MutationError::KindMismatch {
                            id: element_id.clone(),
                            expected: "image",
                        })
                    }
                }
            }

            Mutation::UpdateCta { element_id, props } => {
                let element = Self::require_element_mut(&mut next, element_id)?;
                match &mut element.kind {
                    ElementKind::Cta(existing) => *existing = props.clone(),
                    _ => {
                        return Err(MutationError::KindMismatch {
                            id: element_id.clone(),
                            expected: "cta",
                        })
                    }
                }
            }

            Mutation::UpdateContainer { container } => {
                next.container = PopupContainer {
                    corner_radius: clamp_to(
                        container.corner_radius as i64,
                        0,
                        CONTAINER_RADIUS_MAX,
                    ),
                    padding: clamp_to(container.padding as i64, 0, CONTAINER_PADDING_MAX),
                    max_width: clamp_to(container.max_width as i64, MAX_WIDTH_MIN, MAX_WIDTH_MAX),
                    ..container.clone()
                };
            }

            Mutation::UpdateTheme { theme } => {
                next.theme = theme.clone();
            }
        }

        Ok(MutationOutcome {
            document: next,
            inserted_id,
        })
    }

    fn require_element<'a>(
        doc: &'a PopupDocument,
        id: &str,
    ) -> Result<&'a Element, MutationError> {
        doc.find_element(id)
            .ok_or_else(|| MutationError::ElementNotFound(id.to_string()))
    }

    fn require_element_mut<'a>(
        doc: &'a mut PopupDocument,
        id: &str,
    ) -> Result<&'a mut Element, MutationError> {
        doc.find_element_mut(id)
            .ok_or_else(|| MutationError::ElementNotFound(id.to_string()))
    }

    fn check_action(action: &CtaAction) -> Result<(), MutationError> {
        match action {
            CtaAction::Dismiss => Ok(()),
            CtaAction::Url { value } => Self::check_url(value),
        }
    }

    fn check_image_source(source: &ImageSource) -> Result<(), MutationError> {
        match source {
            ImageSource::None => Ok(()),
            ImageSource::Url { url, alt } => {
                Self::check_url(url)?;
                if alt.is_empty() {
                    return Err(MutationError::MissingAltText);
                }
                Ok(())
            }
        }
    }

    fn check_url(value: &str) -> Result<(), MutationError> {
        if Url::parse(value).is_err() {
            return Err(MutationError::InvalidUrl(value.to_string()));
        }
        Ok(())
    }
}
