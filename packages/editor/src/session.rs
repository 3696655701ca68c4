//! # Editing Session
//!
//! Holds the current document value, a monotonically increasing version,
//! the caller's selection and the element id generator.
//!
//! The document is immutable-by-replacement: every accepted mutation
//! swaps in a new value, so a renderer holding the previous value never
//! observes a half-applied edit. Selection follows the same discipline:
//! deleting the selected element falls back to the container, never to a
//! dangling id.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use popdoc_schema::{validate, IdGenerator, PopupDocument};

use crate::errors::EditorError;
use crate::mutations::Mutation;

/// What the caller currently has selected in the editor surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Container,
    Element(String),
}

/// Result of applying a mutation through a session
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Id of an element created by this mutation, if any
    pub inserted_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Session {
    document: PopupDocument,
    version: u64,
    selection: Selection,
    ids: IdGenerator,
}

impl Session {
    /// Start a session over an already-valid document.
    pub fn new(document: PopupDocument) -> Self {
        Self {
            document,
            version: 0,
            selection: Selection::Container,
            ids: IdGenerator::new("session"),
        }
    }

    /// Start a session from an untrusted candidate value. Validation
    /// failures surface as data; nothing is repaired here.
    pub fn from_candidate(candidate: &Value) -> Result<Self, EditorError> {
        let document = validate(candidate)?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &PopupDocument {
        &self.document
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn select_container(&mut self) {
        self.selection = Selection::Container;
    }

    /// Select an element. Unknown ids leave the selection unchanged and
    /// report false.
    pub fn select_element(&mut self, id: &str) -> bool {
        if self.document.contains_id(id) {
            self.selection = Selection::Element(id.to_string());
            true
        } else {
            false
        }
    }

    /// Replace the whole document (a regeneration). Resets selection to
    /// the container and bumps the version.
    pub fn replace_document(&mut self, document: PopupDocument) {
        self.document = document;
        self.version += 1;
        self.selection = Selection::Container;
    }

    /// Apply a mutation. On success the session holds the replacement
    /// document; on failure it is left exactly as it was.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let outcome = mutation.apply(&self.document, &mut self.ids)?;

        self.document = outcome.document;
        self.version += 1;

        // Selection must never dangle.
        if let Selection::Element(id) = &self.selection {
            if !self.document.contains_id(id) {
                self.selection = Selection::Container;
            }
        }
        if let Some(id) = &outcome.inserted_id {
            self.selection = Selection::Element(id.clone());
        }

        Ok(MutationResult {
            version: self.version,
            inserted_id: outcome.inserted_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use popdoc_schema::{Element, ElementType, Mode, PopupType};

    fn session_with_elements() -> Session {
        let mut doc = PopupDocument::empty(PopupType::Modal, Mode::Light, "#2563EB");
        let mut a = Element::new_text("a");
        a.order = 10;
        let mut b = Element::new_cta("b");
        b.order = 20;
        doc.elements.push(a);
        doc.elements.push(b);
        Session::new(doc)
    }

    #[test]
    fn version_increments_only_on_success() {
        let mut session = session_with_elements();
        assert_eq!(session.version(), 0);

        session
            .apply(Mutation::RemoveElement {
                element_id: "a".to_string(),
            })
            .unwrap();
        assert_eq!(session.version(), 1);

        let err = session.apply(Mutation::RenameElement {
            element_id: "ghost".to_string(),
            name: "x".to_string(),
        });
        assert!(err.is_err());
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn deleting_selected_element_falls_back_to_container() {
        let mut session = session_with_elements();
        assert!(session.select_element("a"));

        session
            .apply(Mutation::RemoveElement {
                element_id: "a".to_string(),
            })
            .unwrap();

        assert_eq!(session.selection(), &Selection::Container);
    }

    #[test]
    fn append_selects_the_new_element() {
        let mut session = session_with_elements();
        let result = session
            .apply(Mutation::AppendElement {
                element_type: ElementType::Image,
            })
            .unwrap();

        let inserted = result.inserted_id.unwrap();
        assert_eq!(session.selection(), &Selection::Element(inserted));
    }

    #[test]
    fn selecting_unknown_id_is_refused() {
        let mut session = session_with_elements();
        assert!(!session.select_element("ghost"));
        assert_eq!(session.selection(), &Selection::Container);
    }

    #[test]
    fn from_candidate_rejects_invalid_input() {
        let candidate = serde_json::json!({"version": "9.9"});
        assert!(Session::from_candidate(&candidate).is_err());
    }
}
