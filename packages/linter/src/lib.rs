//! # Popdoc Linter
//!
//! Advisory diagnostics over already-valid documents.
//!
//! Lint rules never reject or mutate: they compute warnings about
//! content and structure (length thresholds, media region agreement,
//! missing image sources, empty CTA destinations, color format) that a
//! valid document can still exhibit.

pub mod diagnostic;
pub mod linter;
pub mod rules;

pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use linter::{apply_warnings, lint_document, lint_messages, LintOptions};
pub use rules::{LintRule, RuleRegistry};
