//! # Popdoc Repair
//!
//! The safety net between "best-effort structured text" and
//! "guaranteed-valid document".
//!
//! Machine-generated candidates (typically from an external
//! text-generation service) must never crash or corrupt a document, so
//! repair degrades per-field rather than failing: everything salvageable
//! is kept, everything else takes a documented fallback, and the result
//! always passes `popdoc_schema::validate` with zero violations.

pub mod repair;

pub use repair::{repair, EnforcedContext};
