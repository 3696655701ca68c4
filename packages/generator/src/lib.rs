//! # Popdoc Generator
//!
//! Deterministic text-to-document generation: the always-available
//! degraded mode behind any external text-generation service.
//!
//! Case-insensitive keyword tables select content along independent
//! axes (image block, secondary CTA, tone, CTA label, urgency and
//! brevity post-processing); style parameters are applied from the
//! caller, never inferred. Output passes the validator by construction,
//! with no repair needed.

pub mod generator;
pub mod rules;

pub use generator::{generate, StyleParams};
