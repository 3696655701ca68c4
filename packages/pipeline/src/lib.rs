//! # Popdoc Pipeline
//!
//! Intake glue between untrusted candidates and the rendering boundary:
//! validate or repair, normalize ordering, refresh warnings, and fall
//! back to deterministic generation when no candidate exists.

pub mod pipeline;

pub use pipeline::{accept, ingest, Ingested, Provenance};
