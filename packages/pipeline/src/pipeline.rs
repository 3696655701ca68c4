//! # Document Pipeline
//!
//! Coordinates the full intake lifecycle:
//! candidate → validate or repair → reindex → lint → accepted document.
//!
//! Two entry points:
//! - [`accept`] for callers that want violations surfaced as data
//! - [`ingest`] for callers that must always end up with a document,
//!   including when the external text-generation call failed or was
//!   cancelled; the deterministic generator is the degraded mode and is
//!   always available
//!
//! An invalid document never crosses this boundary toward a renderer.

use serde_json::Value;
use tracing::{debug, warn};

use popdoc_editor::ordering;
use popdoc_generator::{generate, StyleParams};
use popdoc_linter::apply_warnings;
use popdoc_repair::{repair, EnforcedContext};
use popdoc_schema::{validate, PopupDocument, ViolationList};

/// How an ingested document was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The candidate validated as-is
    Accepted,

    /// The candidate was coerced by the repairer
    Repaired,

    /// No candidate was available; the deterministic generator ran
    Fallback,
}

/// Result of running the intake pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    pub document: PopupDocument,
    pub provenance: Provenance,
}

/// Validate a candidate, normalize ordering and refresh warnings.
/// Callers that want to surface validation errors use this instead of
/// auto-repairing.
pub fn accept(candidate: &Value) -> Result<PopupDocument, ViolationList> {
    let mut document = validate(candidate)?;
    ordering::reindex(&mut document.elements);
    apply_warnings(&mut document);
    Ok(document)
}

/// Always produce a valid document.
///
/// A present candidate is accepted when it validates and repaired when
/// it does not. An absent candidate (external service failure, timeout
/// or caller-side abort) falls back to the deterministic generator; the
/// document is never left unresolved or partially applied.
pub fn ingest(candidate: Option<&Value>, instruction: &str, ctx: &EnforcedContext) -> Ingested {
    match candidate {
        Some(value) => match validate(value) {
            Ok(mut document) => {
                ordering::reindex(&mut document.elements);
                apply_warnings(&mut document);
                Ingested {
                    document,
                    provenance: Provenance::Accepted,
                }
            }
            Err(violations) => {
                debug!(
                    violations = violations.len(),
                    "candidate failed validation, repairing"
                );
                let mut document = repair(value, ctx);
                apply_warnings(&mut document);
                Ingested {
                    document,
                    provenance: Provenance::Repaired,
                }
            }
        },
        None => {
            warn!("no candidate available, generating deterministically");
            let style = StyleParams {
                brand_color: ctx.brand_color.clone(),
                mode: ctx.mode,
                popup_type: ctx.popup_type,
            };
            let mut document = generate(instruction, &style);
            apply_warnings(&mut document);
            Ingested {
                document,
                provenance: Provenance::Fallback,
            }
        }
    }
}
