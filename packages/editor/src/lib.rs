//! # Popdoc Editor
//!
//! Document editing engine for popup documents.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: candidate JSON → typed document     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + typed mutations           │
//! │  - Apply mutations with validation          │
//! │  - Dense ordering under structural edits    │
//! │  - Selection fallback on delete             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer (external): tree walk by order     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **Replacement, not patching**: every mutation yields a new document
//! 2. **Dense ordering**: every structural mutation ends in a reindex
//! 3. **No dangling references**: selection falls back to the container

pub mod errors;
pub mod mutations;
pub mod ordering;
pub mod session;

pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationOutcome};
pub use session::{MutationResult, Selection, Session};
