//! Error types for the editor

use thiserror::Error;

use popdoc_schema::ViolationList;

use crate::mutations::MutationError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("validation error: {0}")]
    Validation(#[from] ViolationList),
}
