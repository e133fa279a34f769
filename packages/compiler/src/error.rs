//! Internal compiler faults.
//!
//! These never escape a document: the pipeline turns them into a `parse-error` diagnostic.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("no field identifier assigned to element #{0}")]
    MissingIdentifier(usize),

    #[error("unbalanced indentation in generated output")]
    UnbalancedIndent,
}

pub type Result<T> = std::result::Result<T, CompileError>;
