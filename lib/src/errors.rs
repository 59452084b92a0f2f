use thiserror::Error;

use crate::ExprId;

/// Errors returned while building or matching regular languages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A derivative was requested with respect to something that is not
    /// exactly one character.
    #[error("expected a single character, got {0:?}")]
    NotSingleChar(String),

    /// A character range whose lower bound is greater than its upper bound.
    #[error("invalid range [{from}-{to}], `{from}` is greater than `{to}`")]
    InvalidRange {
        /// Lower bound.
        from: char,
        /// Upper bound.
        to: char,
    },

    /// The derivative of a repetition with an infinite count was requested.
    /// Such repetitions must be simplified into `L*` first.
    #[error("repetition count must be a finite non-negative integer")]
    UnboundedRepetition,

    /// An expression reaches a reference that was declared but never
    /// defined.
    #[error("reference {0} is used but never defined")]
    UndefinedReference(ExprId),

    /// A reference that is already defined was defined again.
    #[error("reference {0} is already defined")]
    AlreadyDefined(ExprId),

    /// An expression that is not a reference was used as one.
    #[error("{0} is not a reference")]
    NotAReference(ExprId),
}
