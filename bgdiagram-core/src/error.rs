use thiserror::Error;

use crate::models::Side;

/// Fatal decode failures; no diagram is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("checker census field must be 26 characters, got {0}")]
    CensusLength(usize),
    #[error("invalid census character {ch:?} at index {index}")]
    CensusChar { index: usize, ch: char },
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{name}` is not numeric: {value:?}")]
    NumericField { name: &'static str, value: String },
}

/// Non-fatal conditions reported alongside an otherwise valid diagram.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagramWarning {
    /// A move token referenced an out-of-range point or had malformed
    /// syntax; the rest of that token is skipped.
    #[error("invalid move token {token:?}: {reason}")]
    InvalidMoveToken { token: String, reason: String },
    /// An `A`/`D`/`P`/`T` segment could not be parsed.
    #[error("invalid annotation {0:?}")]
    InvalidAnnotation(String),
    /// Checker totals exceed 15 for a side; the diagram is still drawn.
    #[error("census invariant violated: {side:?} has {count} checkers")]
    CensusInvariantViolation { side: Side, count: i32 },
    #[error("unknown option flag {0:?}")]
    UnknownOptionFlag(String),
}
