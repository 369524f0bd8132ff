//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed input or broken structural invariants.
///
/// A split that lands outside both child discs is not an error; it is
/// reported as [`SplitOutcome::Rejected`](crate::domain::SplitOutcome::Rejected).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid event on line {line}: {message}")]
    InvalidEvent { line: usize, message: String },

    #[error("weight mismatch at depth {depth}: stored {stored}, expected {expected}")]
    WeightMismatch {
        depth: usize,
        stored: usize,
        expected: usize,
    },
}
