//! Domain error types.

use thiserror::Error;

/// Reasons a task could not be split into dated chunks.
///
/// None of these fail a planning run: the task is scheduled as one unsplit unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("task has no deadline")]
    MissingDeadline,

    #[error("invalid deadline '{0}'")]
    InvalidDeadline(String),

    #[error("duration must be positive, got {0} minutes")]
    NonPositiveDuration(i32),

    #[error("chunk arithmetic overflowed for {0} minutes")]
    Overflow(i32),
}

/// Reasons a task proposal was rejected by a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProposalError {
    #[error("title must be non-empty")]
    EmptyTitle,

    #[error("duration must be positive, got {0} minutes")]
    NonPositiveDuration(i32),

    #[error("invalid deadline '{0}' (expected YYYY-MM-DD)")]
    InvalidDeadline(String),
}
