//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent hierarchy invariant violations.
/// These are independent of persistence and CLI concerns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// Referenced id is absent from the current flat list (stale client
    /// state); caller should refresh and retry.
    #[error("category not found: {0}")]
    CategoryNotFound(u64),

    /// The requested reparent would make a category its own ancestor.
    /// Permanent rejection for these arguments.
    #[error("cycle detected: moving category {child} under {parent} would make it its own ancestor")]
    CycleDetected { child: u64, parent: u64 },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
