//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Input-shape problems found before any tree logic runs.
///
/// Reported once per ingestion attempt with the full diagnostic so the caller
/// can render a single actionable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty input: the sheet has no rows")]
    EmptyInput,

    #[error(
        "missing required columns: [{}]; columns found: [{}]",
        .missing.join(", "),
        .found.join(", ")
    )]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },
}

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid sheet: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type for forest operations.
pub type TreeResult<T> = Result<T, DomainError>;
