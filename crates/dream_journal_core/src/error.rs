use thiserror::Error;

/// Precondition failures reported by the journal. None of them are recovered locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),
}

pub type JournalResult<T> = Result<T, JournalError>;
