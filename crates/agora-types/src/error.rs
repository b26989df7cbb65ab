use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("{0} is an invalid sort option")]
    InvalidSortKey(String),

    #[error("invalid vote label: {0}")]
    InvalidVote(String),
}
