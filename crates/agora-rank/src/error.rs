use thiserror::Error;

use agora_types::TypeError;

#[derive(Debug, Error)]
pub enum RankError {
    /// The requested sort key is not one of the supported criteria.
    #[error("{0} is an invalid sort option")]
    InvalidSortKey(String),

    #[error("type error: {0}")]
    Type(TypeError),

    #[error("store error: {0}")]
    Store(#[from] agora_store::StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] agora_ledger::LedgerError),
}

impl From<TypeError> for RankError {
    fn from(error: TypeError) -> Self {
        match error {
            TypeError::InvalidSortKey(key) => Self::InvalidSortKey(key),
            other => Self::Type(other),
        }
    }
}

pub type RankResult<T> = Result<T, RankError>;
