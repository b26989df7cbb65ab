use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("topic not found: {0}")]
    TopicNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("rank error: {0}")]
    Rank(#[from] agora_rank::RankError),

    #[error("store error: {0}")]
    Store(#[from] agora_store::StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] agora_ledger::LedgerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
