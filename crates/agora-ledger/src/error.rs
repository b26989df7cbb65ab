use agora_types::ItemId;

/// Errors produced by ledger operations.
///
/// Vote operations never report a missing item: the first touch of an
/// unseen item registers it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger entry lock poisoned for item {item}")]
    LockPoisoned { item: ItemId },

    #[error("invariant violation on item {item}: {reason}")]
    InvariantViolation { item: ItemId, reason: String },
}
