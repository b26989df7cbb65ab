use agora_types::{Direction, ItemId, Vote, VoterId};

use crate::entry::{LedgerEntrySnapshot, ScoredItem, Transition, VoteTally};
use crate::error::LedgerError;

/// Write boundary for vote transitions.
///
/// Each call registers `item` on first touch and applies its transition as
/// one indivisible step for that item. Calls on different items never wait
/// on each other.
pub trait VoteWriter: Send + Sync {
    fn upvote(&self, item: &ItemId, voter: &VoterId) -> Result<Transition, LedgerError>;

    fn downvote(&self, item: &ItemId, voter: &VoterId) -> Result<Transition, LedgerError>;

    fn unvote(&self, item: &ItemId, voter: &VoterId) -> Result<Transition, LedgerError>;

    fn cast(
        &self,
        item: &ItemId,
        voter: &VoterId,
        direction: Direction,
    ) -> Result<Transition, LedgerError> {
        match direction {
            Direction::Up => self.upvote(item, voter),
            Direction::Down => self.downvote(item, voter),
        }
    }
}

/// Read boundary for vote state and ranking inputs.
pub trait VoteReader: Send + Sync {
    /// The voter's stance on `item`; `Vote::None` for unseen items.
    fn current_vote(&self, voter: &VoterId, item: &ItemId) -> Result<Vote, LedgerError>;

    /// Net score of `item`, registering it with score 0 if unseen.
    fn score(&self, item: &ItemId) -> Result<i64, LedgerError>;

    /// Vote counts of `item`; all zero for unseen items.
    fn tally(&self, item: &ItemId) -> Result<VoteTally, LedgerError>;

    /// Ranking inputs for each candidate that has a ledger entry.
    ///
    /// Candidates without an entry are left out. Each entry is read under its
    /// own lock; there is no snapshot across entries.
    fn scored(&self, candidates: &[ItemId]) -> Result<Vec<ScoredItem>, LedgerError>;

    /// Every entry, in creation order.
    fn snapshot(&self) -> Result<Vec<LedgerEntrySnapshot>, LedgerError>;

    fn entry_count(&self) -> Result<usize, LedgerError>;
}
