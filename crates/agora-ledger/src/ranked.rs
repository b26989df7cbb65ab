use std::cmp::Ordering;

use agora_types::ItemId;

use crate::entry::ScoredItem;
use crate::error::LedgerError;
use crate::traits::VoteReader;

/// Orders candidate ids by their ledger scores.
///
/// Only candidates with a ledger entry appear in the output. Ties keep the
/// order in which the entries were created, regardless of later votes.
pub struct RankedIdSource;

impl RankedIdSource {
    /// Highest net score first.
    pub fn by_score_descending<L: VoteReader + ?Sized>(
        ledger: &L,
        candidates: &[ItemId],
    ) -> Result<Vec<ItemId>, LedgerError> {
        Self::ranked(ledger, candidates, |a, b| b.tally.score.cmp(&a.tally.score))
    }

    /// Net score nearest zero first.
    pub fn by_score_ascending_abs<L: VoteReader + ?Sized>(
        ledger: &L,
        candidates: &[ItemId],
    ) -> Result<Vec<ItemId>, LedgerError> {
        Self::ranked(ledger, candidates, |a, b| {
            a.tally.score.unsigned_abs().cmp(&b.tally.score.unsigned_abs())
        })
    }

    /// Most downvoters first.
    pub fn by_downvotes_descending<L: VoteReader + ?Sized>(
        ledger: &L,
        candidates: &[ItemId],
    ) -> Result<Vec<ItemId>, LedgerError> {
        Self::ranked(ledger, candidates, |a, b| {
            b.tally.downvotes.cmp(&a.tally.downvotes)
        })
    }

    fn ranked<L, F>(ledger: &L, candidates: &[ItemId], order: F) -> Result<Vec<ItemId>, LedgerError>
    where
        L: VoteReader + ?Sized,
        F: Fn(&ScoredItem, &ScoredItem) -> Ordering,
    {
        let mut scored = ledger.scored(candidates)?;
        scored.sort_by(|a, b| order(a, b).then(a.seq.cmp(&b.seq)));
        Ok(scored.into_iter().map(|s| s.item).collect())
    }
}
