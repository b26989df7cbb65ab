use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use tracing::debug;

use agora_types::{ItemId, Vote, VoterId};

use crate::audit::LedgerAuditor;
use crate::entry::{LedgerEntry, LedgerEntrySnapshot, ScoredItem, Transition, VoteTally};
use crate::error::LedgerError;
use crate::traits::{VoteReader, VoteWriter};

type SharedEntry = Arc<Mutex<LedgerEntry>>;

/// In-memory vote ledger.
///
/// Entries live in a `DashMap` so that get-or-create is a single atomic step.
/// Each entry sits behind its own `Mutex`: the map shard is held only long
/// enough to fetch the entry handle, and the transition runs under the
/// entry's lock alone.
pub struct InMemoryVoteLedger {
    entries: DashMap<ItemId, SharedEntry>,
    next_seq: AtomicU64,
}

impl InMemoryVoteLedger {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Rebuild a ledger from snapshots, rejecting any that break the vote
    /// invariants.
    pub fn from_snapshot(snapshots: &[LedgerEntrySnapshot]) -> Result<Self, LedgerError> {
        let report = LedgerAuditor::audit(snapshots);
        if let Some(violation) = report.violations.first() {
            return Err(LedgerError::InvariantViolation {
                item: violation.item,
                reason: violation.description.clone(),
            });
        }

        let ledger = Self::new();
        let mut next_seq = 0;
        for snapshot in snapshots {
            let after = snapshot
                .seq
                .checked_add(1)
                .ok_or_else(|| LedgerError::InvariantViolation {
                    item: snapshot.item,
                    reason: format!(
                        "sequence number {} leaves no room for new entries",
                        snapshot.seq
                    ),
                })?;
            next_seq = next_seq.max(after);
            ledger.entries.insert(
                snapshot.item,
                Arc::new(Mutex::new(LedgerEntry::from_snapshot(snapshot))),
            );
        }
        ledger.next_seq.store(next_seq, Ordering::SeqCst);
        Ok(ledger)
    }

    fn get_or_create(&self, item: &ItemId) -> SharedEntry {
        let slot = self.entries.entry(*item).or_insert_with(|| {
            let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
            debug!(item = %item, seq, "ledger entry created");
            Arc::new(Mutex::new(LedgerEntry::new(*item, seq)))
        });
        Arc::clone(slot.value())
    }

    fn existing(&self, item: &ItemId) -> Option<SharedEntry> {
        self.entries.get(item).map(|slot| Arc::clone(slot.value()))
    }

    fn read<T>(
        entry: &SharedEntry,
        item: &ItemId,
        f: impl FnOnce(&LedgerEntry) -> T,
    ) -> Result<T, LedgerError> {
        let guard = entry
            .lock()
            .map_err(|_| LedgerError::LockPoisoned { item: *item })?;
        Ok(f(&*guard))
    }

    fn transition(
        &self,
        item: &ItemId,
        voter: &VoterId,
        to: Vote,
    ) -> Result<Transition, LedgerError> {
        let entry = self.get_or_create(item);
        let transition = {
            let mut guard = entry
                .lock()
                .map_err(|_| LedgerError::LockPoisoned { item: *item })?;
            guard.apply(*voter, to)
        };

        debug!(
            item = %item,
            voter = %voter,
            from = %transition.from,
            to = %transition.to,
            delta = transition.delta,
            score = transition.score,
            "vote transition"
        );
        Ok(transition)
    }
}

impl Default for InMemoryVoteLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl VoteWriter for InMemoryVoteLedger {
    fn upvote(&self, item: &ItemId, voter: &VoterId) -> Result<Transition, LedgerError> {
        self.transition(item, voter, Vote::Up)
    }

    fn downvote(&self, item: &ItemId, voter: &VoterId) -> Result<Transition, LedgerError> {
        self.transition(item, voter, Vote::Down)
    }

    fn unvote(&self, item: &ItemId, voter: &VoterId) -> Result<Transition, LedgerError> {
        self.transition(item, voter, Vote::None)
    }
}

impl VoteReader for InMemoryVoteLedger {
    fn current_vote(&self, voter: &VoterId, item: &ItemId) -> Result<Vote, LedgerError> {
        match self.existing(item) {
            Some(entry) => Self::read(&entry, item, |e| e.vote_of(voter)),
            None => Ok(Vote::None),
        }
    }

    fn score(&self, item: &ItemId) -> Result<i64, LedgerError> {
        let entry = self.get_or_create(item);
        Self::read(&entry, item, LedgerEntry::score)
    }

    fn tally(&self, item: &ItemId) -> Result<VoteTally, LedgerError> {
        match self.existing(item) {
            Some(entry) => Self::read(&entry, item, LedgerEntry::tally),
            None => Ok(VoteTally::default()),
        }
    }

    fn scored(&self, candidates: &[ItemId]) -> Result<Vec<ScoredItem>, LedgerError> {
        let mut seen = HashSet::with_capacity(candidates.len());
        let mut scored = Vec::new();
        for item in candidates {
            if !seen.insert(*item) {
                continue;
            }
            if let Some(entry) = self.existing(item) {
                scored.push(Self::read(&entry, item, LedgerEntry::scored)?);
            }
        }
        Ok(scored)
    }

    fn snapshot(&self) -> Result<Vec<LedgerEntrySnapshot>, LedgerError> {
        let handles: Vec<(ItemId, SharedEntry)> = self
            .entries
            .iter()
            .map(|slot| (*slot.key(), Arc::clone(slot.value())))
            .collect();

        let mut snapshots = handles
            .iter()
            .map(|(item, entry)| Self::read(entry, item, LedgerEntry::snapshot))
            .collect::<Result<Vec<_>, _>>()?;
        snapshots.sort_by_key(|s| (s.seq, s.item));
        Ok(snapshots)
    }

    fn entry_count(&self) -> Result<usize, LedgerError> {
        Ok(self.entries.len())
    }
}
