use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use agora_types::{ItemId, Vote, VoterId};

/// Vote state of a single item.
///
/// `score == upvoters.len() - downvoters.len()` holds after every
/// [`apply`](Self::apply), and the two voter sets are disjoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerEntry {
    item: ItemId,
    seq: u64,
    upvoters: HashSet<VoterId>,
    downvoters: HashSet<VoterId>,
    score: i64,
}

impl LedgerEntry {
    /// An empty entry. `seq` records the order entries were created in.
    pub fn new(item: ItemId, seq: u64) -> Self {
        Self {
            item,
            seq,
            upvoters: HashSet::new(),
            downvoters: HashSet::new(),
            score: 0,
        }
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn vote_of(&self, voter: &VoterId) -> Vote {
        if self.upvoters.contains(voter) {
            Vote::Up
        } else if self.downvoters.contains(voter) {
            Vote::Down
        } else {
            Vote::None
        }
    }

    /// Move `voter` to the `to` state, updating membership and score together.
    ///
    /// Moving to the current state changes nothing.
    pub fn apply(&mut self, voter: VoterId, to: Vote) -> Transition {
        let from = self.vote_of(&voter);
        if from != to {
            match from {
                Vote::Up => {
                    self.upvoters.remove(&voter);
                }
                Vote::Down => {
                    self.downvoters.remove(&voter);
                }
                Vote::None => {}
            }
            match to {
                Vote::Up => {
                    self.upvoters.insert(voter);
                }
                Vote::Down => {
                    self.downvoters.insert(voter);
                }
                Vote::None => {}
            }
            self.score += to.weight() - from.weight();
        }

        Transition {
            item: self.item,
            voter,
            from,
            to,
            delta: to.weight() - from.weight(),
            score: self.score,
        }
    }

    pub fn tally(&self) -> VoteTally {
        VoteTally {
            upvotes: self.upvoters.len(),
            downvotes: self.downvoters.len(),
            score: self.score,
        }
    }

    pub fn scored(&self) -> ScoredItem {
        ScoredItem {
            item: self.item,
            seq: self.seq,
            tally: self.tally(),
        }
    }

    /// Serializable copy with voters in sorted order.
    pub fn snapshot(&self) -> LedgerEntrySnapshot {
        let mut upvoters: Vec<_> = self.upvoters.iter().copied().collect();
        let mut downvoters: Vec<_> = self.downvoters.iter().copied().collect();
        upvoters.sort();
        downvoters.sort();
        LedgerEntrySnapshot {
            item: self.item,
            seq: self.seq,
            upvoters,
            downvoters,
            score: self.score,
        }
    }

    /// Rebuild an entry from a snapshot without checking invariants.
    ///
    /// Callers validate with [`LedgerAuditor`](crate::LedgerAuditor) first.
    pub(crate) fn from_snapshot(snapshot: &LedgerEntrySnapshot) -> Self {
        Self {
            item: snapshot.item,
            seq: snapshot.seq,
            upvoters: snapshot.upvoters.iter().copied().collect(),
            downvoters: snapshot.downvoters.iter().copied().collect(),
            score: snapshot.score,
        }
    }
}

/// The outcome of one vote operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub item: ItemId,
    pub voter: VoterId,
    pub from: Vote,
    pub to: Vote,
    /// Change applied to the item's score.
    pub delta: i64,
    /// Score after the transition.
    pub score: i64,
}

impl Transition {
    /// Returns `true` if the voter was already in the target state.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Vote counts of one item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub upvotes: usize,
    pub downvotes: usize,
    pub score: i64,
}

/// A ledger entry's ranking inputs, read under its lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredItem {
    pub item: ItemId,
    pub seq: u64,
    pub tally: VoteTally,
}

/// Serializable form of a [`LedgerEntry`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntrySnapshot {
    pub item: ItemId,
    pub seq: u64,
    #[serde(default)]
    pub upvoters: Vec<VoterId>,
    #[serde(default)]
    pub downvoters: Vec<VoterId>,
    pub score: i64,
}
