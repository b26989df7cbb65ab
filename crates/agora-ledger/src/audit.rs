use std::collections::HashSet;

use agora_types::ItemId;

use crate::entry::LedgerEntrySnapshot;
use crate::error::LedgerError;
use crate::traits::VoteReader;

/// Result of a ledger audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditReport {
    pub entry_count: usize,
    pub violations: Vec<Violation>,
}

impl AuditReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific invariant violation found by the audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub item: ItemId,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    ScoreMismatch,
    VoterInBothSets,
    DuplicateVoter,
    DuplicateItem,
}

/// Checks ledger entries against the vote invariants.
pub struct LedgerAuditor;

impl LedgerAuditor {
    /// Audit a list of entry snapshots.
    pub fn audit(entries: &[LedgerEntrySnapshot]) -> AuditReport {
        let mut violations = Vec::new();
        let mut seen_items = HashSet::new();

        for entry in entries {
            if !seen_items.insert(entry.item) {
                violations.push(Violation {
                    item: entry.item,
                    kind: ViolationKind::DuplicateItem,
                    description: "item appears in more than one entry".into(),
                });
            }

            let upvoters: HashSet<_> = entry.upvoters.iter().collect();
            let downvoters: HashSet<_> = entry.downvoters.iter().collect();
            if upvoters.len() != entry.upvoters.len() || downvoters.len() != entry.downvoters.len() {
                violations.push(Violation {
                    item: entry.item,
                    kind: ViolationKind::DuplicateVoter,
                    description: "voter listed twice in the same set".into(),
                });
            }

            if let Some(voter) = upvoters.intersection(&downvoters).next() {
                violations.push(Violation {
                    item: entry.item,
                    kind: ViolationKind::VoterInBothSets,
                    description: format!("voter {voter} both upvotes and downvotes"),
                });
            }

            let expected = upvoters.len() as i64 - downvoters.len() as i64;
            if entry.score != expected {
                violations.push(Violation {
                    item: entry.item,
                    kind: ViolationKind::ScoreMismatch,
                    description: format!("expected score {expected}, found {}", entry.score),
                });
            }
        }

        AuditReport {
            entry_count: entries.len(),
            violations,
        }
    }

    /// Audit every entry of a live ledger.
    pub fn audit_ledger<L: VoteReader + ?Sized>(ledger: &L) -> Result<AuditReport, LedgerError> {
        Ok(Self::audit(&ledger.snapshot()?))
    }
}
