//! Vote ledger for Agora.
//!
//! This crate owns every user's stance on every votable item. It provides:
//! - [`LedgerEntry`]: the per-item up/down voter sets and their net score
//! - `VoteWriter` / `VoteReader` trait boundaries
//! - [`InMemoryVoteLedger`], locking each item independently
//! - [`RankedIdSource`]: candidate ids ordered by score or by |score|
//! - Snapshots and the [`LedgerAuditor`] invariant check
//!
//! Every mutation is a single transition of one `(item, voter)` pair between
//! `None`, `Up` and `Down`. The net score of an item always equals the
//! number of upvoters minus the number of downvoters, and no voter is ever in
//! both sets.

pub mod audit;
pub mod entry;
pub mod error;
pub mod memory;
pub mod ranked;
pub mod traits;

pub use audit::{AuditReport, LedgerAuditor, Violation, ViolationKind};
pub use entry::{LedgerEntry, LedgerEntrySnapshot, ScoredItem, Transition, VoteTally};
pub use error::LedgerError;
pub use memory::InMemoryVoteLedger;
pub use ranked::RankedIdSource;
pub use traits::{VoteReader, VoteWriter};
