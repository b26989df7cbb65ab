//! High-level SDK for Agora.
//!
//! [`Agora`] bundles a topic store, a response store and a vote ledger, and
//! exposes the operations route handlers call: ranking topics and responses,
//! casting and retracting votes, and reading stances and scores.

pub mod agora;
pub mod config;
pub mod error;

pub use agora::Agora;
pub use config::EngineConfig;
pub use error::{SdkError, SdkResult};

// Re-export key types
pub use agora_ledger::{AuditReport, LedgerEntrySnapshot, Transition, VoteTally};
pub use agora_rank::{DownvotesMode, RankOptions};
pub use agora_store::{Response, Topic};
pub use agora_types::{Direction, ItemId, SortKey, Vote, VoterId};
