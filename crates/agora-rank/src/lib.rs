//! Ranking for Agora topics and responses.
//!
//! A caller picks a [`SortKey`](agora_types::SortKey) and a candidate
//! universe (optionally narrowed by a title search). The engine obtains a
//! partial ranking from the vote ledger or the [`EngagementIndex`], then the
//! [`ResultMerger`] reconciles it with the full universe: ranked records
//! first in rank order, then every remaining record in store order, each
//! exactly once.

pub mod engagement;
pub mod engine;
pub mod error;
pub mod merge;
pub mod options;

pub use engagement::{EngagementEntry, EngagementIndex};
pub use engine::{RankRequest, RankingEngine};
pub use error::{RankError, RankResult};
pub use merge::{Placement, ResultMerger};
pub use options::{DownvotesMode, RankOptions};
