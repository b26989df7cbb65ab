use serde::{Deserialize, Serialize};

/// How the `downvotes` sort key orders items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownvotesMode {
    /// The upvote ordering, reversed.
    #[default]
    ReverseOfUpvotes,
    /// Most downvoters first.
    ByDownvoteCount,
}

/// Tunables of the ranking engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOptions {
    /// Maximum number of records returned by the `random` sort key.
    pub random_sample_limit: usize,
    pub downvotes_mode: DownvotesMode,
    /// When `true`, records with no ledger entry (an implicit score of zero)
    /// lead the `controversial` ordering instead of trailing it.
    pub controversy_unranked_first: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            random_sample_limit: 50,
            downvotes_mode: DownvotesMode::default(),
            controversy_unranked_first: false,
        }
    }
}
