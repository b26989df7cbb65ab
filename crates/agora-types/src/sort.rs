use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Ranking criterion for a list of topics or responses.
///
/// The set is closed: unknown names are rejected when parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recently updated first.
    Newest,
    /// Uniform random sample.
    Random,
    /// Most child responses first.
    Engagement,
    /// Highest net score first.
    Upvotes,
    /// Reverse of the upvote ordering.
    Downvotes,
    /// Net score nearest zero first.
    Controversial,
}

impl SortKey {
    /// Every sort key, in declaration order.
    pub const ALL: [SortKey; 6] = [
        Self::Newest,
        Self::Random,
        Self::Engagement,
        Self::Upvotes,
        Self::Downvotes,
        Self::Controversial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Random => "random",
            Self::Engagement => "engagement",
            Self::Upvotes => "upvotes",
            Self::Downvotes => "downvotes",
            Self::Controversial => "controversial",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| TypeError::InvalidSortKey(s.to_string()))
    }
}
