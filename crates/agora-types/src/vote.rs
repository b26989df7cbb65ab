use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A voter's current stance on one item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    #[default]
    None,
    Up,
    Down,
}

impl Vote {
    /// Contribution of this stance to the item's net score.
    pub fn weight(self) -> i64 {
        match self {
            Self::None => 0,
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    /// The label used on the wire: `upvote`, `downvote` or `none`.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Up => "upvote",
            Self::Down => "downvote",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Vote {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "upvote" | "up" => Ok(Self::Up),
            "downvote" | "down" => Ok(Self::Down),
            other => Err(TypeError::InvalidVote(other.to_string())),
        }
    }
}

/// Direction of a cast vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl From<Direction> for Vote {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Vote::Up,
            Direction::Down => Vote::Down,
        }
    }
}
