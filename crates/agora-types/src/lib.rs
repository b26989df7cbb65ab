//! Foundation types for Agora.
//!
//! Every other Agora crate depends on `agora-types`.
//!
//! # Key Types
//!
//! - [`ItemId`] -- Opaque identifier of a topic or response (UUID v7)
//! - [`VoterId`] -- Opaque identifier of a voting user (UUID v7)
//! - [`Vote`] -- A voter's current stance on an item: none, up or down
//! - [`Direction`] -- The direction of a cast vote
//! - [`SortKey`] -- The closed set of ranking criteria

pub mod error;
pub mod id;
pub mod sort;
pub mod vote;

pub use error::TypeError;
pub use id::{ItemId, VoterId};
pub use sort::SortKey;
pub use vote::{Direction, Vote};
