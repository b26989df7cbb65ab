//! Record storage for Agora.
//!
//! Topics and responses live in a document store owned by the surrounding
//! application. This crate defines the narrow contract the ranking engine
//! reads through, plus an in-memory backend for tests and embedding.
//!
//! # Record Types
//!
//! - [`Topic`] -- a debate prompt, the parent of top-level responses
//! - [`Response`] -- a pro/con argument targeting a topic or another response
//!
//! # Storage Backends
//!
//! All backends implement the [`RecordStore`] trait:
//!
//! - [`InMemoryRecordStore`] -- `Vec`-backed store preserving insertion order
//!
//! # Design Rules
//!
//! 1. `list` returns records in the store's natural order; rankers treat that
//!    order as the fallback ordering for unranked records.
//! 2. The store never ranks or counts; aggregation happens in `agora-rank`.
//! 3. Infrastructure errors are returned as [`StoreError`] and never retried here.

pub mod error;
pub mod filter;
pub mod memory;
pub mod record;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use filter::RecordFilter;
pub use memory::InMemoryRecordStore;
pub use record::{Record, Response, Topic};
pub use traits::RecordStore;
