use agora_types::ItemId;

use crate::error::StoreResult;
use crate::filter::RecordFilter;
use crate::record::Record;

/// Document store holding one kind of record.
///
/// All implementations must satisfy these invariants:
/// - `list` returns records in a stable natural order (the order rankers
///   fall back to for records they do not rank).
/// - Identifiers are unique within a store.
/// - Backend failures are returned as errors, never swallowed or retried.
pub trait RecordStore<R: Record>: Send + Sync {
    /// Point lookup. Returns `Ok(None)` if no record has this id.
    fn get(&self, id: &ItemId) -> StoreResult<Option<R>>;

    /// Filtered scan in natural order.
    fn list(&self, filter: &RecordFilter) -> StoreResult<Vec<R>>;

    /// Add a record. Fails with `StoreError::Duplicate` if the id is taken.
    fn insert(&self, record: R) -> StoreResult<()>;

    /// Remove a record by id. Returns `true` if it existed.
    fn remove(&self, id: &ItemId) -> StoreResult<bool>;

    /// Records attached to `parent`, in natural order.
    fn list_by_parent(&self, parent: &ItemId) -> StoreResult<Vec<R>> {
        self.list(&RecordFilter::by_parent(*parent))
    }

    /// First record whose title equals `title` exactly.
    fn find_by_title(&self, title: &str) -> StoreResult<Option<R>> {
        Ok(self
            .list(&RecordFilter::all())?
            .into_iter()
            .find(|record| record.title() == title))
    }
}
