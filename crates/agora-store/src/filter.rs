use agora_types::ItemId;

use crate::record::Record;

/// Equality constraints for [`RecordStore::list`](crate::RecordStore::list).
///
/// An empty filter matches every record. Text search is not a store
/// concern; rankers apply it to the listed records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub parent: Option<ItemId>,
}

impl RecordFilter {
    /// Match every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match records attached to `parent`.
    pub fn by_parent(parent: ItemId) -> Self {
        Self {
            parent: Some(parent),
        }
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match self.parent {
            Some(parent) => record.parent() == Some(parent),
            None => true,
        }
    }
}
