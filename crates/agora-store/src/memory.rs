use std::sync::RwLock;

use agora_types::ItemId;

use crate::error::{StoreError, StoreResult};
use crate::filter::RecordFilter;
use crate::record::Record;
use crate::traits::RecordStore;

/// In-memory record store.
///
/// Records are kept in insertion order behind a `RwLock`, which is the
/// natural order `list` reports. Intended for tests and embedding.
pub struct InMemoryRecordStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R> InMemoryRecordStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R: Record> InMemoryRecordStore<R> {
    /// Build a store from records in the given order.
    ///
    /// Later records whose id repeats an earlier one are rejected.
    pub fn from_records(records: impl IntoIterator<Item = R>) -> StoreResult<Self> {
        let store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E>(_: E) -> StoreError {
    StoreError::Unavailable("record store lock poisoned".into())
}

impl<R: Record> RecordStore<R> for InMemoryRecordStore<R> {
    fn get(&self, id: &ItemId) -> StoreResult<Option<R>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.iter().find(|r| r.id() == *id).cloned())
    }

    fn list(&self, filter: &RecordFilter) -> StoreResult<Vec<R>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.iter().filter(|r| filter.matches(*r)).cloned().collect())
    }

    fn insert(&self, record: R) -> StoreResult<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        let id = record.id();
        if records.iter().any(|r| r.id() == id) {
            return Err(StoreError::Duplicate(id));
        }
        records.push(record);
        tracing::debug!(record = %id, "record inserted");
        Ok(())
    }

    fn remove(&self, id: &ItemId) -> StoreResult<bool> {
        let mut records = self.records.write().map_err(poisoned)?;
        let before = records.len();
        records.retain(|r| r.id() != *id);
        Ok(records.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Response, Topic};
    use agora_types::VoterId;

    fn topic(title: &str) -> Topic {
        Topic::new(VoterId::new(), title, "")
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = InMemoryRecordStore::new();
        let a = topic("A vs. B");
        let b = topic("C vs. D");
        let c = topic("E vs. F");
        store.insert(b.clone()).unwrap();
        store.insert(a.clone()).unwrap();
        store.insert(c.clone()).unwrap();

        let listed = store.list(&RecordFilter::all()).unwrap();
        assert_eq!(listed, vec![b, a, c]);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let store = InMemoryRecordStore::new();
        let t = topic("A vs. B");
        store.insert(t.clone()).unwrap();
        let err = store.insert(t.clone()).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(id) if id == t.id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_and_remove() {
        let store = InMemoryRecordStore::new();
        let t = topic("A vs. B");
        store.insert(t.clone()).unwrap();

        assert_eq!(store.get(&t.id).unwrap(), Some(t.clone()));
        assert!(store.remove(&t.id).unwrap());
        assert!(!store.remove(&t.id).unwrap());
        assert!(store.get(&t.id).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn list_by_parent_filters_targets() {
        let store = InMemoryRecordStore::new();
        let t1 = ItemId::new();
        let t2 = ItemId::new();
        let r1 = Response::new(VoterId::new(), "one", "x", t1);
        let r2 = Response::new(VoterId::new(), "two", "x", t2);
        let r3 = Response::new(VoterId::new(), "three", "x", t1);
        for r in [&r1, &r2, &r3] {
            store.insert(r.clone()).unwrap();
        }

        assert_eq!(store.list_by_parent(&t1).unwrap(), vec![r1, r3]);
        assert_eq!(store.list_by_parent(&t2).unwrap(), vec![r2]);
        assert!(store.list_by_parent(&ItemId::new()).unwrap().is_empty());
    }

    #[test]
    fn find_by_title_is_exact() {
        let store = InMemoryRecordStore::from_records([topic("Cats vs. Dogs")]).unwrap();
        assert!(store.find_by_title("Cats vs. Dogs").unwrap().is_some());
        assert!(store.find_by_title("cats vs. dogs").unwrap().is_none());
    }
}
