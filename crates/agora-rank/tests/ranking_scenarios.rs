//! End-to-end ranking over in-memory stores, plus store failure propagation.

use agora_ledger::InMemoryVoteLedger;
use agora_rank::{EngagementIndex, RankError, RankOptions, RankRequest, RankingEngine};
use agora_store::{
    InMemoryRecordStore, RecordFilter, RecordStore, Response, StoreError, StoreResult, Topic,
};
use agora_types::{ItemId, SortKey, VoterId};

fn topic(title: &str) -> Topic {
    Topic::new(VoterId::new(), title, "")
}

fn replies(store: &InMemoryRecordStore<Response>, target: ItemId, n: usize) {
    for i in 0..n {
        store
            .insert(Response::new(VoterId::new(), format!("reply {i}"), "", target))
            .unwrap();
    }
}

#[test]
fn engagement_ranks_topics_and_appends_childless_ones() {
    let (t1, t2, t3) = (topic("T1 vs. X"), topic("T2 vs. X"), topic("T3 vs. X"));
    let topics = InMemoryRecordStore::from_records([t1.clone(), t2.clone(), t3.clone()]).unwrap();
    let responses = InMemoryRecordStore::new();
    replies(&responses, t1.id, 2);
    replies(&responses, t3.id, 5);

    let ledger = InMemoryVoteLedger::new();
    let engine = RankingEngine::new(&ledger, RankOptions::default());
    let ranked = engine
        .rank(&RankRequest::new(SortKey::Engagement), &topics, &responses)
        .unwrap();

    let ids: Vec<_> = ranked.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![t3.id, t1.id, t2.id]);
}

#[test]
fn engagement_with_search_only_sees_matching_topics() {
    let (cats, dogs, tea) = (topic("Cats vs. Dogs"), topic("Dogs vs. Wolves"), topic("Tea vs. Coffee"));
    let topics =
        InMemoryRecordStore::from_records([cats.clone(), dogs.clone(), tea.clone()]).unwrap();
    let responses = InMemoryRecordStore::new();
    replies(&responses, tea.id, 9);
    replies(&responses, cats.id, 1);
    replies(&responses, dogs.id, 3);

    let ledger = InMemoryVoteLedger::new();
    let engine = RankingEngine::new(&ledger, RankOptions::default());
    let request = RankRequest::new(SortKey::Engagement).search(Some("dogs"));
    let ranked = engine.rank(&request, &topics, &responses).unwrap();

    let ids: Vec<_> = ranked.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![dogs.id, cats.id]);
}

#[test]
fn deleted_parent_is_skipped() {
    let (kept, gone) = (topic("Kept vs. X"), topic("Gone vs. X"));
    let topics = InMemoryRecordStore::from_records([kept.clone(), gone.clone()]).unwrap();
    let responses = InMemoryRecordStore::new();
    replies(&responses, gone.id, 4);
    topics.remove(&gone.id).unwrap();

    let ledger = InMemoryVoteLedger::new();
    let engine = RankingEngine::new(&ledger, RankOptions::default());
    let ranked = engine
        .rank(&RankRequest::new(SortKey::Engagement), &topics, &responses)
        .unwrap();
    assert_eq!(ranked, vec![kept]);
    assert_eq!(EngagementIndex::ranked_parents(&responses).unwrap(), vec![gone.id]);
}

/// Store whose every call fails, standing in for an unreachable backend.
struct OfflineStore;

impl RecordStore<Response> for OfflineStore {
    fn get(&self, _id: &ItemId) -> StoreResult<Option<Response>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn list(&self, _filter: &RecordFilter) -> StoreResult<Vec<Response>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn insert(&self, _record: Response) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    fn remove(&self, _id: &ItemId) -> StoreResult<bool> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[test]
fn store_failures_propagate() {
    let topics = InMemoryRecordStore::from_records([topic("A vs. B")]).unwrap();
    let ledger = InMemoryVoteLedger::new();
    let engine = RankingEngine::new(&ledger, RankOptions::default());

    let err = engine
        .rank(&RankRequest::new(SortKey::Engagement), &topics, &OfflineStore)
        .unwrap_err();
    assert!(matches!(err, RankError::Store(StoreError::Unavailable(_))));

    let err = engine
        .rank(&RankRequest::new(SortKey::Newest), &OfflineStore, &OfflineStore)
        .unwrap_err();
    assert!(matches!(err, RankError::Store(_)));
}
