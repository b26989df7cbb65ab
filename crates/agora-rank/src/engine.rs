use tracing::debug;

use agora_ledger::{RankedIdSource, VoteReader};
use agora_store::{Record, RecordFilter, RecordStore};
use agora_types::{ItemId, SortKey};

use crate::engagement::EngagementIndex;
use crate::error::RankResult;
use crate::merge::{Placement, ResultMerger};
use crate::options::{DownvotesMode, RankOptions};

/// One ranking query: a sort key over the records matching `filter`,
/// optionally narrowed to titles containing `search`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankRequest {
    pub sort: SortKey,
    pub filter: RecordFilter,
    pub search: Option<String>,
}

impl RankRequest {
    pub fn new(sort: SortKey) -> Self {
        Self {
            sort,
            filter: RecordFilter::all(),
            search: None,
        }
    }

    /// Parse the sort key from its name, rejecting unknown names.
    pub fn parse(sort: &str) -> RankResult<Self> {
        Ok(Self::new(sort.parse::<SortKey>()?))
    }

    /// Restrict the universe to records attached to `parent`.
    pub fn within(mut self, parent: ItemId) -> Self {
        self.filter.parent = Some(parent);
        self
    }

    pub fn search(mut self, pattern: Option<impl Into<String>>) -> Self {
        self.search = pattern.map(Into::into);
        self
    }
}

/// Dispatches sort keys to their ranking sources and merges the result with
/// the candidate universe.
pub struct RankingEngine<'a, L: ?Sized> {
    ledger: &'a L,
    options: RankOptions,
}

impl<'a, L: VoteReader + ?Sized> RankingEngine<'a, L> {
    pub fn new(ledger: &'a L, options: RankOptions) -> Self {
        Self { ledger, options }
    }

    /// Rank the records of `candidates` that match the request.
    ///
    /// `children` is the store whose records point at candidates as their
    /// parent; it feeds the `engagement` ordering.
    pub fn rank<E, S, C, K>(
        &self,
        request: &RankRequest,
        candidates: &S,
        children: &K,
    ) -> RankResult<Vec<E>>
    where
        E: Record,
        S: RecordStore<E> + ?Sized,
        C: Record,
        K: RecordStore<C> + ?Sized,
    {
        let mut universe = candidates.list(&request.filter)?;
        if let Some(pattern) = request.search.as_deref() {
            universe = ResultMerger::filtered_by_text_match(universe, pattern, |e| e.title());
        }
        let universe_size = universe.len();

        let ranked = match request.sort {
            SortKey::Newest => {
                universe.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
                universe
            }
            SortKey::Random => {
                let limit = self.options.random_sample_limit;
                let mut rng = rand::thread_rng();
                match request.filter.parent {
                    Some(parent) => {
                        ResultMerger::random_sample_filtered(universe, &parent, limit, &mut rng)
                    }
                    None => ResultMerger::random_sample(universe, limit, &mut rng),
                }
            }
            SortKey::Engagement => {
                let order = EngagementIndex::ranked_parents::<C, K>(children)?;
                ResultMerger::reconcile(&order, universe, |e| e.id())
            }
            SortKey::Upvotes => {
                let order = RankedIdSource::by_score_descending(self.ledger, &ids(&universe))?;
                ResultMerger::reconcile(&order, universe, |e| e.id())
            }
            SortKey::Downvotes => {
                let candidates = ids(&universe);
                let order = match self.options.downvotes_mode {
                    DownvotesMode::ReverseOfUpvotes => {
                        let mut order =
                            RankedIdSource::by_score_descending(self.ledger, &candidates)?;
                        order.reverse();
                        order
                    }
                    DownvotesMode::ByDownvoteCount => {
                        RankedIdSource::by_downvotes_descending(self.ledger, &candidates)?
                    }
                };
                ResultMerger::reconcile(&order, universe, |e| e.id())
            }
            SortKey::Controversial => {
                let order = RankedIdSource::by_score_ascending_abs(self.ledger, &ids(&universe))?;
                let placement = if self.options.controversy_unranked_first {
                    Placement::UnrankedFirst
                } else {
                    Placement::RankedFirst
                };
                ResultMerger::reconcile_with(&order, universe, |e| e.id(), placement)
            }
        };

        debug!(
            sort = %request.sort,
            universe = universe_size,
            returned = ranked.len(),
            "ranked records"
        );
        Ok(ranked)
    }
}

fn ids<E: Record>(records: &[E]) -> Vec<ItemId> {
    records.iter().map(Record::id).collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use agora_ledger::{InMemoryVoteLedger, VoteWriter};
    use agora_store::{InMemoryRecordStore, Response, Topic};
    use agora_types::VoterId;

    use super::*;
    use crate::error::RankError;

    struct Fixture {
        topic: Topic,
        topics: InMemoryRecordStore<Topic>,
        responses: InMemoryRecordStore<Response>,
        ledger: InMemoryVoteLedger,
        items: Vec<Response>,
    }

    /// One topic with four responses, inserted oldest first, scored
    /// `[2, -1, 0, <no entry>]`.
    fn fixture() -> Fixture {
        let topic = Topic::new(VoterId::new(), "Cats vs. Dogs", "");
        let topics = InMemoryRecordStore::from_records([topic.clone()]).unwrap();
        let responses = InMemoryRecordStore::new();
        let start = Utc::now() - Duration::hours(1);
        let titles = ["Cats purr", "Dogs fetch", "Cats nap", "Dogs guard"];
        let items: Vec<_> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let mut r = Response::new(VoterId::new(), *title, "", topic.id);
                r.updated_at = start + Duration::minutes(i as i64);
                r
            })
            .collect();
        for r in &items {
            responses.insert(r.clone()).unwrap();
        }

        let ledger = InMemoryVoteLedger::new();
        ledger.upvote(&items[0].id, &VoterId::new()).unwrap();
        ledger.upvote(&items[0].id, &VoterId::new()).unwrap();
        ledger.downvote(&items[1].id, &VoterId::new()).unwrap();
        ledger.unvote(&items[2].id, &VoterId::new()).unwrap();

        Fixture { topic, topics, responses, ledger, items }
    }

    fn titles(records: &[Response]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    fn rank(f: &Fixture, options: RankOptions, sort: SortKey) -> Vec<Response> {
        let engine = RankingEngine::new(&f.ledger, options);
        let request = RankRequest::new(sort).within(f.topic.id);
        engine.rank(&request, &f.responses, &f.responses).unwrap()
    }

    #[test]
    fn newest_is_updated_descending() {
        let f = fixture();
        let ranked = rank(&f, RankOptions::default(), SortKey::Newest);
        assert_eq!(titles(&ranked), vec!["Dogs guard", "Cats nap", "Dogs fetch", "Cats purr"]);
    }

    #[test]
    fn upvotes_then_unranked_remainder() {
        let f = fixture();
        let ranked = rank(&f, RankOptions::default(), SortKey::Upvotes);
        assert_eq!(titles(&ranked), vec!["Cats purr", "Cats nap", "Dogs fetch", "Dogs guard"]);
    }

    #[test]
    fn downvotes_reverse_the_upvote_ranking() {
        let f = fixture();
        let ranked = rank(&f, RankOptions::default(), SortKey::Downvotes);
        assert_eq!(titles(&ranked), vec!["Dogs fetch", "Cats nap", "Cats purr", "Dogs guard"]);
    }

    #[test]
    fn downvotes_by_count() {
        let f = fixture();
        let options = RankOptions {
            downvotes_mode: DownvotesMode::ByDownvoteCount,
            ..RankOptions::default()
        };
        let ranked = rank(&f, options, SortKey::Downvotes);
        assert_eq!(titles(&ranked), vec!["Dogs fetch", "Cats purr", "Cats nap", "Dogs guard"]);
    }

    #[test]
    fn controversial_is_nearest_zero_first() {
        let f = fixture();
        let ranked = rank(&f, RankOptions::default(), SortKey::Controversial);
        assert_eq!(titles(&ranked), vec!["Cats nap", "Dogs fetch", "Cats purr", "Dogs guard"]);

        let options = RankOptions {
            controversy_unranked_first: true,
            ..RankOptions::default()
        };
        let ranked = rank(&f, options, SortKey::Controversial);
        assert_eq!(titles(&ranked), vec!["Dogs guard", "Cats nap", "Dogs fetch", "Cats purr"]);
    }

    #[test]
    fn random_respects_limit_and_universe() {
        let f = fixture();
        let options = RankOptions {
            random_sample_limit: 2,
            ..RankOptions::default()
        };
        let ranked = rank(&f, options, SortKey::Random);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.target == f.topic.id));
    }

    #[test]
    fn search_narrows_universe_before_ranking() {
        let f = fixture();
        let engine = RankingEngine::new(&f.ledger, RankOptions::default());
        let request = RankRequest::new(SortKey::Upvotes)
            .within(f.topic.id)
            .search(Some("DOGS"));
        let ranked = engine.rank(&request, &f.responses, &f.responses).unwrap();
        assert_eq!(titles(&ranked), vec!["Dogs fetch", "Dogs guard"]);
    }

    #[test]
    fn engagement_on_responses_counts_replies() {
        let f = fixture();
        for _ in 0..2 {
            let reply = Response::new(VoterId::new(), "reply", "", f.items[3].id);
            f.responses.insert(reply).unwrap();
        }
        let reply = Response::new(VoterId::new(), "reply", "", f.items[1].id);
        f.responses.insert(reply).unwrap();

        let ranked = rank(&f, RankOptions::default(), SortKey::Engagement);
        assert_eq!(titles(&ranked), vec!["Dogs guard", "Dogs fetch", "Cats purr", "Cats nap"]);
    }

    #[test]
    fn topics_with_vote_keys_fall_back_to_store_order() {
        let f = fixture();
        let engine = RankingEngine::new(&f.ledger, RankOptions::default());
        let request = RankRequest::new(SortKey::Upvotes);
        let ranked = engine.rank(&request, &f.topics, &f.responses).unwrap();
        assert_eq!(ranked, vec![f.topic.clone()]);
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        let err = RankRequest::parse("hottest").unwrap_err();
        assert!(matches!(err, RankError::InvalidSortKey(key) if key == "hottest"));
    }
}
