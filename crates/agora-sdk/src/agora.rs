use tracing::{info, warn};

use agora_ledger::{
    AuditReport, InMemoryVoteLedger, LedgerAuditor, LedgerEntrySnapshot, Transition, VoteReader,
    VoteTally, VoteWriter,
};
use agora_rank::{RankRequest, RankingEngine};
use agora_store::{InMemoryRecordStore, RecordStore, Response, Topic};
use agora_types::{Direction, ItemId, SortKey, Vote, VoterId};

use crate::config::EngineConfig;
use crate::error::{SdkError, SdkResult};

/// Voting and ranking over a topic store, a response store and a vote ledger.
pub struct Agora<
    T = InMemoryRecordStore<Topic>,
    R = InMemoryRecordStore<Response>,
    L = InMemoryVoteLedger,
> {
    topics: T,
    responses: R,
    ledger: L,
    config: EngineConfig,
}

impl Agora {
    /// An instance backed entirely by in-memory stores.
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::with_parts(
            InMemoryRecordStore::new(),
            InMemoryRecordStore::new(),
            InMemoryVoteLedger::new(),
            config,
        )
    }
}

impl<T, R, L> Agora<T, R, L>
where
    T: RecordStore<Topic>,
    R: RecordStore<Response>,
    L: VoteReader + VoteWriter,
{
    pub fn with_parts(topics: T, responses: R, ledger: L, config: EngineConfig) -> Self {
        Self {
            topics,
            responses,
            ledger,
            config,
        }
    }

    pub fn topics(&self) -> &T {
        &self.topics
    }

    pub fn responses(&self) -> &R {
        &self.responses
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn engine(&self) -> RankingEngine<'_, L> {
        RankingEngine::new(&self.ledger, self.config.rank.clone())
    }

    // ---- Ranking ----

    /// All topics in `sort` order, optionally narrowed to titles containing
    /// `search`.
    pub fn rank_topics(&self, sort: SortKey, search: Option<&str>) -> SdkResult<Vec<Topic>> {
        let request = RankRequest::new(sort).search(search);
        Ok(self
            .engine()
            .rank::<Topic, T, Response, R>(&request, &self.topics, &self.responses)?)
    }

    /// Responses targeting `parent` (a topic or a response) in `sort` order.
    pub fn rank_responses(
        &self,
        parent: &ItemId,
        sort: SortKey,
        search: Option<&str>,
    ) -> SdkResult<Vec<Response>> {
        let request = RankRequest::new(sort).within(*parent).search(search);
        Ok(self
            .engine()
            .rank::<Response, R, Response, R>(&request, &self.responses, &self.responses)?)
    }

    /// Responses to the topic titled exactly `title`.
    pub fn rank_responses_by_topic_title(
        &self,
        title: &str,
        sort: SortKey,
        search: Option<&str>,
    ) -> SdkResult<Vec<Response>> {
        let topic = self
            .topics
            .find_by_title(title)?
            .ok_or_else(|| SdkError::TopicNotFound(title.to_string()))?;
        self.rank_responses(&topic.id, sort, search)
    }

    // ---- Voting ----

    pub fn cast_vote(
        &self,
        item: &ItemId,
        voter: &VoterId,
        direction: Direction,
    ) -> SdkResult<Transition> {
        let transition = self.ledger.cast(item, voter, direction)?;
        if !transition.is_noop() {
            info!(item = %item, voter = %voter, vote = %transition.to, "vote cast");
        }
        Ok(transition)
    }

    pub fn retract_vote(&self, item: &ItemId, voter: &VoterId) -> SdkResult<Transition> {
        let transition = self.ledger.unvote(item, voter)?;
        if !transition.is_noop() {
            info!(item = %item, voter = %voter, "vote retracted");
        }
        Ok(transition)
    }

    pub fn current_stance(&self, voter: &VoterId, item: &ItemId) -> SdkResult<Vote> {
        Ok(self.ledger.current_vote(voter, item)?)
    }

    pub fn net_score(&self, item: &ItemId) -> SdkResult<i64> {
        Ok(self.ledger.score(item)?)
    }

    pub fn tally(&self, item: &ItemId) -> SdkResult<VoteTally> {
        Ok(self.ledger.tally(item)?)
    }

    /// Every ledger entry in insertion order.
    pub fn snapshot(&self) -> SdkResult<Vec<LedgerEntrySnapshot>> {
        Ok(self.ledger.snapshot()?)
    }

    /// Check every ledger entry against the vote invariants.
    pub fn audit(&self) -> SdkResult<AuditReport> {
        let report = LedgerAuditor::audit_ledger(&self.ledger)?;
        if !report.is_valid() {
            warn!(
                violations = report.violations.len(),
                entries = report.entry_count,
                "ledger audit found violations"
            );
        }
        Ok(report)
    }
}
