use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use agora_ledger::{InMemoryVoteLedger, LedgerEntrySnapshot};
use agora_sdk::{Agora, EngineConfig, Response, Topic};
use agora_store::{InMemoryRecordStore, RecordFilter, RecordStore};

/// The on-disk form of an Agora instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub responses: Vec<Response>,
    #[serde(default)]
    pub votes: Vec<LedgerEntrySnapshot>,
}

impl Dataset {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading dataset {}", path.display()))?;
        serde_json::from_str(&source)
            .with_context(|| format!("parsing dataset {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing dataset {}", path.display()))
    }

    /// Build an in-memory instance. Fails if the votes break the ledger
    /// invariants; run `audit` to see which.
    pub fn into_agora(self, config: EngineConfig) -> anyhow::Result<Agora> {
        let topics = InMemoryRecordStore::from_records(self.topics)?;
        let responses = InMemoryRecordStore::from_records(self.responses)?;
        let ledger = InMemoryVoteLedger::from_snapshot(&self.votes)?;
        Ok(Agora::with_parts(topics, responses, ledger, config))
    }

    pub fn from_agora(agora: &Agora) -> anyhow::Result<Self> {
        Ok(Self {
            topics: agora.topics().list(&RecordFilter::all())?,
            responses: agora.responses().list(&RecordFilter::all())?,
            votes: agora.snapshot()?,
        })
    }
}
