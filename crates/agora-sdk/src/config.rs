use std::path::Path;

use serde::{Deserialize, Serialize};

use agora_rank::RankOptions;

use crate::error::{SdkError, SdkResult};

/// Engine configuration, usually read from `agora.toml`.
///
/// ```toml
/// [rank]
/// random_sample_limit = 50
/// downvotes_mode = "reverse_of_upvotes"
/// controversy_unranked_first = false
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rank: RankOptions,
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> SdkResult<Self> {
        toml::from_str(source).map_err(|e| SdkError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> SdkResult<String> {
        toml::to_string_pretty(self).map_err(|e| SdkError::Config(e.to_string()))
    }
}
