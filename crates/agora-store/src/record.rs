use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agora_types::{ItemId, VoterId};

/// Read access the ranking engine needs from any stored record.
pub trait Record: Clone + Send + Sync {
    fn id(&self) -> ItemId;

    /// The record this one is attached to, if any.
    fn parent(&self) -> Option<ItemId>;

    /// Text that searches match against.
    fn title(&self) -> &str;

    fn updated_at(&self) -> DateTime<Utc>;
}

/// A debate prompt, conventionally titled "X vs. Y".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: ItemId,
    pub author: VoterId,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Topic {
    pub fn new(author: VoterId, title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            author,
            title: title.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Topic {
    fn id(&self) -> ItemId {
        self.id
    }

    fn parent(&self) -> Option<ItemId> {
        None
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// An argument posted against a target, which is either a topic or another
/// response (a reply).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: ItemId,
    pub author: VoterId,
    pub title: String,
    pub content: String,
    pub target: ItemId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Response {
    pub fn new(
        author: VoterId,
        title: impl Into<String>,
        content: impl Into<String>,
        target: ItemId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            author,
            title: title.into(),
            content: content.into(),
            target,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Response {
    fn id(&self) -> ItemId {
        self.id
    }

    fn parent(&self) -> Option<ItemId> {
        Some(self.target)
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
