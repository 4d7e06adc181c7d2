use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_QUERY_NAME: &str = "Untitled Query";

/// Client-generated identifier of a query. Never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryId(Uuid);

impl QueryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for QueryId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for QueryId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QueryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A named text document tracked by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    id: QueryId,
    pub name: String,
    pub content: String,
}

impl Query {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(QueryId::new(), name, content)
    }

    /// Rebuilds a query that already has an identity, e.g. one fetched from the remote store.
    pub fn with_id(id: QueryId, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn id(&self) -> QueryId {
        self.id
    }

    /// Value equality used for diffing against the baseline: `(name, content)` only.
    pub fn same_value(&self, other: &Query) -> bool {
        self.name == other.name && self.content == other.content
    }
}

/// Identifies the remote collection a session works on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub user_id: String,
    pub instance_id: String,
}

impl Scope {
    pub fn new(user_id: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            instance_id: instance_id.into(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user_id, self.instance_id)
    }
}
