use crate::model::{Query, QueryId};
use chrono::{DateTime, Utc};

/// Snapshot of the query collection as last synchronized with the remote store.
///
/// Only ever replaced wholesale, on load and after a push.
#[derive(Debug, Default, Clone)]
pub struct Baseline {
    queries: Vec<Query>,
    taken_at: Option<DateTime<Utc>>,
}

impl Baseline {
    pub fn capture(queries: &[Query]) -> Self {
        Self {
            queries: queries.to_vec(),
            taken_at: Some(Utc::now()),
        }
    }

    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    pub fn get(&self, id: QueryId) -> Option<&Query> {
        self.queries.iter().find(|q| q.id() == id)
    }

    /// `true` if the query was never pushed or its value moved away from the snapshot.
    pub fn is_dirty(&self, query: &Query) -> bool {
        match self.get(query.id()) {
            Some(original) => !original.same_value(query),
            None => true,
        }
    }

    pub fn taken_at(&self) -> Option<DateTime<Utc>> {
        self.taken_at
    }
}
