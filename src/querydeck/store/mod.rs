//! # Query Store
//!
//! The live, ordered collection of queries for one editing session, together
//! with the [`Baseline`] it is diffed against.
//!
//! The store is purely in memory. It is filled from the remote store on load,
//! mutated by editor commits, and written back through a push (see
//! [`crate::commands::push`]). Nothing here talks to the remote store.
//!
//! ## Ordering
//!
//! Queries keep insertion order: loaded queries in the order the remote store
//! returned them, created queries appended at the end. Display indexes are
//! derived from this order.
//!
//! ## Identity
//!
//! Ids are unique across the store at all times. [`QueryStore::load`] drops
//! later duplicates rather than failing the whole load.

use crate::model::{Query, QueryId};
use std::collections::HashSet;

pub mod baseline;

pub use baseline::Baseline;

#[derive(Debug, Default, Clone)]
pub struct QueryStore {
    queries: Vec<Query>,
}

impl QueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents, keeping the first occurrence of each id.
    pub fn load(&mut self, queries: Vec<Query>) {
        let mut seen = HashSet::new();
        self.queries = queries
            .into_iter()
            .filter(|q| {
                let fresh = seen.insert(q.id());
                if !fresh {
                    tracing::warn!(id = %q.id(), "dropping duplicate query id on load");
                }
                fresh
            })
            .collect();
    }

    pub fn all(&self) -> &[Query] {
        &self.queries
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn get(&self, id: QueryId) -> Option<&Query> {
        self.queries.iter().find(|q| q.id() == id)
    }

    pub fn contains(&self, id: QueryId) -> bool {
        self.get(id).is_some()
    }

    /// Appends a query. Returns `false` (and leaves the store untouched) if the id is taken.
    pub fn push(&mut self, query: Query) -> bool {
        if self.contains(query.id()) {
            return false;
        }
        self.queries.push(query);
        true
    }

    /// Overwrites name and content of the entry with `query`'s id.
    /// Returns the committed value, or `None` when the id is absent.
    pub fn commit(&mut self, query: &Query) -> Option<&Query> {
        let entry = self.queries.iter_mut().find(|q| q.id() == query.id())?;
        entry.name = query.name.clone();
        entry.content = query.content.clone();
        Some(entry)
    }

    /// Removes every query whose id is in `ids`, returning the removed values in store order.
    pub fn remove_all(&mut self, ids: &HashSet<QueryId>) -> Vec<Query> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.queries)
            .into_iter()
            .partition(|q| ids.contains(&q.id()));
        self.queries = kept;
        removed
    }

    pub fn position(&self, id: QueryId) -> Option<usize> {
        self.queries.iter().position(|q| q.id() == id)
    }
}
