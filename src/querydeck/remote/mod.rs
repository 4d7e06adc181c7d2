//! # Remote Store
//!
//! The backing store queries are loaded from and pushed to. The editor core
//! never reaches for a global client: a [`RemoteStore`] is handed to the API
//! facade, which makes every command testable against [`memory::InMemoryRemote`].
//!
//! ## Implementations
//!
//! - [`fs::FileRemote`]: one JSON file per user and instance under a root
//!   directory. Used by the terminal client.
//!   ```text
//!   <root>/
//!   └── <user_id>/
//!       ├── <instance_id>.json    # JSON array of queries, in order
//!       └── resources/
//!           └── <resource>.json   # side-loaded user resources
//!   ```
//! - [`memory::InMemoryRemote`]: records every call and can be told to fail,
//!   for tests.
//!
//! All calls are plain request/response. Upserts replace queries by id or
//! append them; deletes of ids the store does not hold are ignored.

use crate::error::Result;
use crate::model::{Query, Scope};

pub mod fs;
pub mod memory;

pub trait RemoteStore {
    /// All queries of an instance, in stored order
    fn fetch_queries(&self, scope: &Scope) -> Result<Vec<Query>>;

    /// Side-loaded per-user data. `Value::Null` when there is none.
    fn fetch_user_resources(&self, user_id: &str, resource: &str) -> Result<serde_json::Value>;

    /// Create or replace the given queries
    fn upsert_queries(&mut self, scope: &Scope, queries: &[Query]) -> Result<()>;

    /// Remove the given queries
    fn delete_queries(&mut self, scope: &Scope, queries: &[Query]) -> Result<()>;
}

/// Upsert semantics shared by the implementations: replace by id, else append.
fn merge_upserts(stored: &mut Vec<Query>, queries: &[Query]) {
    for query in queries {
        match stored.iter_mut().find(|q| q.id() == query.id()) {
            Some(existing) => *existing = query.clone(),
            None => stored.push(query.clone()),
        }
    }
}

fn drop_deleted(stored: &mut Vec<Query>, queries: &[Query]) {
    stored.retain(|q| !queries.iter().any(|d| d.id() == q.id()));
}
