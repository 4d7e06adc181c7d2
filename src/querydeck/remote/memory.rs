use super::{drop_deleted, merge_upserts, RemoteStore};
use crate::error::{QueryDeckError, Result};
use crate::model::{Query, Scope};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// One call received by [`InMemoryRemote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    FetchQueries(Scope),
    FetchUserResources { user_id: String, resource: String },
    Upsert(Scope, Vec<Query>),
    Delete(Scope, Vec<Query>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOp {
    Fetch,
    Upsert,
    Delete,
}

/// In-memory remote store for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    queries: HashMap<Scope, Vec<Query>>,
    resources: HashMap<(String, String), Value>,
    calls: RefCell<Vec<RemoteCall>>,
    failing: HashSet<RemoteOp>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queries(mut self, scope: &Scope, queries: Vec<Query>) -> Self {
        self.queries.insert(scope.clone(), queries);
        self
    }

    pub fn with_resource(mut self, user_id: &str, resource: &str, value: Value) -> Self {
        self.resources
            .insert((user_id.to_string(), resource.to_string()), value);
        self
    }

    /// Makes every subsequent call of `op` fail until [`Self::recover_op`].
    pub fn fail(&mut self, op: RemoteOp) {
        self.failing.insert(op);
    }

    pub fn recover_op(&mut self, op: RemoteOp) {
        self.failing.remove(&op);
    }

    /// What the store currently holds for `scope`.
    pub fn stored(&self, scope: &Scope) -> Vec<Query> {
        self.queries.get(scope).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.borrow().clone()
    }

    pub fn upserts(&self) -> Vec<Vec<Query>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                RemoteCall::Upsert(_, queries) => Some(queries.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> Vec<Vec<Query>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                RemoteCall::Delete(_, queries) => Some(queries.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn check(&self, op: RemoteOp) -> Result<()> {
        if self.failing.contains(&op) {
            return Err(QueryDeckError::Remote(format!("{:?} rejected", op)));
        }
        Ok(())
    }
}

impl RemoteStore for InMemoryRemote {
    fn fetch_queries(&self, scope: &Scope) -> Result<Vec<Query>> {
        self.calls
            .borrow_mut()
            .push(RemoteCall::FetchQueries(scope.clone()));
        self.check(RemoteOp::Fetch)?;
        Ok(self.stored(scope))
    }

    fn fetch_user_resources(&self, user_id: &str, resource: &str) -> Result<Value> {
        self.calls.borrow_mut().push(RemoteCall::FetchUserResources {
            user_id: user_id.to_string(),
            resource: resource.to_string(),
        });
        self.check(RemoteOp::Fetch)?;
        Ok(self
            .resources
            .get(&(user_id.to_string(), resource.to_string()))
            .cloned()
            .unwrap_or(Value::Null))
    }

    fn upsert_queries(&mut self, scope: &Scope, queries: &[Query]) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(RemoteCall::Upsert(scope.clone(), queries.to_vec()));
        self.check(RemoteOp::Upsert)?;
        merge_upserts(self.queries.entry(scope.clone()).or_default(), queries);
        Ok(())
    }

    fn delete_queries(&mut self, scope: &Scope, queries: &[Query]) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(RemoteCall::Delete(scope.clone(), queries.to_vec()));
        self.check(RemoteOp::Delete)?;
        if let Some(stored) = self.queries.get_mut(scope) {
            drop_deleted(stored, queries);
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::state::EditorState;

    pub fn scope() -> Scope {
        Scope::new("user-1", "instance-1")
    }

    pub struct RemoteFixture {
        pub remote: InMemoryRemote,
        pub scope: Scope,
    }

    impl Default for RemoteFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RemoteFixture {
        pub fn new() -> Self {
            Self {
                remote: InMemoryRemote::new(),
                scope: scope(),
            }
        }

        pub fn with_queries(mut self, count: usize) -> Self {
            let queries = (0..count)
                .map(|i| Query::new(format!("Query {}", i + 1), format!("select {}", i + 1)))
                .collect();
            self.remote = self.remote.with_queries(&self.scope, queries);
            self
        }

        pub fn with_query(mut self, name: &str, content: &str) -> Self {
            let mut queries = self.remote.stored(&self.scope);
            queries.push(Query::new(name, content));
            self.remote = self.remote.with_queries(&self.scope, queries);
            self
        }

        pub fn queries(&self) -> Vec<Query> {
            self.remote.stored(&self.scope)
        }

        /// Editor state loaded from the fixture's remote contents.
        pub fn state(&self) -> EditorState {
            EditorState::with_queries(self.queries())
        }
    }
}
