//! # Reconciliation Engine
//!
//! Derives, on demand, how every query relates to the last synchronized
//! baseline, and what a push has to send.
//!
//! ## Display states
//!
//! Evaluated in this precedence order:
//!
//! 1. [`QueryStatus::Deleted`]: marked for deletion, whatever its content.
//! 2. [`QueryStatus::UnsavedInEditor`]: open in the editor with an uncommitted buffer.
//! 3. [`QueryStatus::ModifiedUnpushed`]: never pushed, or its committed
//!    `(name, content)` differs from the baseline.
//! 4. [`QueryStatus::Synced`]: none of the above.
//!
//! ## Push plan
//!
//! A push sends every non-deleted query that rule 3 classifies as dirty,
//! judged on the committed store only (the edit buffer is never pushed), and
//! removes every marked query.

use crate::model::Query;
use crate::state::EditorState;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryStatus {
    Deleted,
    UnsavedInEditor,
    ModifiedUnpushed,
    Synced,
}

impl QueryStatus {
    pub const ALL: [QueryStatus; 4] = [
        QueryStatus::Synced,
        QueryStatus::ModifiedUnpushed,
        QueryStatus::UnsavedInEditor,
        QueryStatus::Deleted,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            QueryStatus::Synced => "in sync with the remote store",
            QueryStatus::ModifiedUnpushed => "new or modified, not pushed yet",
            QueryStatus::UnsavedInEditor => "unsaved changes in the editor",
            QueryStatus::Deleted => "marked for deletion on next push",
        }
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QueryStatus::Synced => "synced",
            QueryStatus::ModifiedUnpushed => "unpushed",
            QueryStatus::UnsavedInEditor => "unsaved",
            QueryStatus::Deleted => "deleted",
        };
        f.pad(label)
    }
}

/// What a push sends to the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushPlan {
    pub upserts: Vec<Query>,
    pub deletions: Vec<Query>,
}

impl PushPlan {
    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.deletions.is_empty()
    }
}

/// A query together with its 1-based position and its display state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayQuery {
    pub index: usize,
    pub query: Query,
    pub status: QueryStatus,
    pub selected: bool,
}

pub fn classify(state: &EditorState, query: &Query) -> QueryStatus {
    let id = query.id();
    if state.is_deleted(id) {
        QueryStatus::Deleted
    } else if state.selected_id() == Some(id) && state.has_unsaved_changes() {
        QueryStatus::UnsavedInEditor
    } else if state.baseline().is_dirty(query) {
        QueryStatus::ModifiedUnpushed
    } else {
        QueryStatus::Synced
    }
}

/// Committed queries that are new or differ from the baseline, excluding marked ones.
pub fn changed_queries(state: &EditorState) -> Vec<Query> {
    state
        .queries()
        .iter()
        .filter(|q| !state.is_deleted(q.id()) && state.baseline().is_dirty(q))
        .cloned()
        .collect()
}

pub fn push_plan(state: &EditorState) -> PushPlan {
    let deletions = state
        .queries()
        .iter()
        .filter(|q| state.is_deleted(q.id()))
        .cloned()
        .collect();
    PushPlan {
        upserts: changed_queries(state),
        deletions,
    }
}

pub fn index_queries(state: &EditorState) -> Vec<DisplayQuery> {
    let selected = state.selected_id();
    state
        .queries()
        .iter()
        .enumerate()
        .map(|(i, query)| DisplayQuery {
            index: i + 1,
            query: query.clone(),
            status: classify(state, query),
            selected: selected == Some(query.id()),
        })
        .collect()
}
