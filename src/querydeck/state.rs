//! # Editor State
//!
//! [`EditorState`] is everything the query editor knows at a given moment:
//! the live [`QueryStore`], the [`Baseline`] it is diffed against, the set of
//! queries marked for deletion, the open [`EditSession`], the active
//! [`Popup`] and the pushing flag.
//!
//! Its methods are the primitive transitions. They never talk to a remote
//! store, a router or a terminal; the command layer composes them with those
//! collaborators. All of them are defensive: an unknown id yields `None` or
//! `false`, never an error. The only failures are the ones that protect an
//! invariant: a second popup while one is active, and a second push while one
//! is in flight.

use crate::config::PushFailurePolicy;
use crate::error::{QueryDeckError, Result};
use crate::gate::Popup;
use crate::model::{Query, QueryId};
use crate::reconcile::{self, PushPlan};
use crate::session::EditSession;
use crate::store::{Baseline, QueryStore};
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Default)]
pub struct EditorState {
    store: QueryStore,
    baseline: Baseline,
    deleted: BTreeSet<QueryId>,
    session: Option<EditSession>,
    popup: Option<Popup>,
    pushing: bool,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A state freshly loaded with `queries`, all of them in sync.
    pub fn with_queries(queries: Vec<Query>) -> Self {
        let mut state = Self::new();
        state.load(queries);
        state
    }

    pub fn queries(&self) -> &[Query] {
        self.store.all()
    }

    pub fn query(&self, id: QueryId) -> Option<&Query> {
        self.store.get(id)
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn deleted(&self) -> &BTreeSet<QueryId> {
        &self.deleted
    }

    pub fn is_deleted(&self, id: QueryId) -> bool {
        self.deleted.contains(&id)
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn selected_query(&self) -> Option<&Query> {
        self.session.as_ref().map(EditSession::selected)
    }

    pub fn selected_id(&self) -> Option<QueryId> {
        self.selected_query().map(Query::id)
    }

    /// The live buffer, or `""` when nothing is open.
    pub fn editing_content(&self) -> &str {
        self.session.as_ref().map_or("", EditSession::content)
    }

    pub fn editing_name(&self) -> Option<&str> {
        self.session.as_ref().and_then(EditSession::name_override)
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn is_pushing(&self) -> bool {
        self.pushing
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(EditSession::has_unsaved_changes)
    }

    pub fn has_unpushed_changes(&self) -> bool {
        !self.deleted.is_empty() || !reconcile::changed_queries(self).is_empty()
    }

    /// Replaces store and baseline together and resets everything transient.
    pub fn load(&mut self, queries: Vec<Query>) {
        self.store.load(queries);
        self.baseline = Baseline::capture(self.store.all());
        self.deleted.clear();
        self.session = None;
        self.popup = None;
    }

    /// Appends an empty query named `name` and opens it.
    pub fn create(&mut self, name: &str) -> Query {
        loop {
            if let Some(query) = self.create_with_id(QueryId::new(), name) {
                return query;
            }
            tracing::warn!("generated query id already taken; retrying");
        }
    }

    /// Like [`create`](Self::create) with a caller-chosen id. Returns `None`
    /// and changes nothing when the id is already in the store.
    pub fn create_with_id(&mut self, id: QueryId, name: &str) -> Option<Query> {
        let query = Query::with_id(id, name, "");
        if !self.store.push(query.clone()) {
            return None;
        }
        self.session = Some(EditSession::open(query.clone()));
        Some(query)
    }

    /// Opens the query with `id`, replacing any open session and its buffer.
    pub fn select(&mut self, id: QueryId) -> Option<&Query> {
        let query = self.store.get(id)?.clone();
        self.session = Some(EditSession::open(query));
        self.selected_query()
    }

    pub fn deselect(&mut self) {
        self.session = None;
    }

    pub fn set_editing_content(&mut self, content: String) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.set_content(content);
                true
            }
            None => false,
        }
    }

    pub fn set_editing_name(&mut self, name: String) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.set_name(name);
                true
            }
            None => false,
        }
    }

    /// Commits the buffer into the store. The baseline is not touched.
    pub fn save(&mut self) -> Option<Query> {
        let session = self.session.as_mut()?;
        let committed = self.store.commit(&session.edited())?.clone();
        session.committed(committed.clone());
        Some(committed)
    }

    /// Drops the buffer without committing it; the query stays open.
    pub fn discard(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.revert();
        }
    }

    /// Marks `id` for deletion on the next push.
    ///
    /// Returns `None` for an unknown id, otherwise whether the query was the
    /// one open in the editor (in which case the session is closed).
    pub fn mark_deleted(&mut self, id: QueryId) -> Option<bool> {
        if !self.store.contains(id) {
            return None;
        }
        self.deleted.insert(id);
        let was_selected = self.selected_id() == Some(id);
        if was_selected {
            self.session = None;
        }
        Some(was_selected)
    }

    /// Clears the deletion marker of `id` and any active popup.
    pub fn recover(&mut self, id: QueryId) -> bool {
        self.popup = None;
        self.deleted.remove(&id)
    }

    pub fn raise(&mut self, popup: Popup) -> Result<()> {
        if self.popup.is_some() {
            return Err(QueryDeckError::PopupPending);
        }
        self.popup = Some(popup);
        Ok(())
    }

    pub fn take_popup(&mut self) -> Option<Popup> {
        self.popup.take()
    }

    /// Starts a push: sets the pushing flag and returns what has to be sent.
    ///
    /// Fails with [`QueryDeckError::PushInProgress`] while another push is
    /// outstanding.
    pub fn begin_push(&mut self) -> Result<PushPlan> {
        if self.pushing {
            return Err(QueryDeckError::PushInProgress);
        }
        self.pushing = true;
        Ok(reconcile::push_plan(self))
    }

    /// Applies a push the remote store accepted in full.
    ///
    /// Only what `plan` carried becomes synced: commits and markers made while
    /// the push was in flight stay unpushed.
    pub fn complete_push(&mut self, plan: &PushPlan) {
        let removed: HashSet<QueryId> = plan.deletions.iter().map(Query::id).collect();
        self.store.remove_all(&removed);
        self.deleted.retain(|id| !removed.contains(id));
        if self.selected_id().is_some_and(|id| removed.contains(&id)) {
            self.session = None;
        }
        self.advance_baseline(plan);
        self.pushing = false;
    }

    /// Ends a push the remote store rejected.
    pub fn abort_push(&mut self, plan: &PushPlan, policy: PushFailurePolicy) {
        if policy == PushFailurePolicy::AdvanceBaseline {
            self.advance_baseline(plan);
        }
        self.pushing = false;
    }

    /// Rebuilds the baseline in store order from the old baseline with the
    /// plan's upserts applied and its deletions left out.
    fn advance_baseline(&mut self, plan: &PushPlan) {
        let deleted: HashSet<QueryId> = plan.deletions.iter().map(Query::id).collect();
        let synced: Vec<Query> = self
            .store
            .all()
            .iter()
            .filter(|q| !deleted.contains(&q.id()))
            .filter_map(|q| {
                plan.upserts
                    .iter()
                    .find(|u| u.id() == q.id())
                    .or_else(|| self.baseline.get(q.id()))
                    .cloned()
            })
            .collect();
        self.baseline = Baseline::capture(&synced);
    }
}
