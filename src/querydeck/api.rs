//! # API Facade
//!
//! [`QueryManager`] is the single entry point a UI talks to. It owns the
//! [`EditorState`] plus the injected collaborators (remote store, navigator,
//! configuration) and exposes:
//!
//! - **State** for rendering: `queries`, `selected_query`, `editing_content`,
//!   `editing_name`, `is_pushing`, `popup`, `has_unsaved_changes`,
//!   `has_unpushed_changes`, `deleted_queries`, `original_queries`.
//! - **Actions**: thin dispatches into `commands/*`. Switching, creating and
//!   pushing go through the confirmation gate; the returned [`CmdResult`]
//!   carries the popup when one was raised.
//!
//! Like the command layer, the facade never prints and never exits. It also
//! resolves user-facing selectors (`2`, a UUID, or an exact name) into ids.

use crate::commands::{self, popup};
use crate::config::QueryDeckConfig;
use crate::error::{QueryDeckError, Result};
pub use crate::gate::{Choice, PendingAction, Popup};
use crate::identity::IdentityProvider;
use crate::model::{Query, QueryId, Scope};
use crate::reconcile::{self, QueryStatus};
use crate::remote::RemoteStore;
use crate::routing::Navigator;
use crate::state::EditorState;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// The query editor for one signed-in user and one instance.
pub struct QueryManager<R: RemoteStore, N: Navigator> {
    state: EditorState,
    remote: R,
    nav: N,
    scope: Scope,
    config: QueryDeckConfig,
}

impl<R: RemoteStore, N: Navigator> QueryManager<R, N> {
    /// Builds a manager without touching the remote store.
    pub fn new(remote: R, nav: N, scope: Scope, config: QueryDeckConfig) -> Self {
        Self {
            state: EditorState::new(),
            remote,
            nav,
            scope,
            config,
        }
    }

    /// Resolves the current user, then loads the instance's queries.
    pub fn open<I: IdentityProvider + ?Sized>(
        identity: &I,
        remote: R,
        nav: N,
        instance_id: impl Into<String>,
        config: QueryDeckConfig,
    ) -> Result<(Self, commands::CmdResult)> {
        let user = identity
            .current_user()
            .ok_or(QueryDeckError::NotAuthenticated)?;
        let scope = Scope::new(user.user_id, instance_id);
        let mut manager = Self::new(remote, nav, scope, config);
        let result = manager.load()?;
        Ok((manager, result))
    }

    pub fn load(&mut self) -> Result<commands::CmdResult> {
        commands::load::run(&mut self.state, &self.remote, &self.scope, &mut self.nav)
    }

    // --- State ---

    pub fn queries(&self) -> &[Query] {
        self.state.queries()
    }

    pub fn selected_query(&self) -> Option<&Query> {
        self.state.selected_query()
    }

    pub fn editing_content(&self) -> &str {
        self.state.editing_content()
    }

    pub fn editing_name(&self) -> Option<&str> {
        self.state.editing_name()
    }

    pub fn is_pushing(&self) -> bool {
        self.state.is_pushing()
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.state.popup()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.state.has_unsaved_changes()
    }

    pub fn has_unpushed_changes(&self) -> bool {
        self.state.has_unpushed_changes()
    }

    pub fn deleted_queries(&self) -> &BTreeSet<QueryId> {
        self.state.deleted()
    }

    pub fn original_queries(&self) -> &[Query] {
        self.state.baseline().queries()
    }

    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.state.baseline().taken_at()
    }

    pub fn status_of(&self, id: QueryId) -> Option<QueryStatus> {
        self.state
            .query(id)
            .map(|q| reconcile::classify(&self.state, q))
    }

    pub fn list_queries(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.state)
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn config(&self) -> &QueryDeckConfig {
        &self.config
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn navigator(&self) -> &N {
        &self.nav
    }

    // --- Actions ---

    pub fn set_editing_content(&mut self, content: impl Into<String>) -> Result<commands::CmdResult> {
        commands::edit::set_content(&mut self.state, content.into())
    }

    pub fn append_editing_content(&mut self, text: &str) -> Result<commands::CmdResult> {
        commands::edit::append_content(&mut self.state, text)
    }

    pub fn set_editing_name(&mut self, name: impl Into<String>) -> Result<commands::CmdResult> {
        commands::edit::set_name(&mut self.state, name.into())
    }

    pub fn save_query(&mut self) -> Result<commands::CmdResult> {
        commands::save::run(&mut self.state)
    }

    pub fn push(&mut self) -> Result<commands::CmdResult> {
        self.guarded(PendingAction::Push)
    }

    pub fn create_query(&mut self) -> Result<commands::CmdResult> {
        self.guarded(PendingAction::Create)
    }

    pub fn select_query(&mut self, id: QueryId) -> Result<commands::CmdResult> {
        self.guarded(PendingAction::Select(id))
    }

    pub fn delete_query(&mut self, id: QueryId) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.state, &mut self.nav, id)
    }

    pub fn recover_query(&mut self, id: QueryId) -> Result<commands::CmdResult> {
        commands::recover::run(&mut self.state, id)
    }

    /// Raises the recover-deleted popup for a marked query.
    pub fn request_recover(&mut self, id: QueryId) -> Result<commands::CmdResult> {
        commands::recover::request(&mut self.state, id)
    }

    pub fn resolve_popup(&mut self, choice: Choice) -> Result<commands::CmdResult> {
        popup::resolve(
            &mut self.state,
            &mut self.remote,
            &mut self.nav,
            &self.scope,
            &self.config,
            choice,
        )
    }

    pub fn dismiss_popup(&mut self) -> Result<commands::CmdResult> {
        popup::dismiss(&mut self.state)
    }

    /// Resolves a selector: a 1-based list index, a query id, or an exact name.
    pub fn resolve_selector(&self, selector: &str) -> Result<QueryId> {
        let selector = selector.trim();
        let queries = self.state.queries();

        if let Ok(index) = selector.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| queries.get(i))
                .map(Query::id)
                .ok_or_else(|| QueryDeckError::QueryNotFound(selector.to_string()));
        }
        if let Ok(id) = selector.parse::<QueryId>() {
            if self.state.query(id).is_some() {
                return Ok(id);
            }
        }
        queries
            .iter()
            .find(|q| q.name == selector)
            .map(Query::id)
            .ok_or_else(|| QueryDeckError::QueryNotFound(selector.to_string()))
    }

    fn guarded(&mut self, action: PendingAction) -> Result<commands::CmdResult> {
        popup::guarded(
            &mut self.state,
            &mut self.remote,
            &mut self.nav,
            &self.scope,
            &self.config,
            action,
        )
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
