//! Running guarded actions and resolving the popups the gate raises.

use crate::commands::{create, push, recover, save, select, CmdMessage, CmdResult};
use crate::config::QueryDeckConfig;
use crate::error::{QueryDeckError, Result};
use crate::gate::{self, Choice, PendingAction, Popup};
use crate::model::Scope;
use crate::remote::RemoteStore;
use crate::routing::Navigator;
use crate::state::EditorState;

/// Runs `action` unless the gate parks it behind a save-before-proceed popup.
pub fn guarded<R: RemoteStore, N: Navigator>(
    state: &mut EditorState,
    remote: &mut R,
    nav: &mut N,
    scope: &Scope,
    config: &QueryDeckConfig,
    action: PendingAction,
) -> Result<CmdResult> {
    let reselect = matches!(action, PendingAction::Select(id) if state.selected_id() == Some(id));
    if !reselect {
        if let Some(popup) = gate::guard(state.popup(), state.has_unsaved_changes(), action)? {
            state.raise(popup)?;
            let name = state
                .session()
                .map(|s| s.effective_name().to_string())
                .unwrap_or_default();
            tracing::debug!(%action, "action parked behind save confirmation");
            return Ok(CmdResult::default().with_popup(popup).with_message(
                CmdMessage::warning(format!("'{}' has unsaved changes.", name)),
            ));
        }
    }
    perform(state, remote, nav, scope, config, action)
}

/// Answers the active popup and runs its continuation.
///
/// Once the save or discard has happened, a failing continuation is reported
/// as an error message next to the save's own messages instead of an `Err`.
pub fn resolve<R: RemoteStore, N: Navigator>(
    state: &mut EditorState,
    remote: &mut R,
    nav: &mut N,
    scope: &Scope,
    config: &QueryDeckConfig,
    choice: Choice,
) -> Result<CmdResult> {
    let popup = state.take_popup().ok_or(QueryDeckError::NoPopup)?;
    tracing::debug!(?popup, ?choice, "popup resolved");

    match popup {
        Popup::SaveBeforeProceed { pending } => {
            let mut result = match choice {
                Choice::Confirm => save::run(state)?,
                Choice::Cancel => {
                    state.discard();
                    CmdResult::default().with_message(CmdMessage::info("Unsaved changes discarded."))
                }
            };
            match perform(state, remote, nav, scope, config, pending) {
                Ok(next) => result.absorb(next),
                Err(e) => {
                    tracing::warn!(error = %e, %pending, "action failed after the popup was answered");
                    result.add_message(CmdMessage::error(format!(
                        "Could not finish {}: {}",
                        pending, e
                    )));
                }
            }
            Ok(result)
        }
        Popup::RecoverDeleted { id } => match choice {
            Choice::Confirm => recover::run(state, id),
            Choice::Cancel => Ok(CmdResult::default()
                .with_message(CmdMessage::info("Query stays marked for deletion."))),
        },
    }
}

/// Closes the active popup without running either continuation.
pub fn dismiss(state: &mut EditorState) -> Result<CmdResult> {
    state.take_popup();
    Ok(CmdResult::default())
}

fn perform<R: RemoteStore, N: Navigator>(
    state: &mut EditorState,
    remote: &mut R,
    nav: &mut N,
    scope: &Scope,
    config: &QueryDeckConfig,
    action: PendingAction,
) -> Result<CmdResult> {
    match action {
        PendingAction::Select(id) => select::run(state, nav, id),
        PendingAction::Create => create::run(state, nav, &config.default_query_name),
        PendingAction::Push => push::run(state, remote, scope, config.push_failure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::Query;
    use crate::remote::memory::fixtures::scope;
    use crate::remote::memory::{InMemoryRemote, RemoteOp};
    use crate::routing::UrlState;

    struct Env {
        state: EditorState,
        remote: InMemoryRemote,
        nav: UrlState,
        scope: Scope,
        config: QueryDeckConfig,
        a: Query,
        b: Query,
    }

    impl Env {
        fn new() -> Self {
            let a = Query::new("A", "foo");
            let b = Query::new("B", "other");
            let scope = scope();
            let remote = InMemoryRemote::new().with_queries(&scope, vec![a.clone(), b.clone()]);
            Self {
                state: EditorState::with_queries(vec![a.clone(), b.clone()]),
                remote,
                nav: UrlState::new("/editor"),
                scope,
                config: QueryDeckConfig::default(),
                a,
                b,
            }
        }

        fn guarded(&mut self, action: PendingAction) -> Result<CmdResult> {
            guarded(
                &mut self.state,
                &mut self.remote,
                &mut self.nav,
                &self.scope,
                &self.config,
                action,
            )
        }

        fn resolve(&mut self, choice: Choice) -> Result<CmdResult> {
            resolve(
                &mut self.state,
                &mut self.remote,
                &mut self.nav,
                &self.scope,
                &self.config,
                choice,
            )
        }

        /// Opens A and types "bar" without saving.
        fn dirty_a(&mut self) {
            let a = self.a.id();
            self.guarded(PendingAction::Select(a)).unwrap();
            self.state.set_editing_content("bar".into());
        }
    }

    #[test]
    fn clean_editor_switches_immediately() {
        let mut env = Env::new();
        let b = env.b.id();
        let result = env.guarded(PendingAction::Select(b)).unwrap();
        assert!(result.popup.is_none());
        assert_eq!(env.state.selected_id(), Some(b));
    }

    #[test]
    fn switching_with_unsaved_edits_raises_popup() {
        let mut env = Env::new();
        env.dirty_a();
        let b = env.b.id();

        let result = env.guarded(PendingAction::Select(b)).unwrap();

        let expected = Popup::SaveBeforeProceed {
            pending: PendingAction::Select(b),
        };
        assert_eq!(result.popup, Some(expected));
        assert_eq!(env.state.popup(), Some(&expected));
        assert_eq!(env.state.selected_id(), Some(env.a.id()));
    }

    #[test]
    fn confirm_saves_then_switches() {
        let mut env = Env::new();
        env.dirty_a();
        let b = env.b.id();
        env.guarded(PendingAction::Select(b)).unwrap();

        env.resolve(Choice::Confirm).unwrap();

        assert_eq!(env.state.query(env.a.id()).unwrap().content, "bar");
        assert_eq!(env.state.selected_id(), Some(b));
        assert!(env.state.popup().is_none());
    }

    #[test]
    fn cancel_discards_then_switches() {
        let mut env = Env::new();
        env.dirty_a();
        let b = env.b.id();
        env.guarded(PendingAction::Select(b)).unwrap();

        env.resolve(Choice::Cancel).unwrap();

        assert_eq!(env.state.query(env.a.id()).unwrap().content, "foo");
        assert_eq!(env.state.selected_id(), Some(b));
        assert_eq!(env.state.editing_content(), "other");
        assert!(env.state.popup().is_none());
    }

    #[test]
    fn reselecting_open_query_never_asks() {
        let mut env = Env::new();
        env.dirty_a();
        let a = env.a.id();
        let result = env.guarded(PendingAction::Select(a)).unwrap();
        assert!(result.popup.is_none());
        assert_eq!(env.state.editing_content(), "bar");
    }

    #[test]
    fn confirm_before_create_saves_first() {
        let mut env = Env::new();
        env.dirty_a();

        env.guarded(PendingAction::Create).unwrap();
        let result = env.resolve(Choice::Confirm).unwrap();

        assert_eq!(env.state.query(env.a.id()).unwrap().content, "bar");
        assert_eq!(env.state.queries().len(), 3);
        assert_eq!(env.state.selected_query().unwrap().name, "Untitled Query");
        assert_eq!(result.affected_queries.len(), 2);
    }

    #[test]
    fn cancel_before_push_pushes_committed_values_only() {
        let mut env = Env::new();
        env.dirty_a();

        env.guarded(PendingAction::Push).unwrap();
        env.resolve(Choice::Cancel).unwrap();

        assert!(env.remote.calls().is_empty());
        assert_eq!(env.state.selected_id(), Some(env.a.id()));
        assert!(!env.state.has_unsaved_changes());
    }

    #[test]
    fn confirm_before_push_includes_the_edit() {
        let mut env = Env::new();
        env.dirty_a();

        env.guarded(PendingAction::Push).unwrap();
        env.resolve(Choice::Confirm).unwrap();

        let pushed = env.remote.upserts();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0][0].content, "bar");
        assert!(!env.state.has_unpushed_changes());
    }

    #[test]
    fn failed_push_after_confirm_still_reports_the_save() {
        let mut env = Env::new();
        env.remote.fail(RemoteOp::Upsert);
        env.dirty_a();

        env.guarded(PendingAction::Push).unwrap();
        let result = env.resolve(Choice::Confirm).unwrap();

        assert_eq!(result.messages[0].content, "Saved: A");
        let last = result.messages.last().unwrap();
        assert_eq!(last.level, MessageLevel::Error);
        assert!(last.content.starts_with("Could not finish pushing:"));
        assert_eq!(env.state.query(env.a.id()).unwrap().content, "bar");
        assert!(!env.state.is_pushing());
        assert!(env.state.has_unpushed_changes());
        assert!(env.state.popup().is_none());
    }

    #[test]
    fn guarded_action_refused_while_popup_open() {
        let mut env = Env::new();
        env.dirty_a();
        env.guarded(PendingAction::Create).unwrap();

        let err = env.guarded(PendingAction::Push).unwrap_err();
        assert!(matches!(err, QueryDeckError::PopupPending));
    }

    #[test]
    fn recover_popup_confirm_and_cancel() {
        let mut env = Env::new();
        let b = env.b.id();
        env.state.mark_deleted(b);

        recover::request(&mut env.state, b).unwrap();
        env.resolve(Choice::Cancel).unwrap();
        assert!(env.state.is_deleted(b));
        assert!(env.state.popup().is_none());

        recover::request(&mut env.state, b).unwrap();
        env.resolve(Choice::Confirm).unwrap();
        assert!(!env.state.is_deleted(b));
    }

    #[test]
    fn resolve_without_popup_fails() {
        let mut env = Env::new();
        assert!(matches!(
            env.resolve(Choice::Confirm).unwrap_err(),
            QueryDeckError::NoPopup
        ));
    }

    #[test]
    fn dismiss_runs_nothing() {
        let mut env = Env::new();
        env.dirty_a();
        env.guarded(PendingAction::Create).unwrap();

        dismiss(&mut env.state).unwrap();

        assert!(env.state.popup().is_none());
        assert_eq!(env.state.queries().len(), 2);
        assert!(env.state.has_unsaved_changes());
    }
}
