use crate::commands::{CmdMessage, CmdResult};
use crate::config::PushFailurePolicy;
use crate::error::Result;
use crate::model::Scope;
use crate::reconcile::PushPlan;
use crate::remote::RemoteStore;
use crate::state::EditorState;

/// Sends committed changes and deletions to the remote store.
///
/// Upserts are sent first; deletions only once the upsert call returned.
/// The baseline advances after both. On failure the pushing flag is cleared
/// and `policy` decides whether the baseline advances anyway.
#[tracing::instrument(skip_all, fields(user = %scope.user_id, instance = %scope.instance_id))]
pub fn run<R: RemoteStore>(
    state: &mut EditorState,
    remote: &mut R,
    scope: &Scope,
    policy: PushFailurePolicy,
) -> Result<CmdResult> {
    let plan = state.begin_push()?;
    let mut result = CmdResult::default();

    if plan.is_empty() {
        state.complete_push(&plan);
        result.add_message(CmdMessage::info("Nothing to push."));
        return Ok(result);
    }

    if let Err(e) = send(remote, scope, &plan) {
        state.abort_push(&plan, policy);
        match policy {
            PushFailurePolicy::KeepBaseline => {
                tracing::warn!(error = %e, "push failed; changes remain unpushed");
            }
            PushFailurePolicy::AdvanceBaseline => {
                tracing::warn!(error = %e, "push failed; baseline advanced regardless");
            }
        }
        return Err(e);
    }

    state.complete_push(&plan);
    tracing::info!(
        upserted = plan.upserts.len(),
        deleted = plan.deletions.len(),
        "push complete"
    );

    if !plan.upserts.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "Pushed {} quer{}",
            plan.upserts.len(),
            if plan.upserts.len() == 1 { "y" } else { "ies" }
        )));
    }
    if !plan.deletions.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "Deleted {} quer{}",
            plan.deletions.len(),
            if plan.deletions.len() == 1 { "y" } else { "ies" }
        )));
    }
    Ok(result.with_affected_queries(plan.upserts))
}

fn send<R: RemoteStore>(remote: &mut R, scope: &Scope, plan: &PushPlan) -> Result<()> {
    if !plan.upserts.is_empty() {
        remote.upsert_queries(scope, &plan.upserts)?;
    }
    if !plan.deletions.is_empty() {
        remote.delete_queries(scope, &plan.deletions)?;
    }
    Ok(())
}
