use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{QueryId, Scope};
use crate::remote::RemoteStore;
use crate::routing::{Navigator, QUERY_ID_PARAM};
use crate::state::EditorState;

/// Resource side-loaded with the query list. Its content is not used by the editor.
pub const USER_RESOURCES: &str = "instances";

/// Fetches the instance's queries and makes them the new baseline.
///
/// If the URL already names a query (`queryId`) that exists, it is reopened.
/// On a failed fetch the state is left as it was.
#[tracing::instrument(skip_all, fields(user = %scope.user_id, instance = %scope.instance_id))]
pub fn run<R: RemoteStore, N: Navigator>(
    state: &mut EditorState,
    remote: &R,
    scope: &Scope,
    nav: &mut N,
) -> Result<CmdResult> {
    let queries = remote.fetch_queries(scope)?;
    let resources = remote.fetch_user_resources(&scope.user_id, USER_RESOURCES)?;
    tracing::debug!(has_resources = !resources.is_null(), "user resources side-loaded");

    let count = queries.len();
    state.load(queries);
    tracing::info!(count, "queries loaded");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Loaded {} quer{} for {}",
        count,
        if count == 1 { "y" } else { "ies" },
        scope
    )));

    let requested = nav
        .query_param(QUERY_ID_PARAM)
        .and_then(|raw| raw.parse::<QueryId>().ok());
    match requested.and_then(|id| state.select(id).cloned()) {
        Some(query) => result.affected_queries.push(query),
        None => nav.remove_query_param(QUERY_ID_PARAM),
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::memory::fixtures::RemoteFixture;
    use crate::remote::memory::{RemoteCall, RemoteOp};
    use crate::routing::UrlState;

    #[test]
    fn replaces_state_and_side_loads_resources() {
        let fixture = RemoteFixture::new().with_queries(2);
        let mut state = EditorState::new();
        let mut nav = UrlState::new("/editor");

        run(&mut state, &fixture.remote, &fixture.scope, &mut nav).unwrap();

        assert_eq!(state.queries(), fixture.queries().as_slice());
        assert_eq!(state.baseline().queries(), fixture.queries().as_slice());
        assert!(!state.has_unpushed_changes());
        assert_eq!(
            fixture.remote.calls(),
            vec![
                RemoteCall::FetchQueries(fixture.scope.clone()),
                RemoteCall::FetchUserResources {
                    user_id: fixture.scope.user_id.clone(),
                    resource: USER_RESOURCES.to_string(),
                },
            ]
        );
    }

    #[test]
    fn reopens_query_named_in_url() {
        let fixture = RemoteFixture::new().with_queries(3);
        let wanted = fixture.queries()[1].clone();
        let mut state = EditorState::new();
        let mut nav = UrlState::parse(&format!("/editor?queryId={}", wanted.id()));

        run(&mut state, &fixture.remote, &fixture.scope, &mut nav).unwrap();

        assert_eq!(state.selected_query(), Some(&wanted));
    }

    #[test]
    fn drops_stale_query_param() {
        let fixture = RemoteFixture::new().with_queries(1);
        let mut state = EditorState::new();
        let mut nav = UrlState::parse(&format!("/editor?queryId={}", QueryId::new()));

        run(&mut state, &fixture.remote, &fixture.scope, &mut nav).unwrap();

        assert!(state.selected_query().is_none());
        assert_eq!(nav.to_string(), "/editor");
    }

    #[test]
    fn failed_fetch_leaves_state_untouched() {
        let mut fixture = RemoteFixture::new().with_queries(1);
        let mut state = fixture.state();
        fixture.remote.fail(RemoteOp::Fetch);
        let mut nav = UrlState::new("/editor");

        assert!(run(&mut state, &fixture.remote, &fixture.scope, &mut nav).is_err());
        assert_eq!(state.queries().len(), 1);
    }
}
