use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::QueryId;
use crate::routing::{Navigator, QUERY_ID_PARAM};
use crate::state::EditorState;

/// Marks a query for deletion on the next push.
///
/// Deleting the open query closes the editor and drops `queryId` from the URL.
pub fn run<N: Navigator>(state: &mut EditorState, nav: &mut N, id: QueryId) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match state.mark_deleted(id) {
        Some(was_selected) => {
            if was_selected {
                nav.remove_query_param(QUERY_ID_PARAM);
            }
            tracing::debug!(%id, was_selected, "query marked for deletion");
            if let Some(query) = state.query(id).cloned() {
                result.add_message(CmdMessage::success(format!(
                    "Marked for deletion: {} (push to apply)",
                    query.name
                )));
                result.affected_queries.push(query);
            }
        }
        None => result.add_message(CmdMessage::info(format!("No query with id {}", id))),
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Query;
    use crate::reconcile::{classify, QueryStatus};
    use crate::routing::UrlState;

    #[test]
    fn deleting_selected_query_clears_editor_and_url() {
        let c = Query::new("C", "select 1");
        let mut state = EditorState::with_queries(vec![c.clone()]);
        let mut nav = UrlState::new("/editor");
        crate::commands::select::run(&mut state, &mut nav, c.id()).unwrap();
        assert!(nav.query_param(QUERY_ID_PARAM).is_some());

        run(&mut state, &mut nav, c.id()).unwrap();

        assert!(state.selected_query().is_none());
        assert_eq!(state.editing_content(), "");
        assert!(nav.query_param(QUERY_ID_PARAM).is_none());
    }

    #[test]
    fn deleting_other_query_keeps_url() {
        let a = Query::new("A", "");
        let b = Query::new("B", "");
        let mut state = EditorState::with_queries(vec![a.clone(), b.clone()]);
        let mut nav = UrlState::new("/editor");
        crate::commands::select::run(&mut state, &mut nav, a.id()).unwrap();

        run(&mut state, &mut nav, b.id()).unwrap();

        assert_eq!(nav.query_param(QUERY_ID_PARAM), Some(a.id().to_string()));
        assert_eq!(classify(&state, &b), QueryStatus::Deleted);
    }

    #[test]
    fn modified_query_still_classified_deleted() {
        let a = Query::new("A", "v1");
        let mut state = EditorState::with_queries(vec![a.clone()]);
        state.select(a.id());
        state.set_editing_content("v2".into());
        state.save();
        let mut nav = UrlState::new("/editor");

        run(&mut state, &mut nav, a.id()).unwrap();

        assert_eq!(classify(&state, &state.queries()[0]), QueryStatus::Deleted);
    }
}
