use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::routing::{Navigator, QUERY_ID_PARAM};
use crate::state::EditorState;

pub fn run<N: Navigator>(state: &mut EditorState, nav: &mut N, name: &str) -> Result<CmdResult> {
    let query = state.create(name);
    nav.set_query_param(QUERY_ID_PARAM, &query.id().to_string());
    tracing::debug!(id = %query.id(), "query created");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Created query: {}", query.name)));
    Ok(result.with_affected_queries(vec![query]))
}
