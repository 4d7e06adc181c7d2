use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::gate::Popup;
use crate::model::QueryId;
use crate::routing::{Navigator, QUERY_ID_PARAM};
use crate::state::EditorState;

/// Opens a query in the editor. Any open buffer is replaced without saving;
/// callers go through the gate first.
///
/// A query marked for deletion is not opened: the recover popup is raised instead.
pub fn run<N: Navigator>(state: &mut EditorState, nav: &mut N, id: QueryId) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if state.selected_id() == Some(id) {
        return Ok(result);
    }

    if state.is_deleted(id) {
        let popup = Popup::RecoverDeleted { id };
        state.raise(popup)?;
        return Ok(result.with_popup(popup));
    }

    match state.select(id).cloned() {
        Some(query) => {
            nav.set_query_param(QUERY_ID_PARAM, &id.to_string());
            tracing::debug!(%id, "query selected");
            result.add_message(CmdMessage::info(format!("Editing: {}", query.name)));
            result.affected_queries.push(query);
        }
        None => result.add_message(CmdMessage::info(format!("No query with id {}", id))),
    }

    Ok(result)
}
