use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::gate::Popup;
use crate::model::QueryId;
use crate::state::EditorState;

/// Un-marks a query. Also closes whatever popup was open.
pub fn run(state: &mut EditorState, id: QueryId) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if state.recover(id) {
        tracing::debug!(%id, "query recovered");
        if let Some(query) = state.query(id).cloned() {
            result.add_message(CmdMessage::success(format!("Recovered: {}", query.name)));
            result.affected_queries.push(query);
        }
    } else {
        result.add_message(CmdMessage::info("Query is not marked for deletion."));
    }
    Ok(result)
}

/// Asks the user whether a marked query should be recovered.
pub fn request(state: &mut EditorState, id: QueryId) -> Result<CmdResult> {
    let result = CmdResult::default();
    if !state.is_deleted(id) {
        return Ok(result.with_message(CmdMessage::info("Query is not marked for deletion.")));
    }
    let popup = Popup::RecoverDeleted { id };
    state.raise(popup)?;
    Ok(result.with_popup(popup))
}
