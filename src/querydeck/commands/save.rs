use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::state::EditorState;

pub fn run(state: &mut EditorState) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if state.selected_query().is_none() {
        result.add_message(CmdMessage::info("No query is open."));
        return Ok(result);
    }

    match state.save() {
        Some(query) => {
            tracing::debug!(id = %query.id(), "query saved");
            result.add_message(CmdMessage::success(format!("Saved: {}", query.name)));
            result.affected_queries.push(query);
        }
        None => {
            tracing::warn!("open query is no longer in the store; nothing saved");
            result.add_message(CmdMessage::warning("The open query no longer exists."));
        }
    }
    Ok(result)
}
