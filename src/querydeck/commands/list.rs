use crate::commands::CmdResult;
use crate::error::Result;
use crate::reconcile::index_queries;
use crate::state::EditorState;

pub fn run(state: &EditorState) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_queries(index_queries(state)))
}
