use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::state::EditorState;

const NOTHING_OPEN: &str = "No query is open.";

pub fn set_content(state: &mut EditorState, content: String) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if !state.set_editing_content(content) {
        result.add_message(CmdMessage::info(NOTHING_OPEN));
    }
    Ok(result)
}

pub fn append_content(state: &mut EditorState, text: &str) -> Result<CmdResult> {
    let mut content = state.editing_content().to_string();
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(text);
    set_content(state, content)
}

pub fn set_name(state: &mut EditorState, name: String) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if !state.set_editing_name(name) {
        result.add_message(CmdMessage::info(NOTHING_OPEN));
    }
    Ok(result)
}
