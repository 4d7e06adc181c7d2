use crate::error::{QueryDeckError, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// A query as laid out in an editor buffer.
/// Format: name\n\ncontent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBuffer {
    pub name: String,
    pub content: String,
}

impl EditorBuffer {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn to_buffer(&self) -> String {
        format!("{}\n\n{}", self.name, self.content)
    }

    /// First line is the name; one blank separator line is skipped; the rest
    /// is content, kept verbatim.
    pub fn from_buffer(buffer: &str) -> Self {
        let (first, rest) = buffer.split_once('\n').unwrap_or((buffer, ""));
        let content = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest);
        Self {
            name: first.trim().to_string(),
            content: content.to_string(),
        }
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in ["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok(fallback.to_string());
        }
    }

    Err(QueryDeckError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments, e.g. "code --wait"
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| QueryDeckError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(QueryDeckError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Round-trips `initial` through the user's editor via a temp file.
pub fn edit_buffer(initial: &EditorBuffer) -> Result<EditorBuffer> {
    let temp_file = env::temp_dir().join(format!("querydeck_edit_{}.sql", std::process::id()));
    fs::write(&temp_file, initial.to_buffer())?;

    let edited = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(settle(initial, EditorBuffer::from_buffer(&edited?)))
}

/// Drops the final newline most editors append on write, unless the
/// content already ended with one.
fn settle(initial: &EditorBuffer, mut edited: EditorBuffer) -> EditorBuffer {
    if !initial.content.ends_with('\n') {
        if let Some(stripped) = edited
            .content
            .strip_suffix("\r\n")
            .or_else(|| edited.content.strip_suffix('\n'))
        {
            edited.content = stripped.to_string();
        }
    }
    edited
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_buffer_separates_name_and_content() {
        let buf = EditorBuffer::new("Daily users", "select count(*)\nfrom users");
        assert_eq!(buf.to_buffer(), "Daily users\n\nselect count(*)\nfrom users");
    }

    #[test]
    fn from_buffer_reads_name_and_content() {
        let buf = EditorBuffer::from_buffer("Daily users\n\nselect 1\n");
        assert_eq!(buf.name, "Daily users");
        assert_eq!(buf.content, "select 1\n");
    }

    #[test]
    fn from_buffer_without_blank_separator() {
        let buf = EditorBuffer::from_buffer("Name\nselect 1");
        assert_eq!(buf.name, "Name");
        assert_eq!(buf.content, "select 1");
    }

    #[test]
    fn from_buffer_name_only() {
        let buf = EditorBuffer::from_buffer("Name");
        assert_eq!(buf, EditorBuffer::new("Name", ""));
    }

    #[test]
    fn empty_content_survives_the_editor_format() {
        let original = EditorBuffer::new("Untitled Query", "");
        assert_eq!(EditorBuffer::from_buffer(&original.to_buffer()), original);
    }

    #[test]
    fn untouched_buffer_ignores_newline_added_on_write() {
        let initial = EditorBuffer::new("Report", "select 1");
        let written = format!("{}\n", initial.to_buffer());

        let edited = settle(&initial, EditorBuffer::from_buffer(&written));

        assert_eq!(edited, initial);
    }

    #[test]
    fn newline_only_buffer_becomes_empty_again() {
        let initial = EditorBuffer::new("Untitled Query", "");
        let written = format!("{}\n", initial.to_buffer());

        assert_eq!(settle(&initial, EditorBuffer::from_buffer(&written)), initial);
    }

    #[test]
    fn trailing_newline_kept_when_content_had_one() {
        let initial = EditorBuffer::new("Report", "select 1\n");
        let edited = settle(&initial, EditorBuffer::from_buffer(&initial.to_buffer()));
        assert_eq!(edited.content, "select 1\n");
    }

    #[test]
    fn only_one_newline_is_dropped() {
        let initial = EditorBuffer::new("Report", "select 1");
        let edited = settle(&initial, EditorBuffer::from_buffer("Report\n\nselect 2\n\n"));
        assert_eq!(edited.content, "select 2\n");
    }
}
