//! The edit session: the one query open in the editor and its uncommitted buffer.

use crate::model::Query;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    selected: Query,
    content: String,
    name_override: Option<String>,
}

impl EditSession {
    /// Opens `query`, seeding the buffer from its stored content.
    pub fn open(query: Query) -> Self {
        let content = query.content.clone();
        Self {
            selected: query,
            content,
            name_override: None,
        }
    }

    pub fn selected(&self) -> &Query {
        &self.selected
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn name_override(&self) -> Option<&str> {
        self.name_override.as_deref()
    }

    /// The name the query would get if saved now.
    pub fn effective_name(&self) -> &str {
        self.name_override
            .as_deref()
            .unwrap_or(&self.selected.name)
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub fn set_name(&mut self, name: String) {
        self.name_override = Some(name);
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.content != self.selected.content
            || self
                .name_override
                .as_ref()
                .is_some_and(|name| *name != self.selected.name)
    }

    /// The selected query with the buffer applied, ready to be committed.
    pub fn edited(&self) -> Query {
        let mut query = self.selected.clone();
        query.content = self.content.clone();
        query.name = self.effective_name().to_string();
        query
    }

    /// Points the session at the committed value and drops the name override.
    pub fn committed(&mut self, query: Query) {
        self.content = query.content.clone();
        self.selected = query;
        self.name_override = None;
    }

    /// Throws the buffer away, back to the stored values.
    pub fn revert(&mut self) {
        self.content = self.selected.content.clone();
        self.name_override = None;
    }
}
