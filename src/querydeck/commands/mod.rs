use crate::gate::Popup;
use crate::model::Query;
use crate::reconcile::DisplayQuery;

pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod load;
pub mod popup;
pub mod push;
pub mod recover;
pub mod save;
pub mod select;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a command did, for the UI to render.
///
/// `popup` is set when the command raised a confirmation instead of (or
/// before) finishing; the UI must resolve it to continue.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_queries: Vec<Query>,
    pub listed_queries: Vec<DisplayQuery>,
    pub popup: Option<Popup>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_queries(mut self, queries: Vec<Query>) -> Self {
        self.affected_queries = queries;
        self
    }

    pub fn with_listed_queries(mut self, queries: Vec<DisplayQuery>) -> Self {
        self.listed_queries = queries;
        self
    }

    pub fn with_popup(mut self, popup: Popup) -> Self {
        self.popup = Some(popup);
        self
    }

    /// Appends the outcome of a follow-up command.
    pub fn absorb(&mut self, other: CmdResult) {
        self.affected_queries.extend(other.affected_queries);
        self.listed_queries.extend(other.listed_queries);
        self.messages.extend(other.messages);
        if other.popup.is_some() {
            self.popup = other.popup;
        }
    }
}
