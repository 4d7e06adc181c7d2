//! # Confirmation Gate
//!
//! Some editor transitions would silently throw away the open buffer:
//! switching to another query, creating a new one, and pushing (which only
//! sends committed values). Before any of those runs, the gate checks for
//! unsaved changes and, if there are any, parks the action inside a
//! [`Popup::SaveBeforeProceed`] instead of running it.
//!
//! The UI then resolves the popup with a [`Choice`]:
//!
//! - `Confirm`: save the buffer, then run the parked action.
//! - `Cancel`: discard the buffer, then run the parked action.
//!
//! A second popup kind, [`Popup::RecoverDeleted`], asks whether a query
//! marked for deletion should be restored.
//!
//! At most one popup is active. Raising another while one is pending is
//! refused with [`QueryDeckError::PopupPending`].
//!
//! This module only decides; the continuations live in
//! [`crate::commands::popup`].

use crate::error::{QueryDeckError, Result};
use crate::model::QueryId;
use std::fmt;

/// An action held back until the user answers a popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Select(QueryId),
    Create,
    Push,
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingAction::Select(_) => write!(f, "switching queries"),
            PendingAction::Create => write!(f, "creating a new query"),
            PendingAction::Push => write!(f, "pushing"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    SaveBeforeProceed { pending: PendingAction },
    RecoverDeleted { id: QueryId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Confirm,
    Cancel,
}

/// Decides whether `action` may run right away.
///
/// Returns the popup to raise when unsaved changes are in the way, `None` when
/// the action can proceed.
pub fn guard(
    active: Option<&Popup>,
    has_unsaved_changes: bool,
    action: PendingAction,
) -> Result<Option<Popup>> {
    if active.is_some() {
        return Err(QueryDeckError::PopupPending);
    }
    if has_unsaved_changes {
        return Ok(Some(Popup::SaveBeforeProceed { pending: action }));
    }
    Ok(None)
}
