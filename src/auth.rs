//! Admin confirmation gate for mutating actions.
//!
//! The gate only holds state. [`crate::board::ClassBoard`] verifies the
//! submitted secret and runs the approved action.

use crate::error::AppError;
use crate::models::{HomeworkDraft, MaterialDraft, NewsDraft, StudentDraft};

/// Shown when the store rejects the submitted secret.
pub const WRONG_PASSWORD: &str = "Wrong password";

/// Shown when the secret could not be checked at all.
pub const CHECK_FAILED: &str = "Password check failed";

/// A mutation waiting for the admin secret.
///
/// Save variants carry the editing target and a copy of the draft taken at
/// submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    SaveNews { editing: Option<i64>, draft: NewsDraft },
    EditNews(i64),
    DeleteNews(i64),
    SaveStudent { editing: Option<i64>, draft: StudentDraft },
    EditStudent(i64),
    DeleteStudent(i64),
    SaveHomework { editing: Option<i64>, draft: HomeworkDraft },
    EditHomework(i64),
    DeleteHomework(i64),
    SaveMaterial { editing: Option<i64>, draft: MaterialDraft },
    EditMaterial(i64),
    DeleteMaterial(i64),
    UpdatePhoto(Option<String>),
}

impl PendingAction {
    /// Short description used in log messages.
    pub fn describe(&self) -> String {
        match self {
            PendingAction::SaveNews { editing: Some(id), .. } => format!("update news {id}"),
            PendingAction::SaveNews { editing: None, .. } => "add news".to_string(),
            PendingAction::EditNews(id) => format!("edit news {id}"),
            PendingAction::DeleteNews(id) => format!("delete news {id}"),
            PendingAction::SaveStudent { editing: Some(id), .. } => format!("update student {id}"),
            PendingAction::SaveStudent { editing: None, .. } => "add student".to_string(),
            PendingAction::EditStudent(id) => format!("edit student {id}"),
            PendingAction::DeleteStudent(id) => format!("delete student {id}"),
            PendingAction::SaveHomework { editing: Some(id), .. } => format!("update homework {id}"),
            PendingAction::SaveHomework { editing: None, .. } => "add homework".to_string(),
            PendingAction::EditHomework(id) => format!("edit homework {id}"),
            PendingAction::DeleteHomework(id) => format!("delete homework {id}"),
            PendingAction::SaveMaterial { editing: Some(id), .. } => format!("update material {id}"),
            PendingAction::SaveMaterial { editing: None, .. } => "add material".to_string(),
            PendingAction::EditMaterial(id) => format!("edit material {id}"),
            PendingAction::DeleteMaterial(id) => format!("delete material {id}"),
            PendingAction::UpdatePhoto(Some(_)) => "update photo".to_string(),
            PendingAction::UpdatePhoto(None) => "remove photo".to_string(),
        }
    }
}

/// Outcome of submitting a secret.
#[derive(Debug)]
pub enum Confirmation {
    /// Nothing was waiting for authorization.
    Idle,
    /// Secret rejected or unverifiable. Prompt stays open; action retained.
    Denied,
    /// Action ran once. A persistence failure has already been logged.
    Executed(Result<(), AppError>),
}

/// Secret prompt state with at most one pending action.
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    pending: Option<PendingAction>,
    open: bool,
    /// Text typed into the prompt.
    pub input: String,
    error: Option<String>,
}

impl AuthGate {
    /// Store `action` and open the prompt. Replaces any outstanding action.
    pub fn request(&mut self, action: PendingAction) {
        self.pending = Some(action);
        self.open = true;
        self.input.clear();
        self.error = None;
    }

    /// Approve the pending action: close the prompt, clear its state, and hand the action back.
    pub fn approve(&mut self) -> Option<PendingAction> {
        let action = self.pending.take();
        self.open = false;
        self.input.clear();
        self.error = None;
        action
    }

    /// Keep the prompt open and show `message`.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Discard the pending action without running it.
    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.open = false;
        self.input.clear();
        self.error = None;
        self.pending.take()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
