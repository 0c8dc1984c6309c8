//! Homework handlers.

use tracing::{info, warn};

use super::{min_chars, require};
use crate::auth::PendingAction;
use crate::board::ClassBoard;
use crate::error::Result;
use crate::models::{CreateHomework, HomeworkDraft, HomeworkItem, HomeworkStatus, UpdateHomework};
use crate::state::{EntityKind, Field, FieldErrors, find_by_id, find_by_id_mut, remove_by_id};
use crate::store::ClassStore;

pub fn validate(draft: &HomeworkDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    require(&mut errors, Field::HomeworkSubject, &draft.subject, "Subject is required");
    require(&mut errors, Field::HomeworkTask, &draft.task, "Task is required");
    min_chars(
        &mut errors,
        Field::HomeworkTask,
        &draft.task,
        5,
        "Task must be at least 5 characters",
    );
    if draft.due.is_empty() {
        errors.set(Field::HomeworkDue, "Due date is required");
    }
    errors
}

impl<S: ClassStore> ClassBoard<S> {
    pub fn open_homework_dialog(&mut self) {
        self.state.open_dialog(EntityKind::Homework);
    }

    pub fn close_homework_dialog(&mut self) {
        self.state.finish_dialog(EntityKind::Homework);
    }

    /// Validate the homework draft and, when it passes, ask for the admin secret.
    pub fn submit_homework(&mut self) -> bool {
        let errors = validate(&self.state.drafts.homework);
        let valid = errors.is_empty();
        self.state.form_errors = errors;
        if valid {
            self.gate.request(PendingAction::SaveHomework {
                editing: self.state.editing.homework,
                draft: self.state.drafts.homework.clone(),
            });
        }
        valid
    }

    pub fn request_edit_homework(&mut self, id: i64) {
        self.gate.request(PendingAction::EditHomework(id));
    }

    pub fn request_delete_homework(&mut self, id: i64) {
        self.gate.request(PendingAction::DeleteHomework(id));
    }

    /// New homework starts `Active`; an update keeps the item's current status.
    pub(crate) async fn save_homework(&mut self, editing: Option<i64>, draft: HomeworkDraft) -> Result<()> {
        match editing {
            Some(id) => {
                let status = find_by_id(&self.state.homework, id)
                    .map(|item| item.status)
                    .unwrap_or_default();
                let data = UpdateHomework {
                    id,
                    subject: draft.subject,
                    task: draft.task,
                    due: draft.due,
                    status,
                };
                self.store.update_homework(&data).await?;
                if let Some(item) = find_by_id_mut(&mut self.state.homework, id) {
                    item.subject = data.subject;
                    item.task = data.task;
                    item.due = data.due;
                }
            }
            None => {
                let data = CreateHomework {
                    subject: draft.subject,
                    task: draft.task,
                    due: draft.due,
                    status: HomeworkStatus::Active,
                };
                let id = self.store.add_homework(&data).await?;
                info!("Added homework {id}");
                self.state.homework.insert(
                    0,
                    HomeworkItem {
                        id,
                        subject: data.subject,
                        task: data.task,
                        due: data.due,
                        status: data.status,
                    },
                );
            }
        }
        self.state.finish_dialog(EntityKind::Homework);
        Ok(())
    }

    pub(crate) fn begin_edit_homework(&mut self, id: i64) {
        let Some(item) = find_by_id(&self.state.homework, id) else {
            warn!("Homework {id} not found, nothing to edit");
            return;
        };
        self.state.drafts.homework = HomeworkDraft::edit(item);
        self.state.editing.homework = Some(id);
        self.state.form_errors.clear();
        self.state.dialogs.homework = true;
    }

    pub(crate) async fn delete_homework(&mut self, id: i64) -> Result<()> {
        self.store.delete_homework(id).await?;
        remove_by_id(&mut self.state.homework, id);
        Ok(())
    }
}
