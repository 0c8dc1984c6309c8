//! Class roster handlers.

use tracing::{info, warn};

use super::{min_chars, require};
use crate::auth::PendingAction;
use crate::board::ClassBoard;
use crate::error::Result;
use crate::models::{CreateStudent, Student, StudentDraft, UpdateStudent};
use crate::state::{EntityKind, Field, FieldErrors, find_by_id, find_by_id_mut, remove_by_id};
use crate::store::ClassStore;

pub fn validate(draft: &StudentDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    require(&mut errors, Field::StudentName, &draft.name, "Name is required");
    min_chars(
        &mut errors,
        Field::StudentName,
        &draft.name,
        2,
        "Name must be at least 2 characters",
    );
    errors
}

impl<S: ClassStore> ClassBoard<S> {
    pub fn open_student_dialog(&mut self) {
        self.state.open_dialog(EntityKind::Student);
    }

    pub fn close_student_dialog(&mut self) {
        self.state.finish_dialog(EntityKind::Student);
    }

    /// Validate the student draft and, when it passes, ask for the admin secret.
    pub fn submit_student(&mut self) -> bool {
        let errors = validate(&self.state.drafts.student);
        let valid = errors.is_empty();
        self.state.form_errors = errors;
        if valid {
            self.gate.request(PendingAction::SaveStudent {
                editing: self.state.editing.student,
                draft: self.state.drafts.student.clone(),
            });
        }
        valid
    }

    pub fn request_edit_student(&mut self, id: i64) {
        self.gate.request(PendingAction::EditStudent(id));
    }

    pub fn request_delete_student(&mut self, id: i64) {
        self.gate.request(PendingAction::DeleteStudent(id));
    }

    /// Students are appended, keeping roster order.
    pub(crate) async fn save_student(&mut self, editing: Option<i64>, draft: StudentDraft) -> Result<()> {
        match editing {
            Some(id) => {
                let data = UpdateStudent { id, name: draft.name };
                self.store.update_student(&data).await?;
                if let Some(student) = find_by_id_mut(&mut self.state.students, id) {
                    student.name = data.name;
                }
            }
            None => {
                let data = CreateStudent { name: draft.name };
                let id = self.store.add_student(&data).await?;
                info!("Added student {id}");
                self.state.students.push(Student { id, name: data.name });
            }
        }
        self.state.finish_dialog(EntityKind::Student);
        Ok(())
    }

    pub(crate) fn begin_edit_student(&mut self, id: i64) {
        let Some(student) = find_by_id(&self.state.students, id) else {
            warn!("Student {id} not found, nothing to edit");
            return;
        };
        self.state.drafts.student = StudentDraft::edit(student);
        self.state.editing.student = Some(id);
        self.state.form_errors.clear();
        self.state.dialogs.student = true;
    }

    pub(crate) async fn delete_student(&mut self, id: i64) -> Result<()> {
        self.store.delete_student(id).await?;
        remove_by_id(&mut self.state.students, id);
        Ok(())
    }
}
