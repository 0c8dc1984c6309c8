//! Class materials handlers.

use tracing::{info, warn};

use super::require;
use crate::auth::PendingAction;
use crate::board::ClassBoard;
use crate::error::{AppError, Result};
use crate::models::{CreateMaterial, MaterialDraft, MaterialItem, UpdateMaterial};
use crate::state::{EntityKind, Field, FieldErrors, find_by_id, find_by_id_mut, remove_by_id};
use crate::store::ClassStore;

/// Check a material draft. A file is only required for new materials.
pub fn validate(draft: &MaterialDraft, editing: Option<i64>) -> FieldErrors {
    let mut errors = FieldErrors::default();
    require(&mut errors, Field::MaterialTitle, &draft.title, "Title is required");
    if editing.is_none() && draft.file.is_none() {
        errors.set(Field::MaterialFile, "File is required");
    }
    errors
}

impl<S: ClassStore> ClassBoard<S> {
    pub fn open_material_dialog(&mut self) {
        self.state.open_dialog(EntityKind::Material);
    }

    pub fn close_material_dialog(&mut self) {
        self.state.finish_dialog(EntityKind::Material);
    }

    /// Validate the material draft and, when it passes, ask for the admin secret.
    pub fn submit_material(&mut self) -> bool {
        let editing = self.state.editing.material;
        let errors = validate(&self.state.drafts.material, editing);
        let valid = errors.is_empty();
        self.state.form_errors = errors;
        if valid {
            self.gate.request(PendingAction::SaveMaterial {
                editing,
                draft: self.state.drafts.material.clone(),
            });
        }
        valid
    }

    pub fn request_edit_material(&mut self, id: i64) {
        self.gate.request(PendingAction::EditMaterial(id));
    }

    pub fn request_delete_material(&mut self, id: i64) {
        self.gate.request(PendingAction::DeleteMaterial(id));
    }

    /// Upload a new material or rename an existing one. The file itself never changes.
    pub(crate) async fn save_material(&mut self, editing: Option<i64>, draft: MaterialDraft) -> Result<()> {
        match editing {
            Some(id) => {
                let data = UpdateMaterial { id, title: draft.title };
                self.store.update_material(&data).await?;
                if let Some(item) = find_by_id_mut(&mut self.state.materials, id) {
                    item.title = data.title;
                }
            }
            None => {
                let file = draft
                    .file
                    .ok_or_else(|| AppError::not_found("file for new material"))?;
                let data = CreateMaterial {
                    title: draft.title,
                    kind: file.kind(),
                    size: file.size_label(),
                    file_url: Some(file.reference),
                };
                let id = self.store.add_material(&data).await?;
                info!("Added material {id} ({})", data.kind);
                self.state.materials.insert(
                    0,
                    MaterialItem {
                        id,
                        title: data.title,
                        kind: data.kind,
                        size: data.size,
                        file_url: data.file_url,
                    },
                );
            }
        }
        self.state.finish_dialog(EntityKind::Material);
        Ok(())
    }

    pub(crate) fn begin_edit_material(&mut self, id: i64) {
        let Some(item) = find_by_id(&self.state.materials, id) else {
            warn!("Material {id} not found, nothing to edit");
            return;
        };
        self.state.drafts.material = MaterialDraft::edit(item);
        self.state.editing.material = Some(id);
        self.state.form_errors.clear();
        self.state.dialogs.material = true;
    }

    pub(crate) async fn delete_material(&mut self, id: i64) -> Result<()> {
        self.store.delete_material(id).await?;
        remove_by_id(&mut self.state.materials, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileUpload;

    fn upload() -> FileUpload {
        FileUpload {
            name: "syllabus.pdf".to_string(),
            size_bytes: 4096,
            reference: "data:application/pdf;base64,AA".to_string(),
        }
    }

    #[test]
    fn test_blank_title_flags_only_title() {
        let draft = MaterialDraft {
            title: "  ".to_string(),
            file: Some(upload()),
        };
        let errors = validate(&draft, None);

        assert_eq!(errors.fields().collect::<Vec<_>>(), [Field::MaterialTitle]);
        assert_eq!(errors.get(Field::MaterialTitle), Some("Title is required"));
    }

    #[test]
    fn test_file_optional_when_editing() {
        let draft = MaterialDraft {
            title: "Syllabus".to_string(),
            file: None,
        };

        assert!(validate(&draft, Some(3)).is_empty());
        assert_eq!(
            validate(&draft, None).fields().collect::<Vec<_>>(),
            [Field::MaterialFile]
        );
    }
}
