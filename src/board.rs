//! Class board: loads data once, then routes gated intents to the handlers.

use tracing::{error, info, warn};

use crate::auth::{AuthGate, CHECK_FAILED, Confirmation, PendingAction, WRONG_PASSWORD};
use crate::error::Result;
use crate::state::{ClassState, Drafts};
use crate::store::ClassStore;

/// Board state plus the store it mirrors.
pub struct ClassBoard<S> {
    pub(crate) store: S,
    pub(crate) state: ClassState,
    pub(crate) gate: AuthGate,
}

impl<S: ClassStore> ClassBoard<S> {
    /// Load the photo and all lists with a single fetch.
    ///
    /// A failed fetch is logged and leaves the lists empty.
    pub async fn load(store: S) -> Self {
        let mut board = Self {
            store,
            state: ClassState {
                is_loading: true,
                ..Default::default()
            },
            gate: AuthGate::default(),
        };

        match board.store.fetch_all().await {
            Ok(snapshot) => {
                board.state.apply_snapshot(snapshot);
                info!(
                    "Loaded {} news, {} students, {} homework, {} materials",
                    board.state.news.len(),
                    board.state.students.len(),
                    board.state.homework.len(),
                    board.state.materials.len()
                );
            }
            Err(e) => error!("Error loading data: {e}"),
        }
        board.state.is_loading = false;

        board
    }

    pub fn state(&self) -> &ClassState {
        &self.state
    }

    /// Form values, for the front end to fill in.
    pub fn drafts_mut(&mut self) -> &mut Drafts {
        &mut self.state.drafts
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut AuthGate {
        &mut self.gate
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Close the secret prompt without running the pending action.
    pub fn cancel_authorization(&mut self) {
        if let Some(action) = self.gate.cancel() {
            info!("Cancelled: {}", action.describe());
        }
    }

    /// Check `secret` and, if accepted, run the pending action once.
    pub async fn confirm_authorization(&mut self, secret: &str) -> Confirmation {
        if self.gate.pending().is_none() {
            return Confirmation::Idle;
        }

        match self.store.verify_password(secret).await {
            Ok(true) => {}
            Ok(false) => {
                warn!("Admin password rejected");
                self.gate.reject(WRONG_PASSWORD);
                return Confirmation::Denied;
            }
            Err(e) => {
                error!("Error verifying password: {e}");
                self.gate.reject(CHECK_FAILED);
                return Confirmation::Denied;
            }
        }

        let Some(action) = self.gate.approve() else {
            return Confirmation::Idle;
        };
        let description = action.describe();
        let result = self.execute(action).await;
        match &result {
            Ok(()) => info!("Done: {description}"),
            Err(e) => error!("Error running {description}: {e}"),
        }
        Confirmation::Executed(result)
    }

    async fn execute(&mut self, action: PendingAction) -> Result<()> {
        match action {
            PendingAction::SaveNews { editing, draft } => self.save_news(editing, draft).await,
            PendingAction::EditNews(id) => {
                self.begin_edit_news(id);
                Ok(())
            }
            PendingAction::DeleteNews(id) => self.delete_news(id).await,
            PendingAction::SaveStudent { editing, draft } => self.save_student(editing, draft).await,
            PendingAction::EditStudent(id) => {
                self.begin_edit_student(id);
                Ok(())
            }
            PendingAction::DeleteStudent(id) => self.delete_student(id).await,
            PendingAction::SaveHomework { editing, draft } => self.save_homework(editing, draft).await,
            PendingAction::EditHomework(id) => {
                self.begin_edit_homework(id);
                Ok(())
            }
            PendingAction::DeleteHomework(id) => self.delete_homework(id).await,
            PendingAction::SaveMaterial { editing, draft } => self.save_material(editing, draft).await,
            PendingAction::EditMaterial(id) => {
                self.begin_edit_material(id);
                Ok(())
            }
            PendingAction::DeleteMaterial(id) => self.delete_material(id).await,
            PendingAction::UpdatePhoto(photo) => self.save_photo(photo).await,
        }
    }
}
