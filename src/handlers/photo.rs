//! Class photo handler.

use crate::auth::PendingAction;
use crate::board::ClassBoard;
use crate::error::Result;
use crate::store::ClassStore;

impl<S: ClassStore> ClassBoard<S> {
    /// Ask for the admin secret to replace the photo, or remove it with `None`.
    pub fn request_photo_update(&mut self, photo: Option<String>) {
        self.gate.request(PendingAction::UpdatePhoto(photo));
    }

    pub(crate) async fn save_photo(&mut self, photo: Option<String>) -> Result<()> {
        self.store.update_photo(photo.as_deref()).await?;
        self.state.photo = photo;
        Ok(())
    }
}
