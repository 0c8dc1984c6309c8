//! Persistence backends for the class board.
//!
//! Handlers talk to a [`ClassStore`]; whether that is the remote endpoint or
//! the local SQLite snapshot is decided once at startup.

pub mod local;
pub mod remote;

#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    ClassSnapshot, CreateHomework, CreateMaterial, CreateNews, CreateStudent, UpdateHomework, UpdateMaterial,
    UpdateNews, UpdateStudent,
};

pub use local::LocalStore;
pub use remote::RemoteStore;

/// One operation per intent. Creations return the store-assigned id.
#[async_trait]
pub trait ClassStore: Send + Sync {
    /// Load the photo and every entity list.
    async fn fetch_all(&self) -> Result<ClassSnapshot>;

    /// Replace (or clear) the class photo.
    async fn update_photo(&self, photo_url: Option<&str>) -> Result<()>;

    async fn add_news(&self, data: &CreateNews) -> Result<i64>;
    async fn update_news(&self, data: &UpdateNews) -> Result<()>;
    async fn delete_news(&self, id: i64) -> Result<()>;

    async fn add_student(&self, data: &CreateStudent) -> Result<i64>;
    async fn update_student(&self, data: &UpdateStudent) -> Result<()>;
    async fn delete_student(&self, id: i64) -> Result<()>;

    async fn add_homework(&self, data: &CreateHomework) -> Result<i64>;
    async fn update_homework(&self, data: &UpdateHomework) -> Result<()>;
    async fn delete_homework(&self, id: i64) -> Result<()>;

    async fn add_material(&self, data: &CreateMaterial) -> Result<i64>;
    async fn update_material(&self, data: &UpdateMaterial) -> Result<()>;
    async fn delete_material(&self, id: i64) -> Result<()>;

    /// Check a candidate admin secret.
    async fn verify_password(&self, candidate: &str) -> Result<bool>;
}
