//! Data models for news, students, homework, materials, and the class snapshot.

pub mod homework;
pub mod material;
pub mod news;
pub mod snapshot;
pub mod student;

pub use homework::{CreateHomework, HomeworkDraft, HomeworkItem, HomeworkStatus, UpdateHomework};
pub use material::{CreateMaterial, FileUpload, MaterialDraft, MaterialItem, UpdateMaterial};
pub use news::{CreateNews, NewsDraft, NewsItem, UpdateNews};
pub use snapshot::ClassSnapshot;
pub use student::{CreateStudent, Student, StudentDraft, UpdateStudent};

/// An entity identified by a store-assigned integer id.
pub trait Keyed {
    fn id(&self) -> i64;
}
