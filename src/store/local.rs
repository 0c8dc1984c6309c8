//! SQLite snapshot store used when no network store is available.
//!
//! Each entity list and the photo are kept as one JSON document per key and
//! written back whenever they change.

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, DbErr, Statement};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;
use tracing::log::LevelFilter;

use super::ClassStore;
use crate::error::Result;
use crate::models::{
    ClassSnapshot, CreateHomework, CreateMaterial, CreateNews, CreateStudent, HomeworkItem, Keyed, MaterialItem,
    NewsItem, Student, UpdateHomework, UpdateMaterial, UpdateNews, UpdateStudent,
};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS snapshots (key TEXT PRIMARY KEY NOT NULL, value TEXT NOT NULL)";
const SELECT_VALUE: &str = "SELECT value FROM snapshots WHERE key = ?";
const UPSERT_VALUE: &str = "INSERT OR REPLACE INTO snapshots (key, value) VALUES (?, ?)";

/// Snapshot keys, named after the fetch-all fields.
mod keys {
    pub const PHOTO: &str = "classPhoto";
    pub const NEWS: &str = "newsItems";
    pub const STUDENTS: &str = "students";
    pub const HOMEWORK: &str = "homeworkItems";
    pub const MATERIALS: &str = "materialItems";
}

/// Where a newly created entity goes in its list.
#[derive(Debug, Clone, Copy)]
enum Placement {
    Front,
    Back,
}

/// Open the snapshot database with a single pooled connection.
pub async fn connect(database_url: &str) -> std::result::Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opt).await
}

/// Snapshot-backed store.
pub struct LocalStore {
    db: DatabaseConnection,
    secret: String,
}

impl LocalStore {
    /// Open (creating if needed) the snapshot database.
    pub async fn open(database_url: &str, secret: impl Into<String>) -> Result<Self> {
        let db = connect(database_url).await?;
        db.execute_unprepared(CREATE_TABLE).await?;
        info!("Local snapshot store opened");

        Ok(Self {
            db,
            secret: secret.into(),
        })
    }

    /// Read one snapshot document; a missing key yields the default value.
    async fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                SELECT_VALUE,
                [key.into()],
            ))
            .await?;

        match row {
            Some(row) => {
                let value: String = row.try_get("", "value")?;
                Ok(serde_json::from_str(&value)?)
            }
            None => Ok(T::default()),
        }
    }

    async fn save<T: Serialize + Sync + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                UPSERT_VALUE,
                [key.into(), json.into()],
            ))
            .await?;
        Ok(())
    }

    /// Append or prepend a new entity with the next free id.
    async fn insert<T, F>(&self, key: &str, placement: Placement, build: F) -> Result<i64>
    where
        T: Keyed + Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce(i64) -> T + Send,
    {
        let mut items: Vec<T> = self.load(key).await?;
        let id = next_id(&items);
        let item = build(id);
        match placement {
            Placement::Front => items.insert(0, item),
            Placement::Back => items.push(item),
        }
        self.save(key, &items).await?;
        Ok(id)
    }

    /// Apply `change` to the entity with `id`. Unknown ids are left alone.
    async fn modify<T, F>(&self, key: &str, id: i64, change: F) -> Result<()>
    where
        T: Keyed + Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce(&mut T) + Send,
    {
        let mut items: Vec<T> = self.load(key).await?;
        if let Some(item) = items.iter_mut().find(|item| item.id() == id) {
            change(item);
            self.save(key, &items).await?;
        }
        Ok(())
    }

    async fn remove<T>(&self, key: &str, id: i64) -> Result<()>
    where
        T: Keyed + Serialize + DeserializeOwned + Send + Sync,
    {
        let mut items: Vec<T> = self.load(key).await?;
        items.retain(|item| item.id() != id);
        self.save(key, &items).await
    }
}

fn next_id<T: Keyed>(items: &[T]) -> i64 {
    items.iter().map(Keyed::id).max().unwrap_or(0) + 1
}

#[async_trait]
impl ClassStore for LocalStore {
    async fn fetch_all(&self) -> Result<ClassSnapshot> {
        Ok(ClassSnapshot {
            class_photo: self.load(keys::PHOTO).await?,
            news_items: self.load(keys::NEWS).await?,
            students: self.load(keys::STUDENTS).await?,
            homework_items: self.load(keys::HOMEWORK).await?,
            material_items: self.load(keys::MATERIALS).await?,
        })
    }

    async fn update_photo(&self, photo_url: Option<&str>) -> Result<()> {
        self.save(keys::PHOTO, &photo_url).await
    }

    async fn add_news(&self, data: &CreateNews) -> Result<i64> {
        self.insert(keys::NEWS, Placement::Front, |id| NewsItem {
            id,
            title: data.title.clone(),
            content: data.content.clone(),
            date: data.date.clone(),
        })
        .await
    }

    async fn update_news(&self, data: &UpdateNews) -> Result<()> {
        self.modify(keys::NEWS, data.id, |item: &mut NewsItem| {
            item.title = data.title.clone();
            item.content = data.content.clone();
        })
        .await
    }

    async fn delete_news(&self, id: i64) -> Result<()> {
        self.remove::<NewsItem>(keys::NEWS, id).await
    }

    async fn add_student(&self, data: &CreateStudent) -> Result<i64> {
        self.insert(keys::STUDENTS, Placement::Back, |id| Student {
            id,
            name: data.name.clone(),
        })
        .await
    }

    async fn update_student(&self, data: &UpdateStudent) -> Result<()> {
        self.modify(keys::STUDENTS, data.id, |student: &mut Student| {
            student.name = data.name.clone();
        })
        .await
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        self.remove::<Student>(keys::STUDENTS, id).await
    }

    async fn add_homework(&self, data: &CreateHomework) -> Result<i64> {
        self.insert(keys::HOMEWORK, Placement::Front, |id| HomeworkItem {
            id,
            subject: data.subject.clone(),
            task: data.task.clone(),
            due: data.due.clone(),
            status: data.status,
        })
        .await
    }

    async fn update_homework(&self, data: &UpdateHomework) -> Result<()> {
        self.modify(keys::HOMEWORK, data.id, |item: &mut HomeworkItem| {
            item.subject = data.subject.clone();
            item.task = data.task.clone();
            item.due = data.due.clone();
            item.status = data.status;
        })
        .await
    }

    async fn delete_homework(&self, id: i64) -> Result<()> {
        self.remove::<HomeworkItem>(keys::HOMEWORK, id).await
    }

    async fn add_material(&self, data: &CreateMaterial) -> Result<i64> {
        self.insert(keys::MATERIALS, Placement::Front, |id| MaterialItem {
            id,
            title: data.title.clone(),
            kind: data.kind.clone(),
            size: data.size.clone(),
            file_url: data.file_url.clone(),
        })
        .await
    }

    async fn update_material(&self, data: &UpdateMaterial) -> Result<()> {
        self.modify(keys::MATERIALS, data.id, |item: &mut MaterialItem| {
            item.title = data.title.clone();
        })
        .await
    }

    async fn delete_material(&self, id: i64) -> Result<()> {
        self.remove::<MaterialItem>(keys::MATERIALS, id).await
    }

    async fn verify_password(&self, candidate: &str) -> Result<bool> {
        Ok(candidate == self.secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HomeworkStatus;

    async fn open_memory() -> LocalStore {
        LocalStore::open("sqlite::memory:", "pw").await.unwrap()
    }

    fn news(title: &str) -> CreateNews {
        CreateNews {
            title: title.to_string(),
            content: "Long enough content".to_string(),
            date: "01.09.2025".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_store_fetches_empty_snapshot() {
        let store = open_memory().await;
        assert_eq!(store.fetch_all().await.unwrap(), ClassSnapshot::default());
    }

    #[tokio::test]
    async fn test_ids_increase_and_news_is_newest_first() {
        let store = open_memory().await;
        let first = store.add_news(&news("First")).await.unwrap();
        let second = store.add_news(&news("Second")).await.unwrap();

        assert_eq!((first, second), (1, 2));
        let titles: Vec<_> = store
            .fetch_all()
            .await
            .unwrap()
            .news_items
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, ["Second", "First"]);
    }

    #[tokio::test]
    async fn test_students_append_and_ids_follow_max() {
        let store = open_memory().await;
        for name in ["Anna", "Boris", "Clara"] {
            store
                .add_student(&CreateStudent { name: name.to_string() })
                .await
                .unwrap();
        }
        store.delete_student(2).await.unwrap();
        let id = store
            .add_student(&CreateStudent {
                name: "Dmitri".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(id, 4);
        let names: Vec<_> = store
            .fetch_all()
            .await
            .unwrap()
            .students
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["Anna", "Clara", "Dmitri"]);
    }

    #[tokio::test]
    async fn test_update_changes_only_target() {
        let store = open_memory().await;
        let id = store
            .add_homework(&CreateHomework {
                subject: "Math".to_string(),
                task: "Page 12".to_string(),
                due: "2025-09-10".to_string(),
                status: HomeworkStatus::Active,
            })
            .await
            .unwrap();
        store
            .add_homework(&CreateHomework {
                subject: "History".to_string(),
                task: "Essay".to_string(),
                due: "2025-09-12".to_string(),
                status: HomeworkStatus::Active,
            })
            .await
            .unwrap();

        store
            .update_homework(&UpdateHomework {
                id,
                subject: "Algebra".to_string(),
                task: "Page 13".to_string(),
                due: "2025-09-11".to_string(),
                status: HomeworkStatus::Active,
            })
            .await
            .unwrap();

        let homework = store.fetch_all().await.unwrap().homework_items;
        assert_eq!(homework.len(), 2);
        assert_eq!(homework[0].subject, "History");
        assert_eq!(homework[1].subject, "Algebra");
    }

    #[tokio::test]
    async fn test_missing_ids_are_ignored() {
        let store = open_memory().await;
        store
            .update_material(&UpdateMaterial {
                id: 99,
                title: "Nothing".to_string(),
            })
            .await
            .unwrap();
        store.delete_news(7).await.unwrap();
        assert_eq!(store.fetch_all().await.unwrap(), ClassSnapshot::default());
    }

    #[tokio::test]
    async fn test_photo_replace_and_clear() {
        let store = open_memory().await;
        store.update_photo(Some("data:image/png;base64,AA")).await.unwrap();
        assert_eq!(
            store.fetch_all().await.unwrap().class_photo.as_deref(),
            Some("data:image/png;base64,AA")
        );

        store.update_photo(None).await.unwrap();
        assert_eq!(store.fetch_all().await.unwrap().class_photo, None);
    }

    #[tokio::test]
    async fn test_verify_password() {
        let store = open_memory().await;
        assert!(store.verify_password("pw").await.unwrap());
        assert!(!store.verify_password("PW").await.unwrap());
    }
}
