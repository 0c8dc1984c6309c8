//! Board state: entity lists, drafts, dialogs, and form errors.

use std::collections::BTreeMap;

use crate::models::{
    ClassSnapshot, HomeworkDraft, HomeworkItem, Keyed, MaterialDraft, MaterialItem, NewsDraft, NewsItem, Student,
    StudentDraft,
};

/// The four editable entity lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    News,
    Student,
    Homework,
    Material,
}

/// Form field that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    NewsTitle,
    NewsContent,
    StudentName,
    HomeworkSubject,
    HomeworkTask,
    HomeworkDue,
    MaterialTitle,
    MaterialFile,
}

impl Field {
    /// Stable error key for the field.
    pub fn key(&self) -> &'static str {
        match self {
            Field::NewsTitle => "news_title",
            Field::NewsContent => "news_content",
            Field::StudentName => "student_name",
            Field::HomeworkSubject => "homework_subject",
            Field::HomeworkTask => "homework_task",
            Field::HomeworkDue => "homework_due",
            Field::MaterialTitle => "material_title",
            Field::MaterialFile => "material_file",
        }
    }
}

/// Field-scoped validation messages. Later messages for a field replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Which entity dialogs are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dialogs {
    pub news: bool,
    pub student: bool,
    pub homework: bool,
    pub material: bool,
}

impl Dialogs {
    pub fn set(&mut self, kind: EntityKind, open: bool) {
        match kind {
            EntityKind::News => self.news = open,
            EntityKind::Student => self.student = open,
            EntityKind::Homework => self.homework = open,
            EntityKind::Material => self.material = open,
        }
    }
}

/// In-progress form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drafts {
    pub news: NewsDraft,
    pub student: StudentDraft,
    pub homework: HomeworkDraft,
    pub material: MaterialDraft,
}

impl Drafts {
    /// Reset one entity's form to default values.
    pub fn reset(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::News => self.news = NewsDraft::default(),
            EntityKind::Student => self.student = StudentDraft::default(),
            EntityKind::Homework => self.homework = HomeworkDraft::default(),
            EntityKind::Material => self.material = MaterialDraft::default(),
        }
    }
}

/// Ids of the entities currently being edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Editing {
    pub news: Option<i64>,
    pub student: Option<i64>,
    pub homework: Option<i64>,
    pub material: Option<i64>,
}

impl Editing {
    pub fn set(&mut self, kind: EntityKind, id: Option<i64>) {
        match kind {
            EntityKind::News => self.news = id,
            EntityKind::Student => self.student = id,
            EntityKind::Homework => self.homework = id,
            EntityKind::Material => self.material = id,
        }
    }
}

/// Everything the board displays and edits.
#[derive(Debug, Clone, Default)]
pub struct ClassState {
    pub photo: Option<String>,
    pub news: Vec<NewsItem>,
    pub students: Vec<Student>,
    pub homework: Vec<HomeworkItem>,
    pub materials: Vec<MaterialItem>,
    pub is_loading: bool,
    pub drafts: Drafts,
    pub editing: Editing,
    pub dialogs: Dialogs,
    pub form_errors: FieldErrors,
}

impl ClassState {
    /// Replace the photo and all lists with fetched data.
    pub fn apply_snapshot(&mut self, snapshot: ClassSnapshot) {
        self.photo = snapshot.class_photo;
        self.news = snapshot.news_items;
        self.students = snapshot.students;
        self.homework = snapshot.homework_items;
        self.materials = snapshot.material_items;
    }

    /// Start a fresh form for `kind` and open its dialog.
    pub fn open_dialog(&mut self, kind: EntityKind) {
        self.drafts.reset(kind);
        self.editing.set(kind, None);
        self.form_errors.clear();
        self.dialogs.set(kind, true);
    }

    /// Reset the form, close the dialog, and forget the edit target.
    pub fn finish_dialog(&mut self, kind: EntityKind) {
        self.drafts.reset(kind);
        self.dialogs.set(kind, false);
        self.form_errors.clear();
        self.editing.set(kind, None);
    }

    /// News whose title, date, or content contains `query`, ignoring case.
    pub fn search_news(&self, query: &str) -> Vec<&NewsItem> {
        let query = query.to_lowercase();
        self.news
            .iter()
            .filter(|n| {
                query.trim().is_empty()
                    || n.title.to_lowercase().contains(&query)
                    || n.date.to_lowercase().contains(&query)
                    || n.content.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Materials whose title or type contains `query`, ignoring case.
    pub fn search_materials(&self, query: &str) -> Vec<&MaterialItem> {
        let query = query.to_lowercase();
        self.materials
            .iter()
            .filter(|m| {
                query.trim().is_empty()
                    || m.title.to_lowercase().contains(&query)
                    || m.kind.to_lowercase().contains(&query)
            })
            .collect()
    }
}

/// Find an entity by id.
pub fn find_by_id<T: Keyed>(items: &[T], id: i64) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

/// Find an entity by id for in-place update.
pub fn find_by_id_mut<T: Keyed>(items: &mut [T], id: i64) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

/// Drop the entity with `id`; other entries keep their order.
pub fn remove_by_id<T: Keyed>(items: &mut Vec<T>, id: i64) {
    items.retain(|item| item.id() != id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news(id: i64, title: &str, date: &str, content: &str) -> NewsItem {
        NewsItem {
            id,
            title: title.to_string(),
            content: content.to_string(),
            date: date.to_string(),
        }
    }

    fn material(id: i64, title: &str, kind: &str) -> MaterialItem {
        MaterialItem {
            id,
            title: title.to_string(),
            kind: kind.to_string(),
            size: "1 KB".to_string(),
            file_url: None,
        }
    }

    #[test]
    fn test_search_news_matches_any_field() {
        let state = ClassState {
            news: vec![
                news(1, "Museum trip", "01.09.2025", "Bring lunch"),
                news(2, "Exam", "15.10.2025", "Room 12 at 9am"),
            ],
            ..Default::default()
        };

        assert_eq!(state.search_news("MUSEUM").len(), 1);
        assert_eq!(state.search_news("15.10")[0].id, 2);
        assert_eq!(state.search_news("room")[0].id, 2);
        assert_eq!(state.search_news("  ").len(), 2);
        assert!(state.search_news("holiday").is_empty());
    }

    #[test]
    fn test_search_keeps_surrounding_spaces() {
        let state = ClassState {
            news: vec![
                news(1, "Museum trip", "01.09.2025", "Bring lunch"),
                news(2, "Exam", "15.10.2025", "Room 12 at 9am"),
            ],
            materials: vec![material(1, "Exam notes", "PDF"), material(2, "Old exam", "DOC")],
            ..Default::default()
        };

        assert_eq!(state.search_news(" trip")[0].id, 1);
        assert!(state.search_news(" exam").is_empty());
        assert_eq!(state.search_news("exam")[0].id, 2);
        let hits: Vec<i64> = state.search_materials(" exam").iter().map(|m| m.id).collect();
        assert_eq!(hits, [2]);
    }

    #[test]
    fn test_search_materials_matches_title_or_type() {
        let state = ClassState {
            materials: vec![material(1, "Syllabus", "PDF"), material(2, "Map", "PNG")],
            ..Default::default()
        };

        assert_eq!(state.search_materials("pdf")[0].id, 1);
        assert_eq!(state.search_materials("map")[0].id, 2);
        assert_eq!(state.search_materials("").len(), 2);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut students = vec![
            Student {
                id: 1,
                name: "Anna".to_string(),
            },
            Student {
                id: 2,
                name: "Boris".to_string(),
            },
        ];
        remove_by_id(&mut students, 7);
        assert_eq!(students.len(), 2);

        remove_by_id(&mut students, 1);
        assert_eq!(students[0].name, "Boris");
    }

    #[test]
    fn test_open_dialog_resets_form() {
        let mut state = ClassState::default();
        state.drafts.student.name = "Old".to_string();
        state.editing.student = Some(3);
        state.form_errors.set(Field::StudentName, "Name is required");

        state.open_dialog(EntityKind::Student);

        assert!(state.dialogs.student);
        assert!(!state.dialogs.news);
        assert_eq!(state.drafts.student, StudentDraft::default());
        assert_eq!(state.editing.student, None);
        assert!(state.form_errors.is_empty());
    }

    #[test]
    fn test_later_error_replaces_earlier() {
        let mut errors = FieldErrors::default();
        errors.set(Field::NewsTitle, "Title is required");
        errors.set(Field::NewsTitle, "Title must be at least 3 characters");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::NewsTitle), Some("Title must be at least 3 characters"));
        assert_eq!(errors.fields().map(|f| f.key()).collect::<Vec<_>>(), ["news_title"]);
    }
}
