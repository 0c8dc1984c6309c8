//! Full class data as returned by the fetch-all operation.

use serde::{Deserialize, Serialize};

use super::{HomeworkItem, MaterialItem, NewsItem, Student};

/// Everything the board shows: photo plus the four entity lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSnapshot {
    #[serde(default)]
    pub class_photo: Option<String>,
    #[serde(default)]
    pub news_items: Vec<NewsItem>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub homework_items: Vec<HomeworkItem>,
    #[serde(default)]
    pub material_items: Vec<MaterialItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HomeworkStatus;

    #[test]
    fn test_parse_fetch_all_response() {
        let body = r#"{
            "classPhoto": null,
            "newsItems": [{"id": 1, "title": "Trip", "content": "Museum on Friday", "date": "01.09.2025"}],
            "students": [{"id": 4, "name": "Anna"}],
            "homeworkItems": [{"id": 2, "subject": "Math", "task": "Page 12", "due": "2025-09-10", "status": "overdue"}],
            "materialItems": [{"id": 9, "title": "Syllabus", "type": "PDF", "size": "120 KB", "file_url": null}]
        }"#;
        let snapshot: ClassSnapshot = serde_json::from_str(body).unwrap();

        assert_eq!(snapshot.class_photo, None);
        assert_eq!(snapshot.news_items[0].title, "Trip");
        assert_eq!(snapshot.students[0].id, 4);
        assert_eq!(snapshot.homework_items[0].status, HomeworkStatus::Overdue);
        assert_eq!(snapshot.material_items[0].file_url, None);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let snapshot: ClassSnapshot = serde_json::from_str(r#"{"classPhoto": "data:image/png;base64,AA"}"#).unwrap();
        assert_eq!(snapshot.class_photo.as_deref(), Some("data:image/png;base64,AA"));
        assert!(snapshot.news_items.is_empty());
        assert!(snapshot.material_items.is_empty());
    }
}
