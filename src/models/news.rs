//! News feed entries and their DTOs.

use serde::{Deserialize, Serialize};

use super::Keyed;

/// Format used for the date stamped on new news items.
pub const NEWS_DATE_FORMAT: &str = "%d.%m.%Y";

/// A published news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date: String,
}

impl Keyed for NewsItem {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Form values for creating or editing a news item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsDraft {
    pub title: String,
    pub content: String,
}

impl NewsDraft {
    /// Create a draft pre-filled from an existing item.
    pub fn edit(item: &NewsItem) -> Self {
        Self {
            title: item.title.clone(),
            content: item.content.clone(),
        }
    }
}

/// DTO for creating a news item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNews {
    pub title: String,
    pub content: String,
    pub date: String,
}

/// DTO for updating a news item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNews {
    pub id: i64,
    pub title: String,
    pub content: String,
}
