//! Homework assignments and their DTOs.

use serde::{Deserialize, Serialize};

use super::Keyed;

/// Homework status.
///
/// Assigned once at creation and never recomputed from the due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    #[default]
    Active,
    Upcoming,
    Overdue,
}

impl HomeworkStatus {
    /// Get the display name for the status.
    pub fn name(&self) -> &'static str {
        match self {
            HomeworkStatus::Active => "Active",
            HomeworkStatus::Upcoming => "Upcoming",
            HomeworkStatus::Overdue => "Overdue",
        }
    }
}

/// A homework assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeworkItem {
    pub id: i64,
    pub subject: String,
    pub task: String,
    pub due: String,
    #[serde(default)]
    pub status: HomeworkStatus,
}

impl Keyed for HomeworkItem {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Form values for creating or editing a homework assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeworkDraft {
    pub subject: String,
    pub task: String,
    pub due: String,
}

impl HomeworkDraft {
    pub fn edit(item: &HomeworkItem) -> Self {
        Self {
            subject: item.subject.clone(),
            task: item.task.clone(),
            due: item.due.clone(),
        }
    }
}

/// DTO for creating a homework assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHomework {
    pub subject: String,
    pub task: String,
    pub due: String,
    pub status: HomeworkStatus,
}

/// DTO for updating a homework assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateHomework {
    pub id: i64,
    pub subject: String,
    pub task: String,
    pub due: String,
    pub status: HomeworkStatus,
}
