//! Class roster entries and their DTOs.

use serde::{Deserialize, Serialize};

use super::Keyed;

/// A student on the class roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
}

impl Keyed for Student {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Form values for creating or editing a student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
}

impl StudentDraft {
    pub fn edit(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
        }
    }
}

/// DTO for creating a student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudent {
    pub name: String,
}

/// DTO for updating a student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStudent {
    pub id: i64,
    pub name: String,
}
