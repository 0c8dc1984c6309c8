//! Downloadable class materials and their DTOs.

use serde::{Deserialize, Serialize};

use super::Keyed;

/// A downloadable material.
///
/// The file reference is fixed at creation; only the title can be edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: String,
    #[serde(default, alias = "fileUrl", skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl Keyed for MaterialItem {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A file picked for upload, already converted to an embeddable reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub size_bytes: u64,
    pub reference: String,
}

impl FileUpload {
    /// Type tag derived from the file extension.
    pub fn kind(&self) -> String {
        file_type_tag(&self.name)
    }

    /// Human-readable size.
    pub fn size_label(&self) -> String {
        format_size(self.size_bytes)
    }
}

/// Form values for creating a material or renaming one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialDraft {
    pub title: String,
    pub file: Option<FileUpload>,
}

impl MaterialDraft {
    /// Create a draft for renaming an existing material. No file is attached.
    pub fn edit(item: &MaterialItem) -> Self {
        Self {
            title: item.title.clone(),
            file: None,
        }
    }
}

/// DTO for creating a material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMaterial {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: String,
    pub file_url: Option<String>,
}

/// DTO for renaming a material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMaterial {
    pub id: i64,
    pub title: String,
}

/// Upper-cased text after the last `.` of a file name, or `FILE` when that is empty.
///
/// A name without a dot yields the whole name.
pub fn file_type_tag(name: &str) -> String {
    let ext = name.rsplit('.').next().unwrap_or_default();
    if ext.is_empty() {
        "FILE".to_string()
    } else {
        ext.to_uppercase()
    }
}

/// Size in whole kilobytes, rounded half up.
pub fn format_size(bytes: u64) -> String {
    format!("{} KB", bytes / 1024 + u64::from(bytes % 1024 >= 512))
}
