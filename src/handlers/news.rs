//! News feed handlers.

use chrono::Local;
use tracing::{info, warn};

use super::{min_chars, require};
use crate::auth::PendingAction;
use crate::board::ClassBoard;
use crate::error::Result;
use crate::models::news::NEWS_DATE_FORMAT;
use crate::models::{CreateNews, NewsDraft, NewsItem, UpdateNews};
use crate::state::{EntityKind, Field, FieldErrors, find_by_id, find_by_id_mut, remove_by_id};
use crate::store::ClassStore;

/// Check a news draft. Empty result means valid.
pub fn validate(draft: &NewsDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    require(&mut errors, Field::NewsTitle, &draft.title, "Title is required");
    min_chars(
        &mut errors,
        Field::NewsTitle,
        &draft.title,
        3,
        "Title must be at least 3 characters",
    );
    require(&mut errors, Field::NewsContent, &draft.content, "Content is required");
    min_chars(
        &mut errors,
        Field::NewsContent,
        &draft.content,
        10,
        "Content must be at least 10 characters",
    );
    errors
}

impl<S: ClassStore> ClassBoard<S> {
    /// Open the news dialog with an empty form.
    pub fn open_news_dialog(&mut self) {
        self.state.open_dialog(EntityKind::News);
    }

    pub fn close_news_dialog(&mut self) {
        self.state.finish_dialog(EntityKind::News);
    }

    /// Validate the news draft and, when it passes, ask for the admin secret.
    ///
    /// Returns `false` with form errors set when validation fails.
    pub fn submit_news(&mut self) -> bool {
        let errors = validate(&self.state.drafts.news);
        let valid = errors.is_empty();
        self.state.form_errors = errors;
        if valid {
            self.gate.request(PendingAction::SaveNews {
                editing: self.state.editing.news,
                draft: self.state.drafts.news.clone(),
            });
        }
        valid
    }

    pub fn request_edit_news(&mut self, id: i64) {
        self.gate.request(PendingAction::EditNews(id));
    }

    pub fn request_delete_news(&mut self, id: i64) {
        self.gate.request(PendingAction::DeleteNews(id));
    }

    /// Create or update a news item, then close the dialog.
    pub(crate) async fn save_news(&mut self, editing: Option<i64>, draft: NewsDraft) -> Result<()> {
        match editing {
            Some(id) => {
                let data = UpdateNews {
                    id,
                    title: draft.title,
                    content: draft.content,
                };
                self.store.update_news(&data).await?;
                if let Some(item) = find_by_id_mut(&mut self.state.news, id) {
                    item.title = data.title;
                    item.content = data.content;
                }
            }
            None => {
                let data = CreateNews {
                    title: draft.title,
                    content: draft.content,
                    date: Local::now().format(NEWS_DATE_FORMAT).to_string(),
                };
                let id = self.store.add_news(&data).await?;
                info!("Added news {id}");
                self.state.news.insert(
                    0,
                    NewsItem {
                        id,
                        title: data.title,
                        content: data.content,
                        date: data.date,
                    },
                );
            }
        }
        self.state.finish_dialog(EntityKind::News);
        Ok(())
    }

    pub(crate) fn begin_edit_news(&mut self, id: i64) {
        let Some(item) = find_by_id(&self.state.news, id) else {
            warn!("News {id} not found, nothing to edit");
            return;
        };
        self.state.drafts.news = NewsDraft::edit(item);
        self.state.editing.news = Some(id);
        self.state.form_errors.clear();
        self.state.dialogs.news = true;
    }

    pub(crate) async fn delete_news(&mut self, id: i64) -> Result<()> {
        self.store.delete_news(id).await?;
        remove_by_id(&mut self.state.news, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str) -> NewsDraft {
        NewsDraft {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_short_content_flags_only_content() {
        let errors = validate(&draft("Exam", "short"));

        assert_eq!(errors.fields().collect::<Vec<_>>(), [Field::NewsContent]);
        assert_eq!(
            errors.get(Field::NewsContent),
            Some("Content must be at least 10 characters")
        );
    }

    #[test]
    fn test_blank_title_of_enough_length_is_required() {
        let errors = validate(&draft("    ", "See you at 9am tomorrow"));

        assert_eq!(errors.fields().collect::<Vec<_>>(), [Field::NewsTitle]);
        assert_eq!(errors.get(Field::NewsTitle), Some("Title is required"));
    }

    #[test]
    fn test_empty_draft_reports_length_messages() {
        let errors = validate(&NewsDraft::default());

        assert_eq!(errors.get(Field::NewsTitle), Some("Title must be at least 3 characters"));
        assert_eq!(
            errors.get(Field::NewsContent),
            Some("Content must be at least 10 characters")
        );
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate(&draft("Exam", "See you at 9am tomorrow")).is_empty());
    }
}
