//! Notes workflows: per-book notes with create and delete.
//!
//! The notes page picks a book through `library::suggest_books`, then shows
//! and edits the notes of that book.

#[cfg(test)]
#[path = "notes_test.rs"]
mod notes_test;

use super::ui::Notice;
use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::net::http::HttpTransport;
use crate::net::types::{NewNote, Note};

/// Values collected by the "new note" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub page_number: i64,
    pub content: String,
}

impl NoteForm {
    /// # Errors
    ///
    /// Returns `Validation` for a non-positive page or blank content.
    pub fn validate(&self) -> Result<NewNote, ApiError> {
        if self.page_number <= 0 {
            return Err(ApiError::validation("Page number must be greater than 0."));
        }
        let content = self.content.trim();
        if content.is_empty() {
            return Err(ApiError::validation("Note content is required!"));
        }
        Ok(NewNote { page_number: self.page_number, content: content.to_owned() })
    }
}

/// # Errors
///
/// Returns an error notice when the notes cannot be fetched.
pub async fn load_notes<T: HttpTransport>(api: &ApiClient<T>, book_id: i64) -> Result<Vec<Note>, Notice> {
    api::fetch_notes(api, book_id)
        .await
        .map_err(|err| Notice::error(err.user_message("Failed to fetch notes")))
}

/// Create a note on the selected book and append it to `notes`.
pub async fn create_note<T: HttpTransport>(
    api: &ApiClient<T>,
    notes: &mut Vec<Note>,
    book_id: Option<i64>,
    form: &NoteForm,
) -> Notice {
    let Some(book_id) = book_id else {
        return Notice::warning("Please select a book!");
    };
    let note = match form.validate() {
        Ok(note) => note,
        Err(err) => return Notice::error(err.user_message("Failed to create note")),
    };
    match api::create_note(api, book_id, &note).await {
        Ok(created) => {
            notes.push(created);
            Notice::success("Note created successfully!")
        }
        Err(err) => Notice::error(err.user_message("Failed to create note")),
    }
}

pub async fn delete_note<T: HttpTransport>(api: &ApiClient<T>, notes: &mut Vec<Note>, note_id: i64) -> Notice {
    match api::delete_note(api, note_id).await {
        Ok(()) => {
            notes.retain(|note| note.id != note_id);
            Notice::success("Note deleted successfully!")
        }
        Err(err) => Notice::error(err.user_message("Failed to delete note")),
    }
}
