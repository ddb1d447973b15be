//! REST wire schema shared by endpoints and view state.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON so serde needs no per-endpoint
//! glue. Paginated responses name their list field per resource (`books`,
//! `readings`); both also accept the generic `items` spelling.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::pager::{Identified, Page};

/// A book in the user's library.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Identified for Book {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewBook {
    pub title: String,
}

/// Partial book update; absent fields are left unchanged by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct BookPageBody {
    #[serde(alias = "items")]
    pub books: Vec<Book>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl From<BookPageBody> for Page<Book> {
    fn from(body: BookPageBody) -> Self {
        Page { items: body.books, has_more: body.has_more }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub id: i64,
    pub total_pages: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingStatus {
    #[default]
    #[serde(rename = "not started")]
    NotStarted,
    #[serde(rename = "reading")]
    Reading,
    #[serde(rename = "completed")]
    Completed,
}

impl ReadingStatus {
    /// Status implied by `progress` pages read out of `total_pages`.
    pub fn for_progress(progress: i64, total_pages: i64) -> Self {
        if progress <= 0 {
            Self::NotStarted
        } else if total_pages > 0 && progress >= total_pages {
            Self::Completed
        } else {
            Self::Reading
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "not started",
            Self::Reading => "reading",
            Self::Completed => "completed",
        }
    }
}

/// A reading record joined with its book title and accumulated progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReadingEntry {
    pub book_title: String,
    pub status: ReadingStatus,
    pub progress: i64,
    pub reading: Reading,
}

impl ReadingEntry {
    /// Entry for a reading that was just created.
    pub fn started(book_title: String, reading: Reading) -> Self {
        Self { book_title, status: ReadingStatus::NotStarted, progress: 0, reading }
    }

    /// Add `pages` to the progress and re-derive the status.
    pub fn record_pages(&mut self, pages: i64) {
        self.progress += pages;
        self.status = ReadingStatus::for_progress(self.progress, self.reading.total_pages);
    }
}

impl Identified for ReadingEntry {
    type Id = i64;

    fn id(&self) -> i64 {
        self.reading.id
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct ReadingPageBody {
    #[serde(alias = "items")]
    pub readings: Vec<ReadingEntry>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl From<ReadingPageBody> for Page<ReadingEntry> {
    fn from(body: ReadingPageBody) -> Self {
        Page { items: body.readings, has_more: body.has_more }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewReading {
    pub book_id: i64,
    pub total_pages: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Pages read on a given day.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProgressEntry {
    pub pages: i64,
    pub date: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    #[default]
    Books,
    Pages,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalFrequency {
    #[default]
    Daily,
    Monthly,
}

/// Reading goal. The default (`books`, `daily`, 0) stands in for "no goal set".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(rename = "type")]
    pub kind: GoalKind,
    pub frequency: GoalFrequency,
    pub value: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub percentage: f64,
    pub left: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub id: i64,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: i64,
    pub list_id: i64,
    pub book_name: String,
}

/// A reading list with its entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingList {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub list_items: Vec<ListItem>,
}

impl From<&ReadingList> for ListSummary {
    fn from(list: &ReadingList) -> Self {
        Self { id: list.id, title: list.title.clone() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewList {
    pub title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NewListItem {
    pub list_id: i64,
    pub book_id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub page_number: i64,
    pub content: String,
}

impl Identified for Note {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewNote {
    pub page_number: i64,
    pub content: String,
}

/// Pages read in one month (`date` = `"1".."12"`) or one day (`"1".."31"`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatPoint {
    pub date: String,
    pub pages: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub progress: Vec<StatPoint>,
    #[serde(default)]
    pub goal: i64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<StatPoint>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<StatPoint>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
