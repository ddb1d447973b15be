//! Typed REST endpoints for the book-tracker backend.
//!
//! Each function maps one backend route to request/response types from
//! `net::types`. Status interpretation that is specific to a route (e.g. an
//! empty search answered with 404) lives here; view-level defaults live in
//! `state`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use super::client::ApiClient;
use super::error::ApiError;
use super::http::HttpTransport;
use super::types::{
    Book, BookPageBody, BookUpdate, Goal, GoalProgress, ListSummary, LoginRequest, LoginResponse, NewBook, NewList,
    NewListItem, NewNote, NewReading, Note, ProgressEntry, Reading, ReadingEntry, ReadingList, ReadingPageBody, Stats,
};
use crate::state::pager::{Page, PageSource};

/// Suggestions returned by a title search.
pub const SEARCH_LIMIT: u32 = 10;

fn book_endpoint(book_id: i64) -> String {
    format!("/books/{book_id}")
}

fn list_item_endpoint(list_id: i64, item_id: i64) -> String {
    format!("/list/{list_id}/item/{item_id}")
}

fn progress_endpoint(reading_id: i64) -> String {
    format!("/progress/{reading_id}")
}

/// `/notes/{id}`: a book id for listing/creating, a note id for deleting.
fn notes_endpoint(id: i64) -> String {
    format!("/notes/{id}")
}

fn page_query(page: u32, page_size: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("page_size", page_size.to_string())]
}

/// Exchange an external identity credential for a session token.
///
/// # Errors
///
/// Returns `Validation` for a blank credential (no request is sent), or the
/// request error.
pub async fn login<T: HttpTransport>(api: &ApiClient<T>, credential: &str) -> Result<String, ApiError> {
    let credential = credential.trim();
    if credential.is_empty() {
        return Err(ApiError::validation("Failed to login: No credential received."));
    }
    let body = LoginRequest { token: credential.to_owned() };
    let response: LoginResponse = api.post_json("/auth/login", &body).await?;
    Ok(response.token)
}

/// # Errors
///
/// Returns the request error.
pub async fn fetch_books<T: HttpTransport>(api: &ApiClient<T>, page: u32, page_size: u32) -> Result<Page<Book>, ApiError> {
    let body: BookPageBody = api.get_json("/books", &page_query(page, page_size)).await?;
    Ok(body.into())
}

/// # Errors
///
/// Returns the request error.
pub async fn create_book<T: HttpTransport>(api: &ApiClient<T>, title: &str) -> Result<Book, ApiError> {
    api.post_json("/books", &NewBook { title: title.to_owned() }).await
}

/// # Errors
///
/// Returns the request error.
pub async fn update_book<T: HttpTransport>(api: &ApiClient<T>, book_id: i64, update: &BookUpdate) -> Result<Book, ApiError> {
    api.put_json(&book_endpoint(book_id), update).await
}

/// # Errors
///
/// Returns the request error.
pub async fn delete_book<T: HttpTransport>(api: &ApiClient<T>, book_id: i64) -> Result<(), ApiError> {
    api.delete(&book_endpoint(book_id)).await
}

/// Title search. A 404 means "no matches" and yields an empty list.
///
/// # Errors
///
/// Returns any other request error.
pub async fn search_books<T: HttpTransport>(api: &ApiClient<T>, title: &str) -> Result<Vec<Book>, ApiError> {
    let query = [("title", title.to_owned()), ("limit", SEARCH_LIMIT.to_string())];
    match api.get_json("/books/search", &query).await {
        Err(err) if err.is_not_found() => Ok(Vec::new()),
        other => other,
    }
}

/// # Errors
///
/// Returns the request error.
pub async fn fetch_lists<T: HttpTransport>(api: &ApiClient<T>) -> Result<Vec<ListSummary>, ApiError> {
    api.get_json("/lists", &[]).await
}

/// # Errors
///
/// Returns the request error.
pub async fn fetch_list<T: HttpTransport>(api: &ApiClient<T>, list_id: i64) -> Result<ReadingList, ApiError> {
    api.get_json("/list", &[("list_id", list_id.to_string())]).await
}

/// # Errors
///
/// Returns the request error.
pub async fn create_list<T: HttpTransport>(api: &ApiClient<T>, title: &str) -> Result<ReadingList, ApiError> {
    api.post_json("/list", &NewList { title: title.to_owned() }).await
}

/// # Errors
///
/// Returns the request error; `Conflict` when the book is already listed.
pub async fn add_list_item<T: HttpTransport>(api: &ApiClient<T>, item: NewListItem) -> Result<(), ApiError> {
    api.post_discard("/list/item", &item).await
}

/// # Errors
///
/// Returns the request error.
pub async fn remove_list_item<T: HttpTransport>(api: &ApiClient<T>, list_id: i64, item_id: i64) -> Result<(), ApiError> {
    api.delete(&list_item_endpoint(list_id, item_id)).await
}

/// # Errors
///
/// Returns the request error; `NotFound` when no goal is set.
pub async fn fetch_goal<T: HttpTransport>(api: &ApiClient<T>) -> Result<Goal, ApiError> {
    api.get_json("/goal", &[]).await
}

/// # Errors
///
/// Returns the request error.
pub async fn update_goal<T: HttpTransport>(api: &ApiClient<T>, goal: &Goal) -> Result<Goal, ApiError> {
    api.put_json("/goal", goal).await
}

/// # Errors
///
/// Returns the request error; `NotFound` when no goal is set.
pub async fn fetch_goal_progress<T: HttpTransport>(api: &ApiClient<T>) -> Result<GoalProgress, ApiError> {
    api.get_json("/goal/progress", &[]).await
}

/// # Errors
///
/// Returns the request error.
pub async fn fetch_readings<T: HttpTransport>(
    api: &ApiClient<T>,
    page: u32,
    page_size: u32,
) -> Result<Page<ReadingEntry>, ApiError> {
    let body: ReadingPageBody = api.get_json("/readings", &page_query(page, page_size)).await?;
    Ok(body.into())
}

/// # Errors
///
/// Returns the request error.
pub async fn create_reading<T: HttpTransport>(api: &ApiClient<T>, reading: &NewReading) -> Result<Reading, ApiError> {
    api.post_json("/readings", reading).await
}

/// # Errors
///
/// Returns the request error.
pub async fn add_progress<T: HttpTransport>(
    api: &ApiClient<T>,
    reading_id: i64,
    entry: &ProgressEntry,
) -> Result<(), ApiError> {
    api.post_discard(&progress_endpoint(reading_id), entry).await
}

/// # Errors
///
/// Returns the request error.
pub async fn fetch_notes<T: HttpTransport>(api: &ApiClient<T>, book_id: i64) -> Result<Vec<Note>, ApiError> {
    api.get_json(&notes_endpoint(book_id), &[]).await
}

/// # Errors
///
/// Returns the request error.
pub async fn create_note<T: HttpTransport>(api: &ApiClient<T>, book_id: i64, note: &NewNote) -> Result<Note, ApiError> {
    api.post_json(&notes_endpoint(book_id), note).await
}

/// # Errors
///
/// Returns the request error.
pub async fn delete_note<T: HttpTransport>(api: &ApiClient<T>, note_id: i64) -> Result<(), ApiError> {
    api.delete(&notes_endpoint(note_id)).await
}

/// # Errors
///
/// Returns the request error.
pub async fn fetch_monthly_stats<T: HttpTransport>(api: &ApiClient<T>, year: i32) -> Result<Stats, ApiError> {
    api.get_json("/stats/monthly", &[("year", year.to_string())]).await
}

/// # Errors
///
/// Returns the request error.
pub async fn fetch_daily_stats<T: HttpTransport>(api: &ApiClient<T>, year: i32, month: u32) -> Result<Stats, ApiError> {
    api.get_json("/stats/daily", &[("year", year.to_string()), ("month", month.to_string())]).await
}

/// Page source for the library view.
#[derive(Clone)]
pub struct BookPages<T>(pub ApiClient<T>);

impl<T: HttpTransport> PageSource<Book> for BookPages<T> {
    fn fetch_page(&self, page: u32, page_size: u32) -> impl Future<Output = Result<Page<Book>, ApiError>> {
        fetch_books(&self.0, page, page_size)
    }
}

/// Page source for the my-reads view.
#[derive(Clone)]
pub struct ReadingPages<T>(pub ApiClient<T>);

impl<T: HttpTransport> PageSource<ReadingEntry> for ReadingPages<T> {
    fn fetch_page(&self, page: u32, page_size: u32) -> impl Future<Output = Result<Page<ReadingEntry>, ApiError>> {
        fetch_readings(&self.0, page, page_size)
    }
}
