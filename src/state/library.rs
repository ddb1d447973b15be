//! Library workflows: the paginated book list and its CRUD actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The library page owns a `Pager<Book, _>`. Each action here calls one
//! endpoint and, on success, edits the pager's items in place so the list
//! updates without a refetch. Every action yields a `Notice` for the page to
//! show; failures leave the list untouched.

#[cfg(test)]
#[path = "library_test.rs"]
mod library_test;

use super::pager::{DEFAULT_PAGE_SIZE, PageSource, Pager};
use super::ui::Notice;
use crate::net::api::{self, BookPages};
use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::net::http::HttpTransport;
use crate::net::types::{Book, BookUpdate};

pub const LOAD_BOOKS_CONTEXT: &str = "Failed to load books";
pub const MAX_RATING: f64 = 5.0;

pub type BookPager<T> = Pager<Book, BookPages<T>>;

/// Pager over `GET /books`.
pub fn book_pager<T: HttpTransport>(api: ApiClient<T>) -> BookPager<T> {
    Pager::new(BookPages(api), DEFAULT_PAGE_SIZE).with_error_context(LOAD_BOOKS_CONTEXT)
}

/// Trimmed title, or a validation error for a blank one.
///
/// # Errors
///
/// Returns `Validation` when the title is blank.
pub fn validate_title(title: &str) -> Result<String, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::validation("Book title is required!"));
    }
    Ok(title.to_owned())
}

/// # Errors
///
/// Returns `Validation` unless `0 <= rating <= 5`.
pub fn validate_rating(rating: f64) -> Result<f64, ApiError> {
    if (0.0..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(ApiError::validation("Rating must be between 0 and 5."))
    }
}

pub async fn create_book<T, S>(api: &ApiClient<T>, books: &Pager<Book, S>, title: &str) -> Notice
where
    T: HttpTransport,
    S: PageSource<Book>,
{
    let title = match validate_title(title) {
        Ok(title) => title,
        Err(err) => return Notice::error(err.user_message("Failed to add book")),
    };
    match api::create_book(api, &title).await {
        Ok(book) => {
            log::debug!("library: created book {}", book.id);
            books.push_local(book);
            Notice::success("New book added!")
        }
        Err(err) => Notice::error(err.user_message("Failed to add book")),
    }
}

pub async fn rename_book<T, S>(api: &ApiClient<T>, books: &Pager<Book, S>, book_id: i64, title: &str) -> Notice
where
    T: HttpTransport,
    S: PageSource<Book>,
{
    let title = match validate_title(title) {
        Ok(title) => title,
        Err(err) => return Notice::error(err.user_message("Failed to update book title")),
    };
    let update = BookUpdate { title: Some(title.clone()), ..BookUpdate::default() };
    match api::update_book(api, book_id, &update).await {
        Ok(_) => {
            books.update_local(&book_id, |book| book.title = title);
            Notice::success("Book title updated successfully.")
        }
        Err(err) => Notice::error(err.user_message("Failed to update book title")),
    }
}

pub async fn rate_book<T, S>(api: &ApiClient<T>, books: &Pager<Book, S>, book_id: i64, rating: f64) -> Notice
where
    T: HttpTransport,
    S: PageSource<Book>,
{
    if let Err(err) = validate_rating(rating) {
        return Notice::error(err.user_message("Failed to update book rating"));
    }
    let update = BookUpdate { rating: Some(rating), ..BookUpdate::default() };
    match api::update_book(api, book_id, &update).await {
        Ok(_) => {
            books.update_local(&book_id, |book| book.rating = Some(rating));
            Notice::success("Book rating updated successfully.")
        }
        Err(err) => Notice::error(err.user_message("Failed to update book rating")),
    }
}

pub async fn delete_book<T, S>(api: &ApiClient<T>, books: &Pager<Book, S>, book_id: i64) -> Notice
where
    T: HttpTransport,
    S: PageSource<Book>,
{
    match api::delete_book(api, book_id).await {
        Ok(()) => {
            books.remove_local(&book_id);
            Notice::success("Book deleted!")
        }
        Err(err) => Notice::error(err.user_message("Failed to delete book")),
    }
}

/// Title suggestions for the book pickers (my-reads, lists, notes).
///
/// A blank query returns no suggestions without a request.
///
/// # Errors
///
/// Returns an error notice when the search fails for a reason other than
/// "no matches".
pub async fn suggest_books<T: HttpTransport>(api: &ApiClient<T>, title: &str) -> Result<Vec<Book>, Notice> {
    let title = title.trim();
    if title.is_empty() {
        return Ok(Vec::new());
    }
    api::search_books(api, title)
        .await
        .map_err(|err| Notice::error(err.user_message("Failed to fetch book suggestions")))
}

/// `suggest_books` for a picker that searches on every keystroke. Returns
/// `None` when `current_query` no longer matches `title` once the response
/// arrives, so an older, slower search cannot replace newer suggestions.
pub async fn suggest_books_if_current<T: HttpTransport>(
    api: &ApiClient<T>,
    title: &str,
    current_query: impl Fn() -> String,
) -> Option<Result<Vec<Book>, Notice>> {
    let result = suggest_books(api, title).await;
    if current_query() == title {
        Some(result)
    } else {
        log::debug!("library: dropped suggestions for stale query {title:?}");
        None
    }
}
