//! Reading-list workflows: the list index, list details and list entries.
//!
//! ERROR HANDLING
//! ==============
//! List failures are shown with fixed texts rather than the server message;
//! the underlying error is logged instead. A book that is already on the
//! list (409) is a warning, not an error.
//!
//! Export renders the open list as numbered plain text for the clipboard or
//! a `.txt` download.

#[cfg(test)]
#[path = "lists_test.rs"]
mod lists_test;

use super::ui::Notice;
use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::http::HttpTransport;
use crate::net::types::{ListSummary, NewListItem, ReadingList};

/// # Errors
///
/// Returns an error notice when the index cannot be fetched.
pub async fn load_lists<T: HttpTransport>(api: &ApiClient<T>) -> Result<Vec<ListSummary>, Notice> {
    api::fetch_lists(api).await.map_err(|err| {
        log::warn!("lists: fetch failed: {err}");
        Notice::error("Failed to fetch lists.")
    })
}

/// Create a list and append it to `lists`.
pub async fn create_list<T: HttpTransport>(api: &ApiClient<T>, lists: &mut Vec<ListSummary>, title: &str) -> Notice {
    let title = title.trim();
    if title.is_empty() {
        return Notice::error("Title cannot be empty.");
    }
    match api::create_list(api, title).await {
        Ok(list) => {
            let summary = ListSummary::from(&list);
            if !lists.iter().any(|existing| existing.id == summary.id) {
                lists.push(summary);
            }
            Notice::success("List created successfully!")
        }
        Err(err) => {
            log::warn!("lists: create failed: {err}");
            Notice::error("Failed to create list.")
        }
    }
}

/// # Errors
///
/// Returns an error notice when the list cannot be fetched.
pub async fn load_list<T: HttpTransport>(api: &ApiClient<T>, list_id: i64) -> Result<ReadingList, Notice> {
    api::fetch_list(api, list_id).await.map_err(|err| {
        log::warn!("lists: fetch list {list_id} failed: {err}");
        Notice::error("Failed to fetch list items.")
    })
}

/// Add the picked book to `list`, then reload its entries.
pub async fn add_book_to_list<T: HttpTransport>(api: &ApiClient<T>, list: &mut ReadingList, book_id: Option<i64>) -> Notice {
    let Some(book_id) = book_id else {
        return Notice::warning("Please select a book!");
    };
    match api::add_list_item(api, NewListItem { list_id: list.id, book_id }).await {
        Ok(()) => {
            refresh(api, list).await;
            Notice::success("Book added to the list!")
        }
        Err(err) if err.is_conflict() => Notice::warning("Book is already in the list."),
        Err(err) => {
            log::warn!("lists: add book {book_id} to list {} failed: {err}", list.id);
            Notice::error("Failed to add book to list.")
        }
    }
}

/// Remove entry `item_id` from `list`, then reload its entries.
pub async fn remove_list_item<T: HttpTransport>(api: &ApiClient<T>, list: &mut ReadingList, item_id: i64) -> Notice {
    match api::remove_list_item(api, list.id, item_id).await {
        Ok(()) => {
            list.list_items.retain(|item| item.id != item_id);
            refresh(api, list).await;
            Notice::success("Book removed from the list!")
        }
        Err(err) => {
            log::warn!("lists: remove item {item_id} from list {} failed: {err}", list.id);
            Notice::error("Failed to remove book from list.")
        }
    }
}

/// Best-effort reload after a successful edit; a failure keeps the local copy.
async fn refresh<T: HttpTransport>(api: &ApiClient<T>, list: &mut ReadingList) {
    match api::fetch_list(api, list.id).await {
        Ok(fresh) => *list = fresh,
        Err(err) => log::warn!("lists: reload of list {} failed: {err}", list.id),
    }
}

/// The list as numbered lines, `"1. Dune\n2. Emma"`. Empty for an empty list.
pub fn export_text(list: &ReadingList) -> String {
    list.list_items
        .iter()
        .enumerate()
        .map(|(index, item)| format!("{}. {}", index + 1, item.book_name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Download name for an exported list.
pub fn export_file_name(list: &ReadingList) -> String {
    format!("{}.txt", list.title)
}
