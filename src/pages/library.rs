//! Library page: infinite-scroll book list with create, rename, rate and
//! delete.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered behind `ProtectedRoute`. The page builds a book pager on mount,
//! loads page 1 through the guarded mount helper, and requests the next
//! page whenever the list is scrolled to within a few pixels of its end.
//! The pager is disposed on unmount so late responses are dropped.

use leptos::prelude::*;

use super::{load_into, mount_into, refresh};
use crate::components::notice_bar::push_notice;
use crate::net::client::ApiClient;
use crate::net::types::Book;
use crate::state::auth::AuthSession;
use crate::state::library::{self, BookPager};
use crate::state::pager::PagerSnapshot;
use crate::state::ui::UiState;
use crate::util::scroll::scroll_metrics;
use crate::util::task::spawn;

#[component]
pub fn LibraryPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let session = expect_context::<AuthSession>();
    let ui = expect_context::<RwSignal<UiState>>();

    let books: BookPager<_> = library::book_pager(api.clone());
    let snapshot = RwSignal::new(PagerSnapshot::<Book>::default());
    let new_title = RwSignal::new(String::new());

    mount_into(session, books.clone(), snapshot, ui);
    let books_cleanup = books.clone();
    on_cleanup(move || books_cleanup.dispose());

    let books_scroll = books.clone();
    let on_scroll = move |ev: leptos::ev::Event| {
        let Some(metrics) = scroll_metrics(&ev) else {
            return;
        };
        if let Some(page) = books_scroll.on_scroll(metrics) {
            load_into(books_scroll.clone(), page, snapshot, ui);
        }
    };

    let (api_create, books_create) = (api.clone(), books.clone());
    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (api, books) = (api_create.clone(), books_create.clone());
        let title = new_title.get_untracked();
        spawn(async move {
            let notice = library::create_book(&api, &books, &title).await;
            if !notice.is_error() {
                new_title.set(String::new());
            }
            push_notice(ui, notice);
            refresh(&books, snapshot);
        });
    };

    let (api_rename, books_rename) = (api.clone(), books.clone());
    let on_rename = Callback::new(move |(book_id, title): (i64, String)| {
        let (api, books) = (api_rename.clone(), books_rename.clone());
        spawn(async move {
            let notice = library::rename_book(&api, &books, book_id, &title).await;
            push_notice(ui, notice);
            refresh(&books, snapshot);
        });
    });

    let (api_rate, books_rate) = (api.clone(), books.clone());
    let on_rate = Callback::new(move |(book_id, rating): (i64, f64)| {
        let (api, books) = (api_rate.clone(), books_rate.clone());
        spawn(async move {
            let notice = library::rate_book(&api, &books, book_id, rating).await;
            push_notice(ui, notice);
            refresh(&books, snapshot);
        });
    });

    let (api_delete, books_delete) = (api, books);
    let on_delete = Callback::new(move |book_id: i64| {
        let (api, books) = (api_delete.clone(), books_delete.clone());
        spawn(async move {
            let notice = library::delete_book(&api, &books, book_id).await;
            push_notice(ui, notice);
            refresh(&books, snapshot);
        });
    });

    view! {
        <section class="library-page">
            <h1>"Library"</h1>
            <form class="book-form" on:submit=on_create>
                <input
                    type="text"
                    placeholder="Book title"
                    prop:value=move || new_title.get()
                    on:input=move |ev| new_title.set(event_target_value(&ev))
                />
                <button type="submit">"Add book"</button>
            </form>
            <ul class="book-list" on:scroll=on_scroll>
                <For
                    each=move || snapshot.get().items
                    key=|book| book.id
                    children=move |book| view! { <BookRow book=book on_rename=on_rename on_rate=on_rate on_delete=on_delete/> }
                />
                <Show when=move || snapshot.get().loading>
                    <li class="book-list__loading">"Loading..."</li>
                </Show>
            </ul>
        </section>
    }
}

#[component]
fn BookRow(
    book: Book,
    on_rename: Callback<(i64, String)>,
    on_rate: Callback<(i64, f64)>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    let id = book.id;
    let rating = book.rating.unwrap_or(0.0);
    let added = book.created_at.map(|at| at.format("%Y-%m-%d").to_string()).unwrap_or_default();

    view! {
        <li class="book-row">
            <input
                class="book-row__title"
                type="text"
                value=book.title
                on:change=move |ev| on_rename.run((id, event_target_value(&ev)))
            />
            <input
                class="book-row__rating"
                type="number"
                min="0"
                max="5"
                step="0.5"
                value=rating.to_string()
                on:change=move |ev| {
                    if let Ok(rating) = event_target_value(&ev).parse::<f64>() {
                        on_rate.run((id, rating));
                    }
                }
            />
            <span class="book-row__added">{added}</span>
            <button class="book-row__delete" on:click=move |_| on_delete.run(id)>
                "Delete"
            </button>
        </li>
    }
}
