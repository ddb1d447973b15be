//! Lists page: list index, list creation and the entries of the open list.

use leptos::prelude::*;

use crate::components::notice_bar::push_notice;
use crate::net::client::ApiClient;
use crate::net::types::{Book, ListSummary, ReadingList};
use crate::state::library::suggest_books_if_current;
use crate::state::lists;
use crate::state::ui::{Notice, UiState};
use crate::util::export::{copy_text, download_text};
use crate::util::task::spawn;

#[component]
pub fn ListsPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let ui = expect_context::<RwSignal<UiState>>();

    let index = RwSignal::new(Vec::<ListSummary>::new());
    let open = RwSignal::new(None::<ReadingList>);
    let new_title = RwSignal::new(String::new());

    let api_index = api.clone();
    spawn(async move {
        match lists::load_lists(&api_index).await {
            Ok(summaries) => index.set(summaries),
            Err(notice) => push_notice(ui, notice),
        }
    });

    let api_create = api.clone();
    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let api = api_create.clone();
        let title = new_title.get_untracked();
        spawn(async move {
            let mut summaries = index.get_untracked();
            let notice = lists::create_list(&api, &mut summaries, &title).await;
            if !notice.is_error() {
                new_title.set(String::new());
            }
            index.set(summaries);
            push_notice(ui, notice);
        });
    };

    let api_open = api.clone();
    let on_open = move |list_id: i64| {
        let api = api_open.clone();
        spawn(async move {
            match lists::load_list(&api, list_id).await {
                Ok(list) => open.set(Some(list)),
                Err(notice) => push_notice(ui, notice),
            }
        });
    };

    view! {
        <section class="lists-page">
            <h1>"Reading lists"</h1>
            <form class="list-form" on:submit=on_create>
                <input
                    type="text"
                    placeholder="List title"
                    prop:value=move || new_title.get()
                    on:input=move |ev| new_title.set(event_target_value(&ev))
                />
                <button type="submit">"Create list"</button>
            </form>
            <ul class="list-index">
                <For
                    each=move || index.get()
                    key=|list| list.id
                    children=move |list| {
                        let on_open = on_open.clone();
                        view! {
                            <li>
                                <button on:click=move |_| on_open(list.id)>{list.title.clone()}</button>
                            </li>
                        }
                    }
                />
            </ul>
            {move || open.get().map(|list| view! { <ListDetails list=list open=open/> })}
        </section>
    }
}

#[component]
fn ListDetails(list: ReadingList, open: RwSignal<Option<ReadingList>>) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let ui = expect_context::<RwSignal<UiState>>();

    let query = RwSignal::new(String::new());
    let suggestions = RwSignal::new(Vec::<Book>::new());
    let selected = RwSignal::new(None::<i64>);

    let api_search = api.clone();
    let on_search = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        query.set(text.clone());
        let api = api_search.clone();
        spawn(async move {
            let Some(result) = suggest_books_if_current(&api, &text, || query.get_untracked()).await else {
                return;
            };
            match result {
                Ok(books) => suggestions.set(books),
                Err(notice) => push_notice(ui, notice),
            }
        });
    };

    let api_add = api.clone();
    let on_add = move |_| {
        let api = api_add.clone();
        let Some(mut list) = open.get_untracked() else {
            return;
        };
        let book_id = selected.get_untracked();
        spawn(async move {
            let notice = lists::add_book_to_list(&api, &mut list, book_id).await;
            if !notice.is_error() {
                selected.set(None);
            }
            open.set(Some(list));
            push_notice(ui, notice);
        });
    };

    let on_remove = Callback::new(move |item_id: i64| {
        let api = api.clone();
        let Some(mut list) = open.get_untracked() else {
            return;
        };
        spawn(async move {
            let notice = lists::remove_list_item(&api, &mut list, item_id).await;
            open.set(Some(list));
            push_notice(ui, notice);
        });
    });

    let exporting = RwSignal::new(false);
    let export = move || open.get().map(|list| (lists::export_file_name(&list), lists::export_text(&list)));
    let on_copy = move |_: leptos::ev::MouseEvent| {
        let Some((_, text)) = export() else {
            return;
        };
        match copy_text(&text) {
            Ok(()) => push_notice(ui, Notice::success("List copied to clipboard!")),
            Err(err) => {
                log::warn!("lists: copy failed: {err}");
                push_notice(ui, Notice::error("Failed to copy list."));
            }
        }
    };
    let on_download = move |_: leptos::ev::MouseEvent| {
        let Some((file_name, text)) = export() else {
            return;
        };
        if let Err(err) = download_text(&file_name, &text) {
            log::warn!("lists: download failed: {err}");
            push_notice(ui, Notice::error("Failed to download list."));
        }
    };

    view! {
        <div class="list-details">
            <h2>{list.title}</h2>
            <button class="list-details__export" on:click=move |_| exporting.update(|open| *open = !*open)>
                "Export"
            </button>
            <Show when=move || exporting.get()>
                <div class="list-export">
                    <p>"Here is your list in a readable format:"</p>
                    <textarea readonly rows="8" prop:value=move || export().map(|(_, text)| text).unwrap_or_default()></textarea>
                    <button on:click=on_copy>"Copy to clipboard"</button>
                    <button on:click=on_download>"Download as file"</button>
                </div>
            </Show>
            <div class="list-details__add">
                <input type="search" placeholder="Find a book" prop:value=move || query.get() on:input=on_search/>
                <select on:change=move |ev| selected.set(event_target_value(&ev).parse::<i64>().ok())>
                    <option value="">"Select a book"</option>
                    <For
                        each=move || suggestions.get()
                        key=|book| book.id
                        children=|book| view! { <option value=book.id.to_string()>{book.title}</option> }
                    />
                </select>
                <button on:click=on_add>"Add to list"</button>
            </div>
            <ul class="list-details__items">
                <For
                    each=move || list.list_items.clone()
                    key=|item| item.id
                    children=move |item| {
                        view! {
                            <li>
                                <span>{item.book_name}</span>
                                <button on:click=move |_| on_remove.run(item.id)>"Remove"</button>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
