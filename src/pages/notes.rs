//! Notes page: pick a book, then read, add and delete its notes.

use leptos::prelude::*;

use crate::components::notice_bar::push_notice;
use crate::net::client::ApiClient;
use crate::net::types::{Book, Note};
use crate::state::library::suggest_books_if_current;
use crate::state::notes::{self, NoteForm};
use crate::state::ui::UiState;
use crate::util::task::spawn;

#[component]
pub fn NotesPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let ui = expect_context::<RwSignal<UiState>>();

    let query = RwSignal::new(String::new());
    let suggestions = RwSignal::new(Vec::<Book>::new());
    let selected = RwSignal::new(None::<i64>);
    let entries = RwSignal::new(Vec::<Note>::new());
    let form = RwSignal::new(NoteForm::default());

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

    let api_select = api.clone();
    let on_select = move |ev: leptos::ev::Event| {
        let book_id = event_target_value(&ev).parse::<i64>().ok();
        selected.set(book_id);
        entries.set(Vec::new());
        let Some(book_id) = book_id else {
            return;
        };
        let api = api_select.clone();
        spawn(async move {
            match notes::load_notes(&api, book_id).await {
                Ok(loaded) if selected.get_untracked() == Some(book_id) => entries.set(loaded),
                Ok(_) => {}
                Err(notice) => push_notice(ui, notice),
            }
        });
    };

    let api_create = api.clone();
    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let api = api_create.clone();
        let values = form.get_untracked();
        let book_id = selected.get_untracked();
        spawn(async move {
            let mut current = entries.get_untracked();
            let notice = notes::create_note(&api, &mut current, book_id, &values).await;
            if !notice.is_error() && book_id.is_some() {
                form.set(NoteForm::default());
            }
            entries.set(current);
            push_notice(ui, notice);
        });
    };

    let on_delete = Callback::new(move |note_id: i64| {
        let api = api.clone();
        spawn(async move {
            let mut current = entries.get_untracked();
            let notice = notes::delete_note(&api, &mut current, note_id).await;
            entries.set(current);
            push_notice(ui, notice);
        });
    });

    view! {
        <section class="notes-page">
            <h1>"Notes"</h1>
            <div class="notes-page__book">
                <input type="search" placeholder="Find a book" prop:value=move || query.get() on:input=on_search/>
                <select on:change=on_select>
                    <option value="">"Select a book"</option>
                    <For
                        each=move || suggestions.get()
                        key=|book| book.id
                        children=|book| view! { <option value=book.id.to_string()>{book.title}</option> }
                    />
                </select>
            </div>

            <form class="note-form" on:submit=on_create>
                <input
                    type="number"
                    min="1"
                    placeholder="Page"
                    prop:value=move || form.get().page_number.to_string()
                    on:input=move |ev| form.update(|f| f.page_number = event_target_value(&ev).parse().unwrap_or(0))
                />
                <textarea
                    placeholder="Write a note"
                    prop:value=move || form.get().content
                    on:input=move |ev| form.update(|f| f.content = event_target_value(&ev))
                ></textarea>
                <button type="submit">"Add note"</button>
            </form>

            <Show
                when=move || selected.get().is_some()
                fallback=|| view! { <p class="notes-page__empty">"Select a book to see its notes."</p> }
            >
                <ul class="note-list">
                    <For
                        each=move || entries.get()
                        key=|note| note.id
                        children=move |note| {
                            let id = note.id;
                            view! {
                                <li class="note">
                                    <span class="note__page">{format!("p. {}", note.page_number)}</span>
                                    <p class="note__content">{note.content}</p>
                                    <button on:click=move |_| on_delete.run(id)>"Delete"</button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}
