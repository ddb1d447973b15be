//! My-reads page: reading table with "load more", goal progress card and the
//! add-reading / add-progress forms.

use chrono::{DateTime, Utc};
use leptos::prelude::*;

use super::{load_into, mount_into, refresh};
use crate::components::notice_bar::push_notice;
use crate::net::client::ApiClient;
use crate::net::types::{Book, GoalProgress, ReadingEntry};
use crate::state::auth::AuthSession;
use crate::state::library::suggest_books_if_current;
use crate::state::pager::PagerSnapshot;
use crate::state::reads::{self, GoalProgressView, ReadingForm};
use crate::state::ui::UiState;
use crate::util::scroll::scroll_metrics;
use crate::util::task::spawn;

#[component]
pub fn MyReadsPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let session = expect_context::<AuthSession>();
    let ui = expect_context::<RwSignal<UiState>>();

    let readings = reads::reading_pager(api.clone());
    let snapshot = RwSignal::new(PagerSnapshot::<ReadingEntry>::default());
    let goal = RwSignal::new(GoalProgress::default());
    let form = RwSignal::new(ReadingForm::default());
    let query = RwSignal::new(String::new());
    let suggestions = RwSignal::new(Vec::<Book>::new());

    let show_goal = move |view: GoalProgressView| {
        if let Some(progress) = view.progress {
            goal.set(progress);
        }
        if let Some(notice) = view.notice {
            push_notice(ui, notice);
        }
    };

    mount_into(session, readings.clone(), snapshot, ui);
    let api_goal = api.clone();
    spawn(async move { show_goal(reads::load_goal_progress(&api_goal).await) });
    let readings_cleanup = readings.clone();
    on_cleanup(move || readings_cleanup.dispose());

    let readings_more = readings.clone();
    let load_more = move || {
        if let Some(page) = readings_more.advance_page() {
            load_into(readings_more.clone(), page, snapshot, ui);
        }
    };
    let load_more_scroll = load_more.clone();
    let on_scroll = move |ev: leptos::ev::Event| {
        if scroll_metrics(&ev).is_some_and(|m| m.near_end()) {
            load_more_scroll();
        }
    };

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
                Err(notice) => {
                    suggestions.set(Vec::new());
                    push_notice(ui, notice);
                }
            }
        });
    };

    let (api_add, readings_add) = (api.clone(), readings.clone());
    let on_add_reading = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (api, readings) = (api_add.clone(), readings_add.clone());
        let values = form.get_untracked();
        spawn(async move {
            match reads::add_reading(&api, &readings, &values).await {
                Ok(()) => form.set(ReadingForm::default()),
                Err(notice) => push_notice(ui, notice),
            }
            refresh(&readings, snapshot);
        });
    };

    let (api_progress, readings_progress) = (api, readings);
    let on_progress = Callback::new(move |(reading_id, pages, date): (i64, i64, DateTime<Utc>)| {
        let (api, readings) = (api_progress.clone(), readings_progress.clone());
        spawn(async move {
            match reads::add_progress(&api, &readings, reading_id, pages, date).await {
                Ok(view) => show_goal(view),
                Err(notice) => push_notice(ui, notice),
            }
            refresh(&readings, snapshot);
        });
    });

    view! {
        <section class="my-reads-page">
            <h1>"My reads"</h1>
            <div class="goal-card">
                <progress max="100" value=move || goal.get().percentage.to_string()></progress>
                <span>
                    {move || {
                        let left = goal.get().left;
                        if left == 0 { "Goal reached!".to_owned() } else { format!("{left} left to reach your goal") }
                    }}
                </span>
            </div>

            <form class="reading-form" on:submit=on_add_reading>
                <input type="search" placeholder="Find a book" prop:value=move || query.get() on:input=on_search/>
                <select on:change=move |ev| {
                    let id = event_target_value(&ev).parse::<i64>().ok();
                    let title = suggestions
                        .get_untracked()
                        .into_iter()
                        .find(|b| Some(b.id) == id)
                        .map(|b| b.title)
                        .unwrap_or_default();
                    form.update(|f| {
                        f.book_id = id;
                        f.book_title = title;
                    });
                }>
                    <option value="">"Select a book"</option>
                    <For
                        each=move || suggestions.get()
                        key=|book| book.id
                        children=|book| view! { <option value=book.id.to_string()>{book.title}</option> }
                    />
                </select>
                <input
                    type="number"
                    min="1"
                    placeholder="Total pages"
                    on:input=move |ev| form.update(|f| f.total_pages = event_target_value(&ev).parse().unwrap_or(0))
                />
                <input
                    type="url"
                    placeholder="Link (optional)"
                    prop:value=move || form.get().link
                    on:input=move |ev| form.update(|f| f.link = event_target_value(&ev))
                />
                <button type="submit">"Add reading"</button>
            </form>

            <div class="reading-table" on:scroll=on_scroll>
                <table>
                    <thead>
                        <tr>
                            <th>"Book"</th>
                            <th>"Status"</th>
                            <th>"Progress"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || snapshot.get().items
                            key=|entry| (entry.reading.id, entry.progress)
                            children=move |entry| view! { <ReadingRow entry=entry on_progress=on_progress/> }
                        />
                    </tbody>
                </table>
            </div>
            <Show when=move || snapshot.get().has_more>
                <button class="reading-table__more" on:click={
                    let load_more = load_more.clone();
                    move |_| load_more()
                } disabled=move || snapshot.get().loading>
                    "Load more"
                </button>
            </Show>
        </section>
    }
}

#[component]
fn ReadingRow(entry: ReadingEntry, on_progress: Callback<(i64, i64, DateTime<Utc>)>) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let id = entry.reading.id;
    let pages = RwSignal::new(0_i64);
    let day = RwSignal::new(Utc::now().format(reads::DATE_INPUT_FORMAT).to_string());

    let on_add = move |_: leptos::ev::MouseEvent| match reads::parse_reading_date(&day.get_untracked()) {
        Ok(date) => on_progress.run((id, pages.get_untracked(), date)),
        Err(notice) => push_notice(ui, notice),
    };

    view! {
        <tr>
            <td>{entry.book_title}</td>
            <td>{entry.status.label()}</td>
            <td>{format!("{} / {}", entry.progress, entry.reading.total_pages)}</td>
            <td>
                <input type="number" min="1" on:input=move |ev| pages.set(event_target_value(&ev).parse().unwrap_or(0))/>
                <input type="date" prop:value=move || day.get() on:input=move |ev| day.set(event_target_value(&ev))/>
                <button on:click=on_add>"Add progress"</button>
            </td>
        </tr>
    }
}
