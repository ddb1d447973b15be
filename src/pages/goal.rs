//! Goal page: view and edit the reading goal.

use leptos::prelude::*;

use crate::components::notice_bar::push_notice;
use crate::net::client::ApiClient;
use crate::net::types::{Goal, GoalFrequency, GoalKind};
use crate::state::goal::{load_goal, save_goal};
use crate::state::ui::UiState;
use crate::util::task::spawn;

fn kind_from_value(value: &str) -> GoalKind {
    if value == "pages" { GoalKind::Pages } else { GoalKind::Books }
}

fn frequency_from_value(value: &str) -> GoalFrequency {
    if value == "monthly" { GoalFrequency::Monthly } else { GoalFrequency::Daily }
}

fn describe(goal: &Goal) -> String {
    let kind = match goal.kind {
        GoalKind::Books => "books",
        GoalKind::Pages => "pages",
    };
    let period = match goal.frequency {
        GoalFrequency::Daily => "day",
        GoalFrequency::Monthly => "month",
    };
    format!("{} {kind} per {period}", goal.value)
}

#[component]
pub fn GoalPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let ui = expect_context::<RwSignal<UiState>>();

    let current = RwSignal::new(Goal::default());
    let draft = RwSignal::new(Goal::default());

    let api_load = api.clone();
    spawn(async move {
        match load_goal(&api_load).await {
            Ok(goal) => {
                current.set(goal.clone());
                draft.set(goal);
            }
            Err(notice) => push_notice(ui, notice),
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        let next = draft.get_untracked();
        spawn(async move {
            let mut goal = current.get_untracked();
            let notice = save_goal(&api, &mut goal, next).await;
            current.set(goal);
            push_notice(ui, notice);
        });
    };

    view! {
        <section class="goal-page">
            <h1>"Reading goal"</h1>
            <p class="goal-page__current">
                {move || {
                    let goal = current.get();
                    if goal.value == 0 { "No goal set yet.".to_owned() } else { describe(&goal) }
                }}
            </p>
            <form class="goal-form" on:submit=on_submit>
                <select on:change=move |ev| draft.update(|g| g.kind = kind_from_value(&event_target_value(&ev)))>
                    <option value="books" selected=move || draft.get().kind == GoalKind::Books>"Books"</option>
                    <option value="pages" selected=move || draft.get().kind == GoalKind::Pages>"Pages"</option>
                </select>
                <select on:change=move |ev| draft.update(|g| g.frequency = frequency_from_value(&event_target_value(&ev)))>
                    <option value="daily" selected=move || draft.get().frequency == GoalFrequency::Daily>"Daily"</option>
                    <option value="monthly" selected=move || draft.get().frequency == GoalFrequency::Monthly>
                        "Monthly"
                    </option>
                </select>
                <input
                    type="number"
                    min="1"
                    prop:value=move || draft.get().value.to_string()
                    on:input=move |ev| draft.update(|g| g.value = event_target_value(&ev).parse().unwrap_or(0))
                />
                <button type="submit">"Save goal"</button>
            </form>
        </section>
    }
}
