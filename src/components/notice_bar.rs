//! Toast-style notices raised by page workflows.

use leptos::prelude::*;

use crate::state::ui::{Notice, UiState};

/// Queue `notice` for display.
pub fn push_notice(ui: RwSignal<UiState>, notice: Notice) {
    ui.update(|state| {
        state.notify(notice);
    });
}

#[component]
pub fn NoticeBar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <div class="notice-bar">
            <For
                each=move || ui.get().notices
                key=|(id, _)| *id
                children=move |(id, notice)| {
                    view! {
                        <div class=format!("notice {}", notice.level.css_class())>
                            <span class="notice__text">{notice.text}</span>
                            <button class="notice__close" on:click=move |_| ui.update(|s| s.dismiss(id))>
                                "x"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
