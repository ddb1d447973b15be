//! Sidebar navigation shown on authenticated pages.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes;
use crate::state::auth::{AuthSession, AuthState};

#[component]
pub fn Nav() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AuthSession>();

    let on_logout = move |_| session.logout();

    view! {
        <Show when=move || auth.get().is_authenticated()>
            <nav class="sidebar">
                <A href=routes::LIBRARY>"Library"</A>
                <A href=routes::MY_READS>"My reads"</A>
                <A href=routes::GOAL>"Goal"</A>
                <A href=routes::LISTS>"Lists"</A>
                <A href=routes::NOTES>"Notes"</A>
                <A href=routes::STATS>"Stats"</A>
                <button class="sidebar__logout" on:click=on_logout.clone()>
                    "Log out"
                </button>
            </nav>
        </Show>
    }
}
