//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the process-wide services once: the token store, the auth
//! session, and the API client whose 401 hook ends the session. They are
//! shared with every page through Leptos context, together with reactive
//! mirrors of the auth status and the notice queue.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::{nav::Nav, notice_bar::NoticeBar, protected::ProtectedRoute};
use crate::config::ClientConfig;
use crate::net::client::ApiClient;
use crate::net::http::FetchTransport;
use crate::pages::{
    goal::GoalPage, library::LibraryPage, lists::ListsPage, login::LoginPage, my_reads::MyReadsPage,
    notes::NotesPage, stats::StatsPage,
};
use crate::routes;
use crate::state::{
    auth::{AuthSession, AuthState},
    ui::UiState,
};
use crate::util::token_store::TokenStore;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let tokens = TokenStore::browser();
    let session = AuthSession::new(tokens.clone());

    let session_hook = session.clone();
    let api = ApiClient::new(ClientConfig::from_env(), tokens, FetchTransport)
        .with_unauthorized_handler(move || session_hook.logout());

    // Mirror session transitions into the reactive graph.
    let auth = RwSignal::new(session.state());
    session.subscribe(move |status| auth.set(AuthState::from(status)));
    let ui = RwSignal::new(UiState::default());

    // The token may have been cleared in another tab before this one mounted.
    let session_check = session.clone();
    Effect::new(move || {
        session_check.revalidate();
    });

    provide_context(session);
    provide_context(api);
    provide_context(auth);
    provide_context(ui);

    view! {
        <Title text="Book Tracker"/>

        <Router>
            <Nav/>
            <NoticeBar/>
            <main class="content">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path=routes::HOME/> }/>
                    <Route path=StaticSegment("library") view=|| view! { <ProtectedRoute><LibraryPage/></ProtectedRoute> }/>
                    <Route path=StaticSegment("my-reads") view=|| view! { <ProtectedRoute><MyReadsPage/></ProtectedRoute> }/>
                    <Route path=StaticSegment("goal") view=|| view! { <ProtectedRoute><GoalPage/></ProtectedRoute> }/>
                    <Route path=StaticSegment("lists") view=|| view! { <ProtectedRoute><ListsPage/></ProtectedRoute> }/>
                    <Route path=StaticSegment("notes") view=|| view! { <ProtectedRoute><NotesPage/></ProtectedRoute> }/>
                    <Route path=StaticSegment("stats") view=|| view! { <ProtectedRoute><StatsPage/></ProtectedRoute> }/>
                </Routes>
            </main>
        </Router>
    }
}
