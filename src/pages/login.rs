//! Login page: exchange an identity credential for a session token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider hands the page an opaque credential string. The
//! page posts it to `/auth/login`, stores the returned token through the
//! shared `AuthSession`, and the auth signal flip sends the user home.
//! A visitor who is already signed in is redirected immediately.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::notice_bar::push_notice;
use crate::net::api;
use crate::net::client::ApiClient;
use crate::net::http::HttpTransport;
use crate::state::auth::{AuthSession, AuthState};
use crate::state::ui::{Notice, UiState};
use crate::util::auth::install_login_redirect;
use crate::util::task::spawn;

const LOGIN_CONTEXT: &str = "Failed to login";

/// Run the login exchange and start the session on success.
pub async fn sign_in<T: HttpTransport>(api: &ApiClient<T>, session: &AuthSession, credential: &str) -> Notice {
    let token = match api::login(api, credential).await {
        Ok(token) => token,
        Err(err) => {
            log::warn!("login: exchange failed: {err}");
            return Notice::error(err.user_message(LOGIN_CONTEXT));
        }
    };
    match session.login(&token) {
        Ok(()) => Notice::success("Login successful!"),
        Err(err) => {
            log::error!("login: {err}");
            Notice::error(format!("{LOGIN_CONTEXT}: {err}"))
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let session = expect_context::<AuthSession>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    install_login_redirect(auth, use_navigate());

    let credential = RwSignal::new(String::new());
    let pending = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        pending.set(true);
        let (api, session) = (api.clone(), session.clone());
        let value = credential.get_untracked();
        spawn(async move {
            let notice = sign_in(&api, &session, &value).await;
            pending.set(false);
            push_notice(ui, notice);
        });
    };

    view! {
        <section class="login-page">
            <h1>"Book Tracker"</h1>
            <p>"Sign in with your identity provider credential."</p>
            <form class="login-form" on:submit=on_submit>
                <input
                    type="password"
                    placeholder="Credential"
                    prop:value=move || credential.get()
                    on:input=move |ev| credential.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || pending.get()>
                    "Sign in"
                </button>
            </form>
        </section>
    }
}
