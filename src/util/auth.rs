//! Shared route-guard rules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected views and the login view apply mirror-image redirect rules:
//! protected views send unauthenticated visitors to `/login`, the login view
//! sends authenticated visitors home. The decisions are pure functions of
//! the session state so they can be tested without a router.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::routes;
use crate::state::auth::{AuthSession, AuthState};
use crate::state::pager::{Identified, LoadOutcome, PageSource, Pager};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
}

/// Guard rule for protected views.
pub fn decide(is_authenticated: bool) -> GuardDecision {
    if is_authenticated { GuardDecision::Render } else { GuardDecision::Redirect(routes::LOGIN) }
}

pub fn guard(session: &AuthSession) -> GuardDecision {
    decide(session.is_authenticated())
}

/// Guard rule for the login view: where to send an already signed-in user.
pub fn login_redirect(is_authenticated: bool) -> Option<&'static str> {
    is_authenticated.then_some(routes::HOME)
}

/// Result of mounting a protected list view.
#[derive(Clone, Debug, PartialEq)]
pub enum MountOutcome {
    Redirect(&'static str),
    Loaded(LoadOutcome),
}

/// Check the guard, then load the first page. Nothing is fetched when the
/// guard redirects.
pub async fn mount_protected<T, S>(session: &AuthSession, pager: &Pager<T, S>) -> MountOutcome
where
    T: Identified + Clone,
    S: PageSource<T>,
{
    match guard(session) {
        GuardDecision::Redirect(path) => {
            log::debug!("guard: redirecting to {path}");
            MountOutcome::Redirect(path)
        }
        GuardDecision::Render => MountOutcome::Loaded(pager.load_page(pager.page()).await),
    }
}

/// Navigate home whenever the session becomes authenticated.
pub fn install_login_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(path) = login_redirect(auth.get().is_authenticated()) {
            navigate(path, NavigateOptions::default());
        }
    });
}
