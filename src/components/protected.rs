//! Route wrapper that only renders its children for a signed-in user.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::components::Redirect;

use crate::state::auth::AuthState;
use crate::util::auth::{GuardDecision, decide};

/// Renders `children` while authenticated; otherwise redirects to login.
/// Re-evaluates whenever the auth signal changes, so a logout (including
/// one triggered by a 401) moves the user off the page.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    move || match decide(auth.get().is_authenticated()) {
        GuardDecision::Render => children().into_any(),
        GuardDecision::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
    }
}
