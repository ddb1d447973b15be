//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (signals, spawned requests) and
//! delegates the actual work to the workflows in `state`. Pages read the
//! shared `ApiClient`, `AuthSession` and `UiState` from context.

pub mod goal;
pub mod library;
pub mod lists;
pub mod login;
pub mod my_reads;
pub mod notes;
pub mod stats;

use leptos::prelude::*;

use crate::components::notice_bar::push_notice;
use crate::state::auth::AuthSession;
use crate::state::pager::{Identified, LoadOutcome, PageSource, Pager, PagerSnapshot};
use crate::state::ui::{Notice, UiState};
use crate::util::auth::{MountOutcome, mount_protected};
use crate::util::task::spawn;

/// Load `page` in the background and publish the result to `snapshot`.
pub(crate) fn load_into<T, S>(pager: Pager<T, S>, page: u32, snapshot: RwSignal<PagerSnapshot<T>>, ui: RwSignal<UiState>)
where
    T: Identified + Clone + Send + Sync + 'static,
    S: PageSource<T> + 'static,
{
    spawn(async move {
        let outcome = pager.load_page(page).await;
        publish(&pager, &outcome, snapshot, ui);
    });
}

/// Guarded first load for a list page.
pub(crate) fn mount_into<T, S>(
    session: AuthSession,
    pager: Pager<T, S>,
    snapshot: RwSignal<PagerSnapshot<T>>,
    ui: RwSignal<UiState>,
) where
    T: Identified + Clone + Send + Sync + 'static,
    S: PageSource<T> + 'static,
{
    spawn(async move {
        if let MountOutcome::Loaded(outcome) = mount_protected(&session, &pager).await {
            publish(&pager, &outcome, snapshot, ui);
        }
    });
}

/// Report a finished load and copy pager state into the view.
pub(crate) fn publish<T, S>(pager: &Pager<T, S>, outcome: &LoadOutcome, snapshot: RwSignal<PagerSnapshot<T>>, ui: RwSignal<UiState>)
where
    T: Identified + Clone + Send + Sync + 'static,
    S: PageSource<T>,
{
    if matches!(outcome, LoadOutcome::Failed(_)) {
        if let Some(message) = pager.error() {
            push_notice(ui, Notice::error(message));
        }
    }
    refresh(pager, snapshot);
}

/// Copy pager state into the view, unless the page has been unmounted.
pub(crate) fn refresh<T, S>(pager: &Pager<T, S>, snapshot: RwSignal<PagerSnapshot<T>>)
where
    T: Identified + Clone + Send + Sync + 'static,
    S: PageSource<T>,
{
    if !pager.is_disposed() {
        snapshot.set(pager.snapshot());
    }
}
