use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::executor::block_on;

use super::*;
use crate::net::error::ApiError;
use crate::state::pager::Page;
use crate::util::token_store::TokenStore;

#[derive(Clone, Debug, PartialEq)]
struct Row(i64);

impl Identified for Row {
    type Id = i64;

    fn id(&self) -> i64 {
        self.0
    }
}

fn counting_pager(calls: &Arc<AtomicUsize>) -> Pager<Row, impl PageSource<Row>> {
    let counter = Arc::clone(calls);
    Pager::new(
        move |page: u32, _size: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            let rows = vec![Row(i64::from(page))];
            async move { Ok::<_, ApiError>(Page { items: rows, has_more: true }) }
        },
        10,
    )
}

// =============================================================
// Guard decisions
// =============================================================

#[test]
fn unauthenticated_redirects_to_login() {
    assert_eq!(decide(false), GuardDecision::Redirect("/login"));
    assert_eq!(decide(true), GuardDecision::Render);
}

#[test]
fn guard_follows_session_changes() {
    let session = AuthSession::new(TokenStore::in_memory());
    assert_eq!(guard(&session), GuardDecision::Redirect(routes::LOGIN));
    session.login("jwt").unwrap();
    assert_eq!(guard(&session), GuardDecision::Render);
    session.logout();
    assert_eq!(guard(&session), GuardDecision::Redirect(routes::LOGIN));
}

#[test]
fn login_view_sends_signed_in_user_home() {
    assert_eq!(login_redirect(true), Some("/library"));
    assert_eq!(login_redirect(false), None);
}

// =============================================================
// Mounting protected views
// =============================================================

#[test]
fn unauthenticated_mount_fetches_nothing() {
    let session = AuthSession::new(TokenStore::in_memory());
    let calls = Arc::new(AtomicUsize::new(0));
    let pager = counting_pager(&calls);
    assert_eq!(block_on(mount_protected(&session, &pager)), MountOutcome::Redirect("/login"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(pager.items().is_empty());
}

#[test]
fn authenticated_mount_loads_first_page() {
    let tokens = TokenStore::in_memory();
    tokens.set("jwt").unwrap();
    let session = AuthSession::new(tokens);
    let calls = Arc::new(AtomicUsize::new(0));
    let pager = counting_pager(&calls);
    assert_eq!(
        block_on(mount_protected(&session, &pager)),
        MountOutcome::Loaded(LoadOutcome::Applied { added: 1 })
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
