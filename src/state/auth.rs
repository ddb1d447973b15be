//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and the login view to coordinate redirects. The
//! session is the only writer of the token store; the API client reads the
//! token but never changes it, and reaches `logout` only through the
//! unauthorized hook wired up in `app`.
//!
//! DESIGN
//! ======
//! `AuthSession` is constructed explicitly and handed to whoever needs it
//! (in the UI, through context). Components that render from auth state
//! subscribe to status changes instead of polling the store. Listeners run
//! after the internal lock is released, so a listener may call back into the
//! session.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::util::token_store::{StorageError, TokenStore};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Unauthenticated,
    Authenticated,
}

/// Authentication state mirrored into a reactive signal for rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub status: AuthStatus,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }
}

impl From<AuthStatus> for AuthState {
    fn from(status: AuthStatus) -> Self {
        Self { status }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("session token is empty")]
    EmptyToken,
    #[error("could not persist session token: {0}")]
    Storage(#[from] StorageError),
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(AuthStatus) + Send + Sync>;

struct SessionInner {
    status: AuthStatus,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// Login/logout state backed by the token store. Clones share state.
#[derive(Clone)]
pub struct AuthSession {
    tokens: TokenStore,
    inner: Arc<Mutex<SessionInner>>,
}

impl AuthSession {
    /// Build a session whose initial status reflects the stored token.
    pub fn new(tokens: TokenStore) -> Self {
        let status = status_for(&tokens);
        Self {
            tokens,
            inner: Arc::new(Mutex::new(SessionInner { status, next_id: 0, listeners: Vec::new() })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> AuthStatus {
        self.lock().status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == AuthStatus::Authenticated
    }

    pub fn state(&self) -> AuthState {
        self.status().into()
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Persist `token` and become authenticated.
    ///
    /// # Errors
    ///
    /// Returns `EmptyToken` for a blank token (nothing changes), or the
    /// storage error if the token could not be written.
    pub fn login(&self, token: &str) -> Result<(), AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::EmptyToken);
        }
        self.tokens.set(token)?;
        log::info!("auth: session started");
        self.transition(AuthStatus::Authenticated);
        Ok(())
    }

    /// Drop the stored token and become unauthenticated. Safe to repeat.
    pub fn logout(&self) {
        if let Err(e) = self.tokens.remove() {
            log::warn!("auth: could not clear stored token: {e}");
        }
        if self.is_authenticated() {
            log::info!("auth: session ended");
        }
        self.transition(AuthStatus::Unauthenticated);
    }

    /// Re-read the token store, e.g. once after the first render.
    pub fn revalidate(&self) -> AuthStatus {
        let status = status_for(&self.tokens);
        self.transition(status);
        status
    }

    /// Call `listener` with the new status after every change.
    pub fn subscribe(&self, listener: impl Fn(AuthStatus) + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _)| *listener_id != id);
        inner.listeners.len() != before
    }

    fn transition(&self, next: AuthStatus) {
        let listeners: Vec<Listener> = {
            let mut inner = self.lock();
            if inner.status == next {
                return;
            }
            inner.status = next;
            inner.listeners.iter().map(|(_, listener)| Arc::clone(listener)).collect()
        };
        for listener in listeners {
            listener(next);
        }
    }
}

fn status_for(tokens: &TokenStore) -> AuthStatus {
    if tokens.has() { AuthStatus::Authenticated } else { AuthStatus::Unauthenticated }
}
