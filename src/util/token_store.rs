//! Session-token persistence on top of browser `localStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bearer token is the only client state that survives a reload. The auth
//! session is its sole writer; the API client reads it before every request.
//!
//! TRADE-OFFS
//! ==========
//! Storage access is abstracted behind `KeyValueStore` so native builds and
//! tests run against an in-memory map while the browser build talks to
//! `window.localStorage` directly.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Fixed storage key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// Failure reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("persistent storage is unavailable")]
    Unavailable,
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Synchronous string key/value persistence.
pub trait KeyValueStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`. Reports `Unavailable` outside the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

#[cfg(feature = "csr")]
fn js_failure(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Operation(format!("{err:?}"))
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(key).map_err(js_failure)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.set_item(key, value).map_err(js_failure)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.remove_item(key).map_err(js_failure)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }
}

/// Process-local map, used by native builds and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Holder of the single persisted bearer token.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore").field("key", &TOKEN_KEY).finish_non_exhaustive()
    }
}

impl TokenStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self { backend: Arc::new(backend) }
    }

    /// Token store backed by `window.localStorage`.
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    pub fn set(&self, token: &str) -> Result<(), StorageError> {
        self.backend.set_item(TOKEN_KEY, token)
    }

    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn get(&self) -> Result<Option<String>, StorageError> {
        self.backend.get_item(TOKEN_KEY)
    }

    /// Delete the token. Removing an absent token is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    pub fn remove(&self) -> Result<(), StorageError> {
        self.backend.remove_item(TOKEN_KEY)
    }

    /// Whether `get` would return a token. Unreadable storage counts as empty.
    pub fn has(&self) -> bool {
        matches!(self.get(), Ok(Some(_)))
    }
}
