use super::*;

struct BrokenStorage;

impl KeyValueStore for BrokenStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Operation("quota".to_owned()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Operation("quota".to_owned()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Operation("quota".to_owned()))
    }
}

#[test]
fn empty_store_has_no_token() {
    let store = TokenStore::in_memory();
    assert_eq!(store.get(), Ok(None));
    assert!(!store.has());
}

#[test]
fn set_then_get_returns_token() {
    let store = TokenStore::in_memory();
    store.set("abc").unwrap();
    assert_eq!(store.get(), Ok(Some("abc".to_owned())));
    assert!(store.has());
}

#[test]
fn set_overwrites_previous_token() {
    let store = TokenStore::in_memory();
    store.set("first").unwrap();
    store.set("second").unwrap();
    assert_eq!(store.get(), Ok(Some("second".to_owned())));
}

#[test]
fn set_does_not_validate_contents() {
    let store = TokenStore::in_memory();
    store.set("").unwrap();
    assert!(store.has());
}

#[test]
fn remove_is_idempotent() {
    let store = TokenStore::in_memory();
    store.set("abc").unwrap();
    store.remove().unwrap();
    store.remove().unwrap();
    assert!(!store.has());
}

#[test]
fn token_lives_under_fixed_key() {
    let backend = MemoryStorage::default();
    let store = TokenStore::new(backend.clone());
    store.set("abc").unwrap();
    assert_eq!(backend.get_item("token"), Ok(Some("abc".to_owned())));
}

#[test]
fn clones_share_the_backend() {
    let store = TokenStore::in_memory();
    let other = store.clone();
    store.set("abc").unwrap();
    assert!(other.has());
}

#[test]
fn unreadable_storage_reports_no_token() {
    let store = TokenStore::new(BrokenStorage);
    assert!(store.get().is_err());
    assert!(!store.has());
}

#[cfg(not(feature = "csr"))]
#[test]
fn browser_storage_is_unavailable_natively() {
    let store = TokenStore::browser();
    assert_eq!(store.get(), Err(StorageError::Unavailable));
}
