use std::sync::atomic::{AtomicUsize, Ordering};

use futures::executor::block_on;

use super::*;
use crate::net::fake_transport::FakeTransport;
use crate::util::token_store::{KeyValueStore, StorageError};

fn client(tokens: &TokenStore) -> (ApiClient<FakeTransport>, FakeTransport) {
    let transport = FakeTransport::new();
    (ApiClient::new(ClientConfig::default(), tokens.clone(), transport.clone()), transport)
}

struct UnreadableStorage;

impl KeyValueStore for UnreadableStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

// =============================================================
// Request preparation
// =============================================================

#[test]
fn endpoint_url_joins_base_and_path() {
    assert_eq!(
        endpoint_url("http://localhost:8081/api", "/books", &[]).unwrap(),
        "http://localhost:8081/api/books"
    );
    assert_eq!(
        endpoint_url("http://localhost:8081/api/", "books/7", &[]).unwrap(),
        "http://localhost:8081/api/books/7"
    );
}

#[test]
fn endpoint_url_encodes_query_pairs() {
    let url = endpoint_url(
        "http://localhost:8081/api",
        "/books/search",
        &[("title", "the hobbit".to_owned()), ("limit", "10".to_owned())],
    )
    .unwrap();
    assert_eq!(url, "http://localhost:8081/api/books/search?title=the+hobbit&limit=10");
}

#[test]
fn endpoint_url_rejects_unparsable_base() {
    assert!(matches!(endpoint_url("not a url", "/books", &[]), Err(ApiError::InvalidUrl(_))));
}

#[test]
fn bearer_header_attached_when_token_present() {
    let tokens = TokenStore::in_memory();
    tokens.set("t0k3n").unwrap();
    let (api, _) = client(&tokens);
    let request = api.build_request(Method::Get, "/books", &[], None).unwrap();
    assert_eq!(request.header("authorization"), Some("Bearer t0k3n"));
}

#[test]
fn no_bearer_header_without_token() {
    let tokens = TokenStore::in_memory();
    let (api, _) = client(&tokens);
    let request = api.build_request(Method::Get, "/books", &[], None).unwrap();
    assert_eq!(request.header("Authorization"), None);
}

#[test]
fn unreadable_token_store_still_builds_request() {
    let tokens = TokenStore::new(UnreadableStorage);
    let (api, transport) = client(&tokens);
    transport.respond(200, "[]");
    let books: Vec<serde_json::Value> = block_on(api.get_json("/books/search", &[])).unwrap();
    assert!(books.is_empty());
    assert_eq!(transport.last_request().unwrap().header("Authorization"), None);
}

#[test]
fn json_body_sets_content_type_and_timeout() {
    let tokens = TokenStore::in_memory();
    let (api, _) = client(&tokens);
    let request = api.build_request(Method::Post, "/books", &[], Some("{}".to_owned())).unwrap();
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    assert_eq!(request.timeout_ms, 10_000);
}

// =============================================================
// Response handling
// =============================================================

#[test]
fn send_passes_non_success_status_through() {
    let tokens = TokenStore::in_memory();
    let (api, transport) = client(&tokens);
    transport.respond(500, r#"{"message":"server error"}"#);
    let response = block_on(api.send(Method::Get, "/goal", &[], None)).unwrap();
    assert_eq!(response.status, 500);
}

#[test]
fn get_json_classifies_error_status() {
    let tokens = TokenStore::in_memory();
    let (api, transport) = client(&tokens);
    transport.respond(404, r#"{"message":"goal not found"}"#);
    let err = block_on(api.get_json::<serde_json::Value>("/goal", &[])).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.server_message(), Some("goal not found"));
}

#[test]
fn get_json_reports_malformed_body() {
    let tokens = TokenStore::in_memory();
    let (api, transport) = client(&tokens);
    transport.respond(200, "not json");
    let err = block_on(api.get_json::<Vec<i64>>("/lists", &[])).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn transport_failure_surfaces_without_retry() {
    let tokens = TokenStore::in_memory();
    let (api, transport) = client(&tokens);
    transport.fail(ApiError::Transport("offline".to_owned()));
    let err = block_on(api.delete("/books/3")).unwrap_err();
    assert_eq!(err, ApiError::Transport("offline".to_owned()));
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn unauthorized_response_fires_hook_and_returns_error() {
    let tokens = TokenStore::in_memory();
    let fired = Arc::new(AtomicUsize::new(0));
    let fired_hook = Arc::clone(&fired);
    let (api, transport) = client(&tokens);
    let api = api.with_unauthorized_handler(move || {
        fired_hook.fetch_add(1, Ordering::SeqCst);
    });
    transport.respond(401, r#"{"message":"Invalid token"}"#);
    let err = block_on(api.get_json::<serde_json::Value>("/books", &[])).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn forbidden_response_does_not_fire_hook() {
    let tokens = TokenStore::in_memory();
    let fired = Arc::new(AtomicUsize::new(0));
    let fired_hook = Arc::clone(&fired);
    let (api, transport) = client(&tokens);
    let api = api.with_unauthorized_handler(move || {
        fired_hook.fetch_add(1, Ordering::SeqCst);
    });
    transport.respond(403, "");
    let _ = block_on(api.delete("/notes/4"));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}
