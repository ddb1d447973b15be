use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::config::ClientConfig;
use crate::net::fake_transport::FakeTransport;
use crate::util::token_store::TokenStore;

fn client() -> (ApiClient<FakeTransport>, FakeTransport) {
    let transport = FakeTransport::new();
    (ApiClient::new(ClientConfig::default(), TokenStore::in_memory(), transport.clone()), transport)
}

fn form(page_number: i64, content: &str) -> NoteForm {
    NoteForm { page_number, content: content.to_owned() }
}

fn note(id: i64) -> Note {
    Note { id, page_number: 10, content: format!("note {id}") }
}

#[test]
fn form_validation() {
    assert!(form(0, "x").validate().is_err());
    assert!(form(3, "  ").validate().is_err());
    assert_eq!(form(3, " spice ").validate().unwrap().content, "spice");
}

#[test]
fn load_notes_for_book() {
    let (api, transport) = client();
    transport.respond_json(200, &json!([{"id": 1, "page_number": 12, "content": "spice"}]));
    let notes = block_on(load_notes(&api, 4)).unwrap();
    assert_eq!(notes[0].content, "spice");
    assert!(transport.last_request().unwrap().url.ends_with("/notes/4"));
}

#[test]
fn load_notes_failure_notice() {
    let (api, transport) = client();
    transport.respond(500, r#"{"message":"db down"}"#);
    assert_eq!(block_on(load_notes(&api, 4)).unwrap_err(), Notice::error("Failed to fetch notes: db down"));
}

#[test]
fn create_note_without_book_sends_nothing() {
    let (api, transport) = client();
    let mut notes = Vec::new();
    let notice = block_on(create_note(&api, &mut notes, None, &form(3, "x")));
    assert_eq!(notice, Notice::warning("Please select a book!"));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn create_note_with_blank_content_sends_nothing() {
    let (api, transport) = client();
    let mut notes = Vec::new();
    let notice = block_on(create_note(&api, &mut notes, Some(4), &form(3, " ")));
    assert_eq!(notice, Notice::error("Note content is required!"));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn create_note_appends() {
    let (api, transport) = client();
    transport.respond_json(200, &json!({"id": 7, "page_number": 3, "content": "spice"}));
    let mut notes = vec![note(1)];
    let notice = block_on(create_note(&api, &mut notes, Some(4), &form(3, "spice")));
    assert_eq!(notice, Notice::success("Note created successfully!"));
    assert_eq!(notes.len(), 2);
    let request = transport.last_request().unwrap();
    assert!(request.url.ends_with("/notes/4"));
    assert_eq!(request.body.as_deref(), Some(r#"{"page_number":3,"content":"spice"}"#));
}

#[test]
fn delete_note_removes_locally() {
    let (api, transport) = client();
    transport.respond(200, "");
    let mut notes = vec![note(1), note(2)];
    assert_eq!(block_on(delete_note(&api, &mut notes, 1)), Notice::success("Note deleted successfully!"));
    assert_eq!(notes, vec![note(2)]);
}

#[test]
fn delete_note_failure_keeps_notes() {
    let (api, transport) = client();
    transport.respond(404, r#"{"message":"note not found"}"#);
    let mut notes = vec![note(1)];
    assert_eq!(block_on(delete_note(&api, &mut notes, 1)), Notice::error("Failed to delete note: note not found"));
    assert_eq!(notes.len(), 1);
}
