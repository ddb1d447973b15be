use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::config::ClientConfig;
use crate::net::fake_transport::FakeTransport;
use crate::net::types::{GoalFrequency, GoalKind};
use crate::util::token_store::TokenStore;

fn client() -> (ApiClient<FakeTransport>, FakeTransport) {
    let transport = FakeTransport::new();
    (ApiClient::new(ClientConfig::default(), TokenStore::in_memory(), transport.clone()), transport)
}

fn monthly_pages(value: i64) -> Goal {
    Goal { kind: GoalKind::Pages, frequency: GoalFrequency::Monthly, value }
}

#[test]
fn load_goal_returns_stored_goal() {
    let (api, transport) = client();
    transport.respond_json(200, &json!({"type": "pages", "frequency": "monthly", "value": 300}));
    assert_eq!(block_on(load_goal(&api)).unwrap(), monthly_pages(300));
}

#[test]
fn missing_goal_defaults_to_zero_daily_books() {
    let (api, transport) = client();
    transport.respond(404, r#"{"message":"goal not found"}"#);
    assert_eq!(block_on(load_goal(&api)).unwrap(), Goal::default());
}

#[test]
fn load_goal_failure_is_error_notice() {
    let (api, transport) = client();
    transport.fail(ApiError::Transport("offline".to_owned()));
    assert_eq!(block_on(load_goal(&api)).unwrap_err(), Notice::error("Failed to fetch current goal: Network error"));
}

#[test]
fn save_goal_replaces_current_on_success() {
    let (api, transport) = client();
    transport.respond_json(200, &json!({"type": "pages", "frequency": "monthly", "value": 250}));
    let mut current = Goal::default();
    let notice = block_on(save_goal(&api, &mut current, monthly_pages(250)));
    assert_eq!(notice, Notice::success("Goal updated successfully"));
    assert_eq!(current, monthly_pages(250));
    assert_eq!(
        transport.last_request().unwrap().body.as_deref(),
        Some(r#"{"type":"pages","frequency":"monthly","value":250}"#)
    );
}

#[test]
fn save_goal_rejects_zero_without_request() {
    let (api, transport) = client();
    let mut current = monthly_pages(10);
    let notice = block_on(save_goal(&api, &mut current, monthly_pages(0)));
    assert!(notice.is_error());
    assert_eq!(current, monthly_pages(10));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn save_goal_failure_keeps_current() {
    let (api, transport) = client();
    transport.respond(400, r#"{"message":"invalid frequency"}"#);
    let mut current = monthly_pages(10);
    let notice = block_on(save_goal(&api, &mut current, monthly_pages(20)));
    assert_eq!(notice, Notice::error("Failed to update goal: invalid frequency"));
    assert_eq!(current, monthly_pages(10));
}
