//! Recording transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use super::error::ApiError;
use super::http::{HttpRequest, HttpResponse, HttpTransport};

/// Replays queued responses in order and records every request it sees.
#[derive(Clone, Default)]
pub struct FakeTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, ApiError>>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.queue(Ok(HttpResponse { status, body: body.to_owned() }))
    }

    pub fn respond_json(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.respond(status, &body.to_string())
    }

    pub fn fail(&self, err: ApiError) -> &Self {
        self.queue(Err(err))
    }

    fn queue(&self, response: Result<HttpResponse, ApiError>) -> &Self {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner).push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no response queued".to_owned())))
    }
}
