//! HTTP transport seam.
//!
//! Client-side (csr): real requests through `gloo-net` (browser `fetch`),
//! raced against a `gloo-timers` timeout.
//! Native builds: `FetchTransport` reports a transport failure, since these
//! requests are only meaningful in the browser. Tests substitute their own
//! `HttpTransport`.

use std::future::Future;

use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully prepared outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and yields the raw response.
///
/// Implementations report only the failure to obtain a response
/// (`Transport`/`Timeout`); any HTTP status is a successful send.
pub trait HttpTransport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, ApiError>>;
}

/// Browser `fetch` transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            fetch(request).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Transport("not available outside the browser".to_owned()))
        }
    }
}

#[cfg(feature = "csr")]
async fn fetch(request: HttpRequest) -> Result<HttpResponse, ApiError> {
    use futures::future::{Either, select};
    use gloo_net::http::Request;

    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Put => Request::put(&request.url),
        Method::Delete => Request::delete(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let prepared = match request.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Transport(e.to_string()))?;

    let timeout_ms = request.timeout_ms;
    let send = Box::pin(prepared.send());
    let timer = Box::pin(gloo_timers::future::TimeoutFuture::new(u32::try_from(timeout_ms).unwrap_or(u32::MAX)));

    match select(send, timer).await {
        Either::Left((Ok(resp), _)) => {
            let status = resp.status();
            let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(HttpResponse { status, body })
        }
        Either::Left((Err(e), _)) => Err(ApiError::Transport(e.to_string())),
        Either::Right(((), _)) => Err(ApiError::Timeout { after_ms: timeout_ms }),
    }
}
