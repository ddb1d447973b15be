//! The single outbound HTTP gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every REST call goes through one `ApiClient`. It joins paths onto the
//! configured base address, attaches the bearer token from the token store,
//! and hands the request to the transport. It never retries, queues, or
//! de-duplicates requests.
//!
//! ERROR HANDLING
//! ==============
//! Token attachment never fails a request: an unreadable store degrades to
//! an unauthenticated request. A 401 response fires the unauthorized hook
//! (the app wires it to `AuthSession::logout`) and is still returned to the
//! caller.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::http::{FetchTransport, HttpRequest, HttpResponse, HttpTransport, Method};
use crate::config::ClientConfig;
use crate::util::token_store::TokenStore;

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Shared REST client; clones share the token store and hook.
#[derive(Clone)]
pub struct ApiClient<T = FetchTransport> {
    config: Arc<ClientConfig>,
    tokens: TokenStore,
    transport: T,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(config: ClientConfig, tokens: TokenStore, transport: T) -> Self {
        Self { config: Arc::new(config), tokens, transport, on_unauthorized: None }
    }

    /// Run `hook` whenever a response comes back 401.
    #[must_use]
    pub fn with_unauthorized_handler(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the outbound request for `path` (relative to the base address).
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the joined address does not parse.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<String>,
    ) -> Result<HttpRequest, ApiError> {
        let url = endpoint_url(&self.config.api_base_url, path, query)?;
        let mut headers = Vec::new();
        match self.tokens.get() {
            Ok(Some(token)) => headers.push(("Authorization".to_owned(), format!("Bearer {token}"))),
            Ok(None) => {}
            Err(e) => log::warn!("api: token store unreadable, sending without credentials: {e}"),
        }
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        Ok(HttpRequest { method, url, headers, body, timeout_ms: self.config.request_timeout_ms })
    }

    /// Send one request and return the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response was obtained.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build_request(method, path, query, body)?;
        log::debug!("api: {} {}", method.as_str(), request.url);
        let response = self.transport.send(request).await?;
        if response.status == 401 {
            if let Some(hook) = &self.on_unauthorized {
                log::info!("api: {path} answered 401, dropping session");
                hook();
            }
        }
        Ok(response)
    }

    /// `GET` and decode a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the classified status error, transport error, or decode error.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<R, ApiError> {
        let response = self.send(Method::Get, path, query, None).await?;
        decode(expect_success(response)?)
    }

    /// `POST` a JSON body and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// Returns the classified status error, transport error, or decode error.
    pub async fn post_json<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let response = self.send(Method::Post, path, &[], Some(encode(body)?)).await?;
        decode(expect_success(response)?)
    }

    /// `PUT` a JSON body and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// Returns the classified status error, transport error, or decode error.
    pub async fn put_json<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let response = self.send(Method::Put, path, &[], Some(encode(body)?)).await?;
        decode(expect_success(response)?)
    }

    /// `POST` a JSON body, ignoring the reply body.
    ///
    /// # Errors
    ///
    /// Returns the classified status error or transport error.
    pub async fn post_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self.send(Method::Post, path, &[], Some(encode(body)?)).await?;
        expect_success(response).map(drop)
    }

    /// `DELETE`, ignoring the reply body.
    ///
    /// # Errors
    ///
    /// Returns the classified status error or transport error.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send(Method::Delete, path, &[], None).await?;
        expect_success(response).map(drop)
    }
}

fn endpoint_url(base: &str, path: &str, query: &[(&str, String)]) -> Result<String, ApiError> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    let mut url = url::Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{joined}: {e}")))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url.into())
}

fn expect_success(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_status(response.status, &response.body))
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<R: DeserializeOwned>(response: HttpResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}
