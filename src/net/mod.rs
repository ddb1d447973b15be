//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` is the single HTTP gateway (base address, bearer token, 401
//! hook), `http` abstracts the browser fetch behind a transport trait,
//! `api` maps backend routes to typed calls, `types` defines the wire schema,
//! and `error` classifies failures into user-facing messages.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod types;

#[cfg(test)]
pub mod fake_transport;
