//! # book-tracker-client
//!
//! Leptos + WASM frontend for the personal book tracker: a library of books,
//! readings with page progress, a reading goal, reading lists, per-book
//! notes and monthly/daily statistics, all backed by a REST API.
//!
//! The crate splits into browser-independent state and workflows (`net`,
//! `state`, `util`), which build and test natively, and the component tree
//! (`app`, `components`, `pages`) that renders them. Browser-only pieces sit
//! behind the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: install panic and log hooks, then mount `App`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
