//! Application state and the view workflows that mutate it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` owns the login session, `pager` drives the infinite-scroll lists,
//! and `ui` holds transient notices. The per-view modules (`library`,
//! `reads`, `goal`, `lists`, `notes`, `stats`) run one user action against
//! the API and report the outcome as a `Notice`, so pages stay thin.

pub mod auth;
pub mod goal;
pub mod library;
pub mod lists;
pub mod notes;
pub mod pager;
pub mod reads;
pub mod stats;
pub mod ui;
