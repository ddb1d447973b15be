//! Utility helpers shared across pages and state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, clipboard and
//! downloads, DOM scroll metrics, task spawning) from page and state logic,
//! so the latter compile and test natively.

pub mod auth;
pub mod export;
pub mod scroll;
pub mod task;
pub mod token_store;
