//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome (navigation, notices, route guarding) while
//! reading shared state from Leptos context providers.

pub mod nav;
pub mod notice_bar;
pub mod protected;
