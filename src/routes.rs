//! Route paths shared by the router, guards and navigation links.

pub const LOGIN: &str = "/login";
pub const LIBRARY: &str = "/library";
pub const MY_READS: &str = "/my-reads";
pub const GOAL: &str = "/goal";
pub const LISTS: &str = "/lists";
pub const NOTES: &str = "/notes";
pub const STATS: &str = "/stats";

/// Landing route after login.
pub const HOME: &str = LIBRARY;
