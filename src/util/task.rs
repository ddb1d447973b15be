//! Fire-and-forget async work started from event handlers.

use std::future::Future;

/// Run `task` on the browser event loop. Outside the browser there is no
/// executor and the task is dropped unpolled.
pub fn spawn(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(task);
    #[cfg(not(feature = "csr"))]
    drop(task);
}
