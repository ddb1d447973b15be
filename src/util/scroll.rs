//! Scroll metrics from DOM scroll events.

use crate::state::pager::ScrollMetrics;

/// Metrics of the element the scroll listener is attached to.
///
/// Returns `None` outside the browser or when the target is not an element.
pub fn scroll_metrics(ev: &leptos::ev::Event) -> Option<ScrollMetrics> {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let element = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
        Some(ScrollMetrics {
            scroll_top: f64::from(element.scroll_top()),
            scroll_height: f64::from(element.scroll_height()),
            client_height: f64::from(element.client_height()),
        })
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = ev;
        None
    }
}
