//! Paginated list controller behind the infinite-scroll views.
//!
//! SYSTEM CONTEXT
//! ==============
//! The library and my-reads views each own one `Pager`. The view calls
//! `load_page(1)` on mount, feeds scroll events to `on_scroll`, and loads
//! whatever page that returns. The pager fetches through a `PageSource`, so
//! the REST endpoints and test doubles plug in the same way.
//!
//! DESIGN
//! ======
//! - One request at a time: `loading` is set before the source is called and
//!   every other load is skipped until it clears.
//! - The cursor only moves past a page once that page has been applied. A
//!   failed page is therefore requested again by the next qualifying scroll.
//! - Items are de-duplicated by identifier across all loaded pages, so
//!   overlapping batches never produce duplicate rows.
//! - State sits behind `Arc<Mutex<_>>`; the lock is never held across the
//!   source call.
//!
//! TRADE-OFFS
//! ==========
//! Requests are not cancellable. `dispose` only makes late results a no-op.

#[cfg(test)]
#[path = "pager_test.rs"]
mod pager_test;

use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::net::error::ApiError;

/// Distance from the bottom (in px) at which the next page is requested.
pub const SCROLL_THRESHOLD_PX: f64 = 10.0;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Anything with a stable identifier usable for de-duplication.
pub trait Identified {
    type Id: Eq + Hash + Clone + fmt::Debug;

    fn id(&self) -> Self::Id;
}

/// One batch returned by a page source.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

/// Fetches one page of `T`.
pub trait PageSource<T> {
    fn fetch_page(&self, page: u32, page_size: u32) -> impl Future<Output = Result<Page<T>, ApiError>>;
}

impl<T, F, Fut> PageSource<T> for F
where
    F: Fn(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, ApiError>>,
{
    fn fetch_page(&self, page: u32, page_size: u32) -> impl Future<Output = Result<Page<T>, ApiError>> {
        self(page, page_size)
    }
}

/// Scroll position of the list container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn remaining(&self) -> f64 {
        self.scroll_height - self.scroll_top - self.client_height
    }

    pub fn near_end(&self) -> bool {
        self.remaining() <= SCROLL_THRESHOLD_PX
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Another page is in flight.
    Busy,
    /// The source reported no more pages.
    Exhausted,
    AlreadyLoaded,
    Disposed,
}

/// Result of one `load_page` call.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    /// The page was applied; `added` counts previously unseen items.
    Applied { added: usize },
    /// The source was not called.
    Skipped(SkipReason),
    /// The source failed; the user-facing message is in `error`.
    Failed(ApiError),
    /// The pager was disposed while the request was in flight.
    Discarded,
}

/// Cloned view of pager state for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct PagerSnapshot<T> {
    pub page: u32,
    pub items: Vec<T>,
    pub loading: bool,
    pub has_more: bool,
    pub error: Option<String>,
}

impl<T> Default for PagerSnapshot<T> {
    fn default() -> Self {
        Self { page: 1, items: Vec::new(), loading: false, has_more: true, error: None }
    }
}

struct PagerState<T: Identified> {
    page: u32,
    items: Vec<T>,
    seen: HashSet<T::Id>,
    loaded: HashSet<u32>,
    loading: bool,
    has_more: bool,
    disposed: bool,
    error: Option<String>,
}

impl<T: Identified> PagerState<T> {
    fn new() -> Self {
        Self {
            page: 1,
            items: Vec::new(),
            seen: HashSet::new(),
            loaded: HashSet::new(),
            loading: false,
            has_more: true,
            disposed: false,
            error: None,
        }
    }

    fn skip_reason(&self, page: u32) -> Option<SkipReason> {
        if self.disposed {
            Some(SkipReason::Disposed)
        } else if self.loading {
            Some(SkipReason::Busy)
        } else if !self.has_more {
            Some(SkipReason::Exhausted)
        } else if self.loaded.contains(&page) {
            Some(SkipReason::AlreadyLoaded)
        } else {
            None
        }
    }

    fn apply(&mut self, page: u32, batch: Page<T>) -> usize {
        let before = self.items.len();
        for item in batch.items {
            if self.seen.insert(item.id()) {
                self.items.push(item);
            }
        }
        self.has_more = batch.has_more;
        self.loaded.insert(page);
        self.error = None;
        self.items.len() - before
    }
}

/// Page cursor plus the accumulated, de-duplicated items of one list view.
///
/// Clones share state, so a clone moved into an event handler drives the
/// same list as the one used for rendering.
pub struct Pager<T: Identified, S> {
    source: Arc<S>,
    state: Arc<Mutex<PagerState<T>>>,
    page_size: u32,
    error_context: &'static str,
}

impl<T: Identified, S> Clone for Pager<T, S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            page_size: self.page_size,
            error_context: self.error_context,
        }
    }
}

impl<T, S> Pager<T, S>
where
    T: Identified + Clone,
    S: PageSource<T>,
{
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(PagerState::new())),
            page_size: page_size.max(1),
            error_context: "Failed to load items",
        }
    }

    /// Prefix for the user-facing message recorded when a page fails.
    #[must_use]
    pub fn with_error_context(mut self, context: &'static str) -> Self {
        self.error_context = context;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn lock(&self) -> MutexGuard<'_, PagerState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch `page` and append its unseen items.
    ///
    /// Skips without touching the source when a request is already in
    /// flight, the list is exhausted, the page was already applied, or the
    /// pager was disposed. On failure `page` and `items` stay as they were
    /// and `error` holds the user-facing message.
    pub async fn load_page(&self, page: u32) -> LoadOutcome {
        {
            let mut state = self.lock();
            if let Some(reason) = state.skip_reason(page) {
                log::debug!("pager: skip page {page}: {reason:?}");
                return LoadOutcome::Skipped(reason);
            }
            state.loading = true;
        }

        log::debug!("pager: fetch page {page} (size {})", self.page_size);
        let result = self.source.fetch_page(page, self.page_size).await;

        let mut state = self.lock();
        state.loading = false;
        if state.disposed {
            log::debug!("pager: discard page {page} after dispose");
            return LoadOutcome::Discarded;
        }
        match result {
            Ok(batch) => {
                let added = state.apply(page, batch);
                log::debug!("pager: page {page} added {added} items, has_more={}", state.has_more);
                LoadOutcome::Applied { added }
            }
            Err(err) => {
                let message = err.user_message(self.error_context);
                log::warn!("pager: page {page} failed: {err}");
                state.error = Some(message);
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Returns the page to load when the container is scrolled near its end.
    pub fn on_scroll(&self, metrics: ScrollMetrics) -> Option<u32> {
        if !metrics.near_end() {
            return None;
        }
        self.advance_page()
    }

    /// Move the cursor to the next page and return it.
    ///
    /// If the current page was never applied (its load failed), the cursor
    /// stays put and the same page is returned for a retry.
    pub fn advance_page(&self) -> Option<u32> {
        let mut state = self.lock();
        if state.disposed || state.loading || !state.has_more {
            return None;
        }
        if state.loaded.contains(&state.page) {
            state.page += 1;
        }
        Some(state.page)
    }

    /// Append a locally created item unless its identifier is already shown.
    pub fn push_local(&self, item: T) -> bool {
        let mut state = self.lock();
        if !state.seen.insert(item.id()) {
            return false;
        }
        state.items.push(item);
        true
    }

    /// Apply `edit` to the item with `id`. Returns false if it is not shown.
    pub fn update_local(&self, id: &T::Id, edit: impl FnOnce(&mut T)) -> bool {
        let mut state = self.lock();
        match state.items.iter_mut().find(|item| item.id() == *id) {
            Some(item) => {
                edit(item);
                true
            }
            None => false,
        }
    }

    pub fn remove_local(&self, id: &T::Id) -> Option<T> {
        let mut state = self.lock();
        let index = state.items.iter().position(|item| item.id() == *id)?;
        state.seen.remove(id);
        Some(state.items.remove(index))
    }

    pub fn snapshot(&self) -> PagerSnapshot<T> {
        let state = self.lock();
        PagerSnapshot {
            page: state.page,
            items: state.items.clone(),
            loading: state.loading,
            has_more: state.has_more,
            error: state.error.clone(),
        }
    }

    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    pub fn page(&self) -> u32 {
        self.lock().page
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn has_more(&self) -> bool {
        self.lock().has_more
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    /// Stop accepting results. Called when the owning view unmounts.
    pub fn dispose(&self) {
        self.lock().disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }
}
