use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::channel::oneshot;
use futures::executor::block_on;

use super::*;

#[derive(Clone, Debug, PartialEq)]
struct Item {
    id: i64,
    label: String,
}

impl Identified for Item {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

fn item(id: i64) -> Item {
    Item { id, label: format!("item {id}") }
}

fn batch(ids: &[i64], has_more: bool) -> Page<Item> {
    Page { items: ids.iter().copied().map(item).collect(), has_more }
}

fn ids(pager: &Pager<Item, impl PageSource<Item>>) -> Vec<i64> {
    pager.items().iter().map(|i| i.id).collect()
}

fn near_end() -> ScrollMetrics {
    ScrollMetrics { scroll_top: 590.0, scroll_height: 1000.0, client_height: 400.0 }
}

/// Replays queued results and records the pages it was asked for.
#[derive(Default)]
struct ScriptedSource {
    calls: Mutex<Vec<(u32, u32)>>,
    results: Mutex<VecDeque<Result<Page<Item>, ApiError>>>,
}

impl ScriptedSource {
    fn new(results: Vec<Result<Page<Item>, ApiError>>) -> Self {
        Self { calls: Mutex::default(), results: Mutex::new(results.into()) }
    }

    fn calls(&self) -> Vec<(u32, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PageSource<Item> for ScriptedSource {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Page<Item>, ApiError> {
        self.calls.lock().unwrap().push((page, page_size));
        self.results.lock().unwrap().pop_front().unwrap_or_else(|| Ok(batch(&[], false)))
    }
}

/// Holds the first request open until the test releases it.
struct GatedSource {
    calls: AtomicUsize,
    gate: Mutex<Option<oneshot::Receiver<Page<Item>>>>,
}

impl PageSource<Item> for GatedSource {
    async fn fetch_page(&self, _page: u32, _page_size: u32) -> Result<Page<Item>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().take();
        match gate {
            Some(rx) => rx.await.map_err(|_| ApiError::Transport("gate dropped".to_owned())),
            None => Ok(batch(&[], false)),
        }
    }
}

fn gated() -> (Pager<Item, GatedSource>, oneshot::Sender<Page<Item>>) {
    let (tx, rx) = oneshot::channel();
    let source = GatedSource { calls: AtomicUsize::new(0), gate: Mutex::new(Some(rx)) };
    (Pager::new(source, DEFAULT_PAGE_SIZE), tx)
}

// =============================================================
// Initial state and scroll metrics
// =============================================================

#[test]
fn new_pager_starts_on_page_one() {
    let pager: Pager<Item, _> = Pager::new(ScriptedSource::default(), 10);
    let snapshot = pager.snapshot();
    assert_eq!(snapshot, PagerSnapshot::default());
    assert_eq!(snapshot.page, 1);
    assert!(snapshot.has_more);
    assert!(!snapshot.loading);
}

#[test]
fn snapshot_default_matches_fresh_state() {
    let snapshot: PagerSnapshot<Item> = PagerSnapshot::default();
    assert_eq!((snapshot.page, snapshot.has_more, snapshot.error), (1, true, None));
}

#[test]
fn scroll_metrics_remaining_distance() {
    assert!((near_end().remaining() - 10.0).abs() < f64::EPSILON);
    assert!(near_end().near_end());
    let far = ScrollMetrics { scroll_top: 100.0, scroll_height: 1000.0, client_height: 400.0 };
    assert!(!far.near_end());
}

#[test]
fn zero_page_size_is_clamped() {
    let pager: Pager<Item, _> = Pager::new(ScriptedSource::default(), 0);
    assert_eq!(pager.page_size(), 1);
}

// =============================================================
// Loading pages
// =============================================================

#[test]
fn load_page_passes_page_and_size_to_source() {
    let pager = Pager::new(ScriptedSource::new(vec![Ok(batch(&[1, 2], true))]), 10);
    let outcome = block_on(pager.load_page(1));
    assert_eq!(outcome, LoadOutcome::Applied { added: 2 });
    assert_eq!(pager.source().calls(), vec![(1, 10)]);
    assert_eq!(ids(&pager), vec![1, 2]);
}

#[test]
fn overlapping_pages_merge_without_duplicates() {
    let pager = Pager::new(
        ScriptedSource::new(vec![Ok(batch(&[1, 2], true)), Ok(batch(&[2, 3], false))]),
        2,
    );
    block_on(pager.load_page(1));
    let next = pager.on_scroll(near_end()).unwrap();
    assert_eq!(next, 2);
    assert_eq!(block_on(pager.load_page(next)), LoadOutcome::Applied { added: 1 });
    assert_eq!(ids(&pager), vec![1, 2, 3]);
    assert!(!pager.has_more());
}

#[test]
fn duplicate_ids_within_one_batch_are_dropped() {
    let pager = Pager::new(ScriptedSource::new(vec![Ok(batch(&[4, 4, 5], true))]), 10);
    block_on(pager.load_page(1));
    assert_eq!(ids(&pager), vec![4, 5]);
}

#[test]
fn exhausted_pager_never_calls_source_again() {
    let pager = Pager::new(ScriptedSource::new(vec![Ok(batch(&[1], false))]), 10);
    block_on(pager.load_page(1));
    assert_eq!(block_on(pager.load_page(2)), LoadOutcome::Skipped(SkipReason::Exhausted));
    assert_eq!(pager.on_scroll(near_end()), None);
    assert_eq!(pager.advance_page(), None);
    assert_eq!(pager.source().calls().len(), 1);
}

#[test]
fn already_applied_page_is_skipped() {
    let pager = Pager::new(ScriptedSource::new(vec![Ok(batch(&[1], true))]), 10);
    block_on(pager.load_page(1));
    assert_eq!(block_on(pager.load_page(1)), LoadOutcome::Skipped(SkipReason::AlreadyLoaded));
    assert_eq!(pager.source().calls().len(), 1);
}

#[test]
fn scrolls_during_outstanding_request_issue_one_request() {
    block_on(async {
        let (pager, release) = gated();
        let mut first = Box::pin(pager.load_page(1));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(pager.is_loading());

        assert_eq!(pager.on_scroll(near_end()), None);
        assert_eq!(pager.on_scroll(near_end()), None);
        assert_eq!(pager.load_page(1).await, LoadOutcome::Skipped(SkipReason::Busy));

        release.send(batch(&[1, 2], true)).unwrap();
        assert_eq!(first.await, LoadOutcome::Applied { added: 2 });
        assert_eq!(pager.source().calls.load(Ordering::SeqCst), 1);
        assert!(!pager.is_loading());
    });
}

#[test]
fn snapshot_reports_loading_while_in_flight() {
    block_on(async {
        let (pager, release) = gated();
        let mut first = Box::pin(pager.load_page(1));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(pager.snapshot().loading);
        release.send(batch(&[], false)).unwrap();
        first.await;
        assert!(!pager.snapshot().loading);
    });
}

// =============================================================
// Failures and retry
// =============================================================

#[test]
fn failed_page_keeps_state_and_records_message() {
    let pager = Pager::new(
        ScriptedSource::new(vec![
            Ok(batch(&[1, 2], true)),
            Err(ApiError::from_status(500, r#"{"message":"database unavailable"}"#)),
        ]),
        2,
    )
    .with_error_context("Failed to load books");
    block_on(pager.load_page(1));
    let next = pager.on_scroll(near_end()).unwrap();
    let outcome = block_on(pager.load_page(next));

    assert!(matches!(outcome, LoadOutcome::Failed(_)));
    assert_eq!(ids(&pager), vec![1, 2]);
    assert_eq!(pager.page(), 2);
    assert!(!pager.is_loading());
    assert_eq!(pager.error().as_deref(), Some("Failed to load books: database unavailable"));
}

#[test]
fn transport_failure_uses_network_error_text() {
    let pager = Pager::new(ScriptedSource::new(vec![Err(ApiError::Transport("offline".to_owned()))]), 10)
        .with_error_context("Failed to fetch readings");
    block_on(pager.load_page(1));
    assert_eq!(pager.error().as_deref(), Some("Failed to fetch readings: Network error"));
}

#[test]
fn next_scroll_retries_the_failed_page() {
    let pager = Pager::new(
        ScriptedSource::new(vec![
            Ok(batch(&[1], true)),
            Err(ApiError::Timeout { after_ms: 10_000 }),
            Ok(batch(&[2], false)),
        ]),
        1,
    );
    block_on(pager.load_page(1));
    let failed = pager.on_scroll(near_end()).unwrap();
    block_on(pager.load_page(failed));

    let retry = pager.on_scroll(near_end()).unwrap();
    assert_eq!(retry, failed);
    assert_eq!(block_on(pager.load_page(retry)), LoadOutcome::Applied { added: 1 });
    assert_eq!(pager.error(), None);
    assert_eq!(pager.source().calls(), vec![(1, 1), (2, 1), (2, 1)]);
}

#[test]
fn clear_error_resets_message() {
    let pager = Pager::new(ScriptedSource::new(vec![Err(ApiError::Transport("x".to_owned()))]), 10);
    block_on(pager.load_page(1));
    assert!(pager.error().is_some());
    pager.clear_error();
    assert_eq!(pager.error(), None);
}

// =============================================================
// Dispose
// =============================================================

#[test]
fn disposed_pager_discards_late_result() {
    block_on(async {
        let (pager, release) = gated();
        let mut first = Box::pin(pager.load_page(1));
        assert!(futures::poll!(first.as_mut()).is_pending());
        pager.dispose();
        release.send(batch(&[1], true)).unwrap();
        assert_eq!(first.await, LoadOutcome::Discarded);
        assert!(pager.items().is_empty());
    });
}

#[test]
fn disposed_pager_skips_new_loads() {
    let pager: Pager<Item, _> = Pager::new(ScriptedSource::default(), 10);
    pager.dispose();
    assert!(pager.is_disposed());
    assert_eq!(block_on(pager.load_page(1)), LoadOutcome::Skipped(SkipReason::Disposed));
    assert_eq!(pager.advance_page(), None);
    assert!(pager.source().calls().is_empty());
}

// =============================================================
// Closure sources
// =============================================================

#[test]
fn closure_source_is_accepted() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let pager: Pager<Item, _> = Pager::new(
        move |page: u32, _size: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            let result = batch(&[i64::from(page)], page < 2);
            async move { Ok::<_, ApiError>(result) }
        },
        5,
    );
    block_on(pager.load_page(1));
    let next = pager.advance_page().unwrap();
    block_on(pager.load_page(next));
    assert_eq!(ids(&pager), vec![1, 2]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// =============================================================
// Local edits
// =============================================================

#[test]
fn push_local_rejects_known_ids() {
    let pager = Pager::new(ScriptedSource::new(vec![Ok(batch(&[1], true))]), 10);
    block_on(pager.load_page(1));
    assert!(!pager.push_local(item(1)));
    assert!(pager.push_local(item(9)));
    assert_eq!(ids(&pager), vec![1, 9]);
}

#[test]
fn pushed_item_is_not_duplicated_by_later_page() {
    let pager = Pager::new(
        ScriptedSource::new(vec![Ok(batch(&[1], true)), Ok(batch(&[2, 9], false))]),
        10,
    );
    block_on(pager.load_page(1));
    pager.push_local(item(9));
    let next = pager.advance_page().unwrap();
    block_on(pager.load_page(next));
    assert_eq!(ids(&pager), vec![1, 9, 2]);
}

#[test]
fn update_local_edits_matching_item() {
    let pager = Pager::new(ScriptedSource::new(vec![Ok(batch(&[1, 2], true))]), 10);
    block_on(pager.load_page(1));
    assert!(pager.update_local(&2, |i| i.label = "renamed".to_owned()));
    assert!(!pager.update_local(&7, |i| i.label = "missing".to_owned()));
    assert_eq!(pager.items()[1].label, "renamed");
}

#[test]
fn remove_local_forgets_identifier() {
    let pager = Pager::new(ScriptedSource::new(vec![Ok(batch(&[1, 2], true))]), 10);
    block_on(pager.load_page(1));
    assert_eq!(pager.remove_local(&1).map(|i| i.id), Some(1));
    assert_eq!(pager.remove_local(&1), None);
    assert!(pager.push_local(item(1)));
    assert_eq!(ids(&pager), vec![2, 1]);
}

#[test]
fn clones_share_state() {
    let pager = Pager::new(ScriptedSource::new(vec![Ok(batch(&[1], true))]), 10);
    let handle = pager.clone();
    block_on(handle.load_page(1));
    assert_eq!(ids(&pager), vec![1]);
}
