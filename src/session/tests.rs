//! Tests for the session module

use super::*;
use crate::error::Error;
use crate::fetch::MemoryPageFetcher;
use crate::types::{Page, PageResult, PageSize, Record, RecordId, SelectionSet};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn size(n: u32) -> PageSize {
    PageSize::new(n).unwrap()
}

fn session(fetcher: MemoryPageFetcher) -> (Session<MemoryPageFetcher>, Arc<MemoryPageFetcher>) {
    let fetcher = Arc::new(fetcher);
    (Session::new(Arc::clone(&fetcher), size(10)), fetcher)
}

fn page_result(number: u32, ids: &[u64]) -> PageResult {
    PageResult {
        page: Page {
            number,
            size: size(10),
            records: ids.iter().map(|id| Record::new(*id, format!("#{id}"))).collect(),
        },
        total_count: 100,
    }
}

fn visible_page(view: &SessionView) -> Option<u32> {
    view.page.as_ref().map(|p| p.page.number)
}

// ============================================================================
// Page navigation
// ============================================================================

#[tokio::test]
async fn test_open_loads_first_page() {
    let (session, fetcher) = session(MemoryPageFetcher::with_len(23));

    assert_eq!(session.open().await.unwrap(), Applied::Applied);

    let view = session.snapshot().await;
    assert_eq!(visible_page(&view), Some(1));
    assert_eq!(view.total_count, 23);
    assert_eq!(view.first_row, 0);
    assert!(!view.page_loading);
    assert_eq!(fetcher.calls(), vec![1]);
}

#[tokio::test]
async fn test_navigate_sets_first_row() {
    let (session, _) = session(MemoryPageFetcher::with_len(23));

    session.navigate(3).await.unwrap();

    let view = session.snapshot().await;
    assert_eq!(view.first_row, 20);
    assert_eq!(view.page.unwrap().page.len(), 3);
}

#[tokio::test]
async fn test_late_response_does_not_overwrite_newer_page() {
    let (session, _) =
        session(MemoryPageFetcher::with_len(50).delaying(3, Duration::from_millis(100)));

    let (slow, fast) = futures::join!(session.navigate(3), session.navigate(1));

    assert_eq!(fast.unwrap(), Applied::Applied);
    assert_eq!(slow.unwrap(), Applied::Stale);
    assert_eq!(visible_page(&session.snapshot().await), Some(1));
}

#[tokio::test]
async fn test_tokens_applied_out_of_order() {
    let (session, _) = session(MemoryPageFetcher::with_len(0));

    let page2 = session.begin(OperationKind::PageView).await.unwrap();
    let page5 = session.begin(OperationKind::PageView).await.unwrap();
    assert!(page5.seq() > page2.seq());

    let applied = session
        .complete_page(page5, Ok(page_result(5, &[41, 42])))
        .await
        .unwrap();
    assert!(applied.is_applied());

    let applied = session
        .complete_page(page2, Ok(page_result(2, &[11, 12])))
        .await
        .unwrap();
    assert!(applied.is_stale());

    assert_eq!(visible_page(&session.snapshot().await), Some(5));
}

#[tokio::test]
async fn test_stale_failure_is_discarded() {
    let (session, _) = session(MemoryPageFetcher::with_len(0));

    let old = session.begin(OperationKind::PageView).await.unwrap();
    let new = session.begin(OperationKind::PageView).await.unwrap();

    let applied = session
        .complete_page(old, Err(Error::transport(2, Error::http_status(500, ""))))
        .await
        .unwrap();
    assert_eq!(applied, Applied::Stale);

    let view = session.snapshot().await;
    assert!(view.page_error.is_none());
    assert!(view.page_loading, "newer request still in flight");

    session.complete_page(new, Ok(page_result(1, &[1]))).await.unwrap();
    assert!(!session.is_loading(OperationKind::PageView).await);
}

#[tokio::test]
async fn test_failed_navigation_keeps_previous_page() {
    let (session, _) = session(MemoryPageFetcher::with_len(40).failing_on(2));

    session.navigate(1).await.unwrap();
    let err = session.navigate(2).await.unwrap_err();
    assert_eq!(err.failed_page(), Some(2));

    let view = session.snapshot().await;
    assert_eq!(visible_page(&view), Some(1));
    assert!(!view.page_loading);
    assert!(view.page_error.as_deref().unwrap().contains("page 2"));

    session.navigate(3).await.unwrap();
    let view = session.snapshot().await;
    assert_eq!(visible_page(&view), Some(3));
    assert!(view.page_error.is_none());
}

// ============================================================================
// Selection
// ============================================================================

#[tokio::test]
async fn test_select_first_replaces_selection_wholesale() {
    let (session, _) = session(MemoryPageFetcher::with_len(23));

    session.select_first(15).await.unwrap();
    assert_eq!(session.snapshot().await.selection.len(), 15);

    session.select_first(3).await.unwrap();
    let view = session.snapshot().await;
    assert_eq!(
        view.selection.ids(),
        vec![RecordId(1), RecordId(2), RecordId(3)]
    );
}

#[tokio::test]
async fn test_select_first_independent_of_visible_page() {
    let (session, _) = session(MemoryPageFetcher::with_len(23));

    session.navigate(3).await.unwrap();
    session.select_first(25).await.unwrap();

    let view = session.snapshot().await;
    assert_eq!(visible_page(&view), Some(3));
    assert_eq!(view.selection.len(), 23);
}

#[tokio::test]
async fn test_non_positive_selection_is_ignored() {
    let (session, fetcher) = session(MemoryPageFetcher::with_len(23));
    session.select_first(5).await.unwrap();

    assert_eq!(session.select_first(0).await.unwrap(), Applied::Ignored);
    assert_eq!(session.select_first(-3).await.unwrap(), Applied::Ignored);

    let view = session.snapshot().await;
    assert_eq!(view.selection.len(), 5);
    assert!(!view.selection_loading);
    assert_eq!(fetcher.fetch_count(), 1);
}

#[tokio::test]
async fn test_failed_selection_keeps_previous_selection() {
    let (session, _) = session(MemoryPageFetcher::with_len(40).failing_on(3));

    session.select_first(4).await.unwrap();
    let err = session.select_first(25).await.unwrap_err();
    assert!(err.is_transport());

    let view = session.snapshot().await;
    assert_eq!(view.selection.len(), 4);
    assert!(!view.selection_loading);
    assert!(view.selection_error.is_some());
}

#[tokio::test]
async fn test_newer_selection_wins_over_slow_one() {
    let (session, _) =
        session(MemoryPageFetcher::with_len(40).delaying(2, Duration::from_millis(100)));

    let (slow, fast) = futures::join!(session.select_first(15), session.select_first(5));

    assert_eq!(fast.unwrap(), Applied::Applied);
    assert_eq!(slow.unwrap(), Applied::Stale);
    assert_eq!(session.snapshot().await.selection.len(), 5);
}

// ============================================================================
// Independent loading flags
// ============================================================================

#[tokio::test]
async fn test_loading_flags_are_per_kind() {
    let (session, _) = session(MemoryPageFetcher::with_len(0));

    let page = session.begin(OperationKind::PageView).await.unwrap();
    let selection = session.begin(OperationKind::Selection).await.unwrap();

    let view = session.snapshot().await;
    assert!(view.page_loading);
    assert!(view.selection_loading);

    session.complete_page(page, Ok(page_result(1, &[1]))).await.unwrap();

    let view = session.snapshot().await;
    assert!(!view.page_loading);
    assert!(view.selection_loading);

    session
        .complete_selection(selection, Ok(SelectionSet::new()))
        .await
        .unwrap();
    assert!(!session.is_loading(OperationKind::Selection).await);
}

#[tokio::test]
async fn test_concurrent_navigation_and_selection() {
    let (session, _) =
        session(MemoryPageFetcher::with_len(23).delaying(1, Duration::from_millis(50)));

    let (page, selection) = futures::join!(session.navigate(2), session.select_first(15));

    assert!(page.unwrap().is_applied());
    assert!(selection.unwrap().is_applied());

    let view = session.snapshot().await;
    assert_eq!(visible_page(&view), Some(2));
    assert_eq!(view.selection.len(), 15);
    assert!(!view.page_loading);
    assert!(!view.selection_loading);
}

// ============================================================================
// Manual edits and teardown
// ============================================================================

#[tokio::test]
async fn test_toggle_selection() {
    let (session, _) = session(MemoryPageFetcher::with_len(23));
    session.select_first(2).await.unwrap();

    assert!(!session.toggle_selection(Record::new(1, "Artwork 1")).await);
    assert!(session.toggle_selection(Record::new(9, "Artwork 9")).await);

    assert_eq!(
        session.snapshot().await.selection.ids(),
        vec![RecordId(2), RecordId(9)]
    );
}

#[tokio::test]
async fn test_manual_edit_supersedes_inflight_selection() {
    let (session, _) = session(MemoryPageFetcher::with_len(0));

    let token = session.begin(OperationKind::Selection).await.unwrap();
    session
        .replace_selection(SelectionSet::from_records(vec![Record::new(7, "seven")]))
        .await;
    assert!(!session.is_loading(OperationKind::Selection).await);

    let applied = session
        .complete_selection(token, Ok(SelectionSet::new()))
        .await
        .unwrap();
    assert_eq!(applied, Applied::Stale);
    assert_eq!(session.snapshot().await.selection.ids(), vec![RecordId(7)]);

    session.clear_selection().await;
    assert!(session.snapshot().await.selection.is_empty());
}

#[tokio::test]
async fn test_results_after_close_are_discarded() {
    let (session, _) = session(MemoryPageFetcher::with_len(0));

    let page = session.begin(OperationKind::PageView).await.unwrap();
    let selection = session.begin(OperationKind::Selection).await.unwrap();
    session.close().await;

    let applied = session.complete_page(page, Ok(page_result(1, &[1]))).await.unwrap();
    assert!(applied.is_stale());
    let applied = session
        .complete_selection(selection, Ok(SelectionSet::from_records(vec![Record::new(1, "a")])))
        .await
        .unwrap();
    assert!(applied.is_stale());

    assert!(!session.toggle_selection(Record::new(2, "b")).await);

    let view = session.snapshot().await;
    assert!(view.closed);
    assert!(view.page.is_none());
    assert!(view.selection.is_empty());
    assert!(!view.page_loading);
    assert!(!view.selection_loading);
}

#[tokio::test]
async fn test_intents_after_close_fetch_nothing() {
    let (session, fetcher) = session(MemoryPageFetcher::with_len(23));
    session.open().await.unwrap();
    session.close().await;

    assert_eq!(session.navigate(2).await.unwrap(), Applied::Stale);
    assert_eq!(session.select_first(5).await.unwrap(), Applied::Stale);
    assert!(session.begin(OperationKind::PageView).await.is_none());

    assert_eq!(fetcher.calls(), vec![1]);
    let view = session.snapshot().await;
    assert!(view.closed);
    assert_eq!(visible_page(&view), Some(1));
    assert!(view.selection.is_empty());
    assert!(!view.page_loading);
    assert!(!view.selection_loading);
}

#[tokio::test]
async fn test_token_of_other_kind_is_rejected() {
    let (session, _) = session(MemoryPageFetcher::with_len(0));

    let page = session.begin(OperationKind::PageView).await.unwrap();
    let selection = session.begin(OperationKind::Selection).await.unwrap();

    let applied = session
        .complete_page(selection, Ok(page_result(4, &[31, 32])))
        .await
        .unwrap();
    assert_eq!(applied, Applied::Stale);

    let applied = session
        .complete_selection(page, Ok(SelectionSet::from_records(vec![Record::new(1, "a")])))
        .await
        .unwrap();
    assert_eq!(applied, Applied::Stale);

    let view = session.snapshot().await;
    assert!(view.page.is_none());
    assert!(view.selection.is_empty());
    assert!(view.page_loading);
    assert!(view.selection_loading);

    session.complete_page(page, Ok(page_result(4, &[31, 32]))).await.unwrap();
    assert_eq!(visible_page(&session.snapshot().await), Some(4));
}

#[tokio::test]
async fn test_clones_share_state() {
    let (session, _) = session(MemoryPageFetcher::with_len(23));
    let other = session.clone();

    let handle = tokio::spawn(async move { other.navigate(2).await });
    handle.await.unwrap().unwrap();

    assert_eq!(visible_page(&session.snapshot().await), Some(2));
    assert_eq!(session.page_size(), size(10));
}
