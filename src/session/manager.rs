//! Session implementation

use super::types::{Applied, OperationKind, RequestToken, SessionView};
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::selection::SelectionAccumulator;
use crate::types::{PageResult, PageSize, Record, SelectionSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Request bookkeeping for one operation kind
#[derive(Debug, Default)]
struct Lifecycle {
    latest: u64,
    loading: bool,
    last_error: Option<String>,
}

impl Lifecycle {
    fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.loading = true;
        self.latest
    }

    fn supersede(&mut self) {
        self.latest += 1;
        self.loading = false;
    }

    fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }

    fn succeed(&mut self) {
        self.loading = false;
        self.last_error = None;
    }

    fn fail(&mut self, message: String) {
        self.loading = false;
        self.last_error = Some(message);
    }
}

#[derive(Debug, Default)]
struct SessionState {
    closed: bool,
    page_view: Lifecycle,
    selection_op: Lifecycle,
    page: Option<PageResult>,
    selection: SelectionSet,
}

impl SessionState {
    fn lifecycle(&self, kind: OperationKind) -> &Lifecycle {
        match kind {
            OperationKind::PageView => &self.page_view,
            OperationKind::Selection => &self.selection_op,
        }
    }

    fn lifecycle_mut(&mut self, kind: OperationKind) -> &mut Lifecycle {
        match kind {
            OperationKind::PageView => &mut self.page_view,
            OperationKind::Selection => &mut self.selection_op,
        }
    }

    fn accepts(&self, token: RequestToken, kind: OperationKind) -> bool {
        !self.closed && token.kind() == kind && self.lifecycle(kind).is_current(token.seq())
    }
}

/// Listing session shared between the presentation surface and in-flight
/// operations.
///
/// Cloning is cheap; clones share the same state and fetcher.
pub struct Session<F: PageFetcher + ?Sized> {
    fetcher: Arc<F>,
    page_size: PageSize,
    state: Arc<RwLock<SessionState>>,
}

impl<F: PageFetcher + ?Sized> Clone for Session<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            page_size: self.page_size,
            state: Arc::clone(&self.state),
        }
    }
}

impl<F: PageFetcher + ?Sized> Session<F> {
    /// Create a session with no page loaded and nothing selected
    pub fn new(fetcher: Arc<F>, page_size: PageSize) -> Self {
        Self {
            fetcher,
            page_size,
            state: Arc::new(RwLock::new(SessionState::default())),
        }
    }

    /// Page size used for every fetch in this session
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Load the first page
    pub async fn open(&self) -> Result<Applied> {
        self.navigate(1).await
    }

    /// Tear the session down. Results arriving afterwards are discarded.
    pub async fn close(&self) {
        let mut state = self.state.write().await;
        state.closed = true;
        state.page_view.loading = false;
        state.selection_op.loading = false;
        debug!("Session closed");
    }

    // ========================================================================
    // Operation lifecycle
    // ========================================================================

    /// Issue a new request token for `kind` and mark that kind as loading.
    /// Any earlier token of the same kind becomes stale.
    ///
    /// Returns `None` once the session is closed.
    pub async fn begin(&self, kind: OperationKind) -> Option<RequestToken> {
        let mut state = self.state.write().await;
        if state.closed {
            debug!("Session closed, not starting {} request", kind);
            return None;
        }
        let seq = state.lifecycle_mut(kind).begin();
        debug!("Begin {} request #{}", kind, seq);
        Some(RequestToken::new(kind, seq))
    }

    /// Apply the outcome of a page fetch started with `token`.
    ///
    /// A stale outcome, successful or not, is dropped and reported as
    /// [`Applied::Stale`], as is one carrying a token of another kind.
    /// A current failure is recorded, leaves the
    /// previously visible page untouched, and is returned.
    pub async fn complete_page(
        &self,
        token: RequestToken,
        outcome: Result<PageResult>,
    ) -> Result<Applied> {
        let mut state = self.state.write().await;

        if !state.accepts(token, OperationKind::PageView) {
            debug!("Discarding stale page view result #{}", token.seq());
            return Ok(Applied::Stale);
        }

        match outcome {
            Ok(result) => {
                debug!(
                    "Showing page {} ({} records, total {})",
                    result.page.number,
                    result.page.len(),
                    result.total_count
                );
                state.page = Some(result);
                state.page_view.succeed();
                Ok(Applied::Applied)
            }
            Err(e) => {
                warn!("Page request #{} failed: {}", token.seq(), e);
                state.page_view.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Apply the outcome of a selection run started with `token`.
    ///
    /// A successful current outcome replaces the selection wholesale.
    pub async fn complete_selection(
        &self,
        token: RequestToken,
        outcome: Result<SelectionSet>,
    ) -> Result<Applied> {
        let mut state = self.state.write().await;

        if !state.accepts(token, OperationKind::Selection) {
            debug!("Discarding stale selection result #{}", token.seq());
            return Ok(Applied::Stale);
        }

        match outcome {
            Ok(selection) => {
                info!("Selection replaced with {} records", selection.len());
                state.selection = selection;
                state.selection_op.succeed();
                Ok(Applied::Applied)
            }
            Err(e) => {
                warn!("Selection request #{} failed: {}", token.seq(), e);
                state.selection_op.fail(e.to_string());
                Err(e)
            }
        }
    }

    // ========================================================================
    // User intents
    // ========================================================================

    /// Navigate to `page` (1-indexed). Does nothing on a closed session.
    pub async fn navigate(&self, page: u32) -> Result<Applied> {
        let Some(token) = self.begin(OperationKind::PageView).await else {
            return Ok(Applied::Stale);
        };
        let outcome = self.fetcher.fetch(page, self.page_size).await;
        self.complete_page(token, outcome).await
    }

    /// Select the first `target` records of the listing, replacing the
    /// current selection. A non-positive target changes nothing, and a
    /// closed session fetches nothing.
    pub async fn select_first(&self, target: i64) -> Result<Applied> {
        if target <= 0 {
            debug!("Ignoring selection of {} records", target);
            return Ok(Applied::Ignored);
        }

        let Some(token) = self.begin(OperationKind::Selection).await else {
            return Ok(Applied::Stale);
        };
        let accumulator = SelectionAccumulator::new(Arc::clone(&self.fetcher), self.page_size);
        let outcome = accumulator.accumulate(target).await;
        self.complete_selection(token, outcome).await
    }

    /// Toggle one record in or out of the selection, as a checkbox click
    /// would. Supersedes any selection run still in flight.
    /// Returns `true` if the record is selected afterwards.
    pub async fn toggle_selection(&self, record: Record) -> bool {
        let mut state = self.state.write().await;
        if state.closed {
            return false;
        }
        state.selection_op.supersede();
        state.selection.toggle(record)
    }

    /// Replace the selection with an edited one. Supersedes any selection
    /// run still in flight.
    pub async fn replace_selection(&self, selection: SelectionSet) {
        let mut state = self.state.write().await;
        if state.closed {
            return;
        }
        state.selection_op.supersede();
        state.selection = selection;
    }

    /// Clear the selection
    pub async fn clear_selection(&self) {
        self.replace_selection(SelectionSet::new()).await;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Check whether an operation of `kind` is in flight
    pub async fn is_loading(&self, kind: OperationKind) -> bool {
        let state = self.state.read().await;
        state.lifecycle(kind).loading
    }

    /// Snapshot of everything needed to render
    pub async fn snapshot(&self) -> SessionView {
        let state = self.state.read().await;
        SessionView {
            page: state.page.clone(),
            total_count: state.page.as_ref().map_or(0, |p| p.total_count),
            first_row: state.page.as_ref().map_or(0, |p| p.page.first_row()),
            selection: state.selection.clone(),
            page_loading: state.page_view.loading,
            selection_loading: state.selection_op.loading,
            page_error: state.page_view.last_error.clone(),
            selection_error: state.selection_op.last_error.clone(),
            closed: state.closed,
        }
    }
}

impl<F: PageFetcher + ?Sized> std::fmt::Debug for Session<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
