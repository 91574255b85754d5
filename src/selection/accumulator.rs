//! Accumulation loop

use crate::error::{Error, Result};
use crate::fetch::PageFetcher;
use crate::types::{PageSize, SelectionSet};
use std::sync::Arc;
use tracing::{debug, info};

/// What an accumulation run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccumulateStats {
    /// Number of page fetches performed
    pub pages_fetched: u32,
    /// Total count reported by the last fetched page
    pub total_count: Option<u64>,
}

/// Collects the first N records of the listing across pages.
///
/// A failed fetch fails the whole run: records collected from earlier pages
/// are discarded and the transport error is returned.
pub struct SelectionAccumulator<F: PageFetcher + ?Sized> {
    fetcher: Arc<F>,
    page_size: PageSize,
}

impl<F: PageFetcher + ?Sized> SelectionAccumulator<F> {
    /// Create an accumulator reading pages of `page_size` from `fetcher`
    pub fn new(fetcher: Arc<F>, page_size: PageSize) -> Self {
        Self { fetcher, page_size }
    }

    /// Page size used for every fetch
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Select the first `target` records in dataset order.
    ///
    /// Pages are read from 1 upward until `target` records are held. A page
    /// shorter than the page size ends the run, as does an empty one.
    /// `target <= 0` selects nothing and performs no fetch.
    pub async fn accumulate(&self, target: i64) -> Result<SelectionSet> {
        self.accumulate_with_stats(target)
            .await
            .map(|(selection, _)| selection)
    }

    /// Like [`accumulate`](Self::accumulate), also reporting how many pages
    /// were read.
    pub async fn accumulate_with_stats(
        &self,
        target: i64,
    ) -> Result<(SelectionSet, AccumulateStats)> {
        let mut stats = AccumulateStats::default();
        if target <= 0 {
            debug!("Selection target {} is not positive, nothing to fetch", target);
            return Ok((SelectionSet::new(), stats));
        }

        let target = target as u64;
        let page_size = self.page_size.as_usize();
        let mut selection = SelectionSet::new();
        let mut page = 1u32;

        info!("Selecting first {} records (page size {})", target, self.page_size);

        loop {
            let result = self.fetcher.fetch(page, self.page_size).await?;
            stats.pages_fetched += 1;
            stats.total_count = Some(result.total_count);

            let fetched = result.page.len();
            let before = selection.len();
            for record in result.page.records {
                if selection.len() as u64 >= target {
                    break;
                }
                // Ids already selected from an earlier page are skipped
                selection.push(record);
            }

            debug!(
                "Page {}: {} records fetched, {} taken, {} selected",
                page,
                fetched,
                selection.len() - before,
                selection.len()
            );

            if selection.len() as u64 >= target {
                break;
            }

            // A short or empty page means the listing has no further records
            if fetched < page_size {
                debug!(
                    "Page {} held {} of {} records, listing exhausted",
                    page, fetched, page_size
                );
                break;
            }

            page = page
                .checked_add(1)
                .ok_or_else(|| Error::invalid_request("page number overflow"))?;
        }

        info!(
            "Selected {} records after {} page fetches",
            selection.len(),
            stats.pages_fetched
        );
        Ok((selection, stats))
    }
}

impl<F: PageFetcher + ?Sized> std::fmt::Debug for SelectionAccumulator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionAccumulator")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
