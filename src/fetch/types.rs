//! Page fetcher trait

use crate::error::{Error, Result};
use crate::types::{PageResult, PageSize};
use async_trait::async_trait;

/// Reads one page of the remote listing.
///
/// Implementations perform a single read per call, with no caching and no
/// retry. Every failure to obtain the page is reported as
/// [`Error::Transport`] naming the requested page. A returned page never
/// holds more than `page_size` records.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the 1-indexed `page` at the given page size
    async fn fetch(&self, page: u32, page_size: PageSize) -> Result<PageResult>;
}

/// Reject page 0 before any I/O happens
pub fn check_page_number(page: u32) -> Result<()> {
    if page == 0 {
        return Err(Error::invalid_request("page numbers start at 1"));
    }
    Ok(())
}
