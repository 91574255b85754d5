//! In-memory page fetcher

use super::types::{check_page_number, PageFetcher};
use crate::error::{Error, Result};
use crate::types::{Page, PageResult, PageSize, Record};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// Serves pages out of a fixed dataset.
///
/// Records every requested page number so callers can assert exactly which
/// reads happened. Pages can be made to fail or to resolve after a delay.
#[derive(Debug, Default)]
pub struct MemoryPageFetcher {
    records: Vec<Record>,
    reported_total: Option<u64>,
    failing_pages: HashSet<u32>,
    delays: HashMap<u32, Duration>,
    calls: Mutex<Vec<u32>>,
}

impl MemoryPageFetcher {
    /// Serve the given records in order
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    /// Serve `len` generated records with ids `1..=len`
    pub fn with_len(len: u64) -> Self {
        Self::new(
            (1..=len)
                .map(|id| Record::new(id, format!("Artwork {id}")))
                .collect(),
        )
    }

    /// Report this total instead of the dataset length
    #[must_use]
    pub fn reporting_total(mut self, total: u64) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Make every fetch of `page` fail with a 503
    #[must_use]
    pub fn failing_on(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    /// Resolve fetches of `page` only after `delay`
    #[must_use]
    pub fn delaying(mut self, page: u32, delay: Duration) -> Self {
        self.delays.insert(page, delay);
        self
    }

    /// Page numbers requested so far, in call order
    pub fn calls(&self) -> Vec<u32> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Number of fetches performed so far
    pub fn fetch_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or_default()
    }

    /// Dataset length
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record_call(&self, page: u32) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(page);
        }
    }

    fn slice(&self, page: u32, page_size: PageSize) -> Vec<Record> {
        let start = (page.saturating_sub(1) as usize).saturating_mul(page_size.as_usize());
        self.records
            .iter()
            .skip(start)
            .take(page_size.as_usize())
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PageFetcher for MemoryPageFetcher {
    async fn fetch(&self, page: u32, page_size: PageSize) -> Result<PageResult> {
        check_page_number(page)?;
        self.record_call(page);

        if let Some(delay) = self.delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }

        if self.failing_pages.contains(&page) {
            return Err(Error::transport(
                page,
                Error::http_status(503, "Service Unavailable"),
            ));
        }

        Ok(PageResult {
            page: Page {
                number: page,
                size: page_size,
                records: self.slice(page, page_size),
            },
            total_count: self
                .reported_total
                .unwrap_or(self.records.len() as u64),
        })
    }
}
