//! Common types used throughout artic-select
//!
//! This module contains the data model shared by the fetcher, the
//! selection accumulator and the session: records, pages and selections.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU32;

// ============================================================================
// Record
// ============================================================================

/// Identity of a record. Selection membership compares ids only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single artwork row as listed by the remote endpoint.
///
/// Only `id` is required; the listing returns `null` for display fields it
/// has no data for. Fields the endpoint returns beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i64>,
    #[serde(default)]
    pub date_end: Option<i64>,
}

impl Record {
    /// Create a record with only an id and a title
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: RecordId(id),
            title: Some(title.into()),
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }

    /// Title for display, empty when the listing had none
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

// ============================================================================
// Page Size
// ============================================================================

/// Number of records per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PageSize(NonZeroU32);

impl PageSize {
    /// Page size used by the artworks table
    pub const DEFAULT: PageSize = PageSize(match NonZeroU32::new(10) {
        Some(n) => n,
        None => unreachable!(),
    });

    /// Create a page size, rejecting zero
    pub fn new(size: u32) -> Result<Self> {
        NonZeroU32::new(size)
            .map(Self)
            .ok_or_else(|| Error::invalid_value("page_size", "must be at least 1"))
    }

    /// Page size as `u32`
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Page size as `usize`
    pub fn as_usize(self) -> usize {
        self.0.get() as usize
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for PageSize {
    type Error = Error;

    fn try_from(size: u32) -> Result<Self> {
        Self::new(size)
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Pages
// ============================================================================

/// One server-delivered slice of the record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-indexed page number
    pub number: u32,
    /// Page size the page was requested with
    pub size: PageSize,
    /// Records in server order, at most `size` of them
    pub records: Vec<Record>,
}

impl Page {
    /// Zero-based row offset of the first record on this page
    pub fn first_row(&self) -> u64 {
        u64::from(self.number.saturating_sub(1)) * u64::from(self.size.get())
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A page plus the server's claim of the dataset's total size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub page: Page,
    pub total_count: u64,
}

impl PageResult {
    /// Number of pages the server's total implies at this page size
    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.page.size.get()))
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Ordered set of selected records, deduplicated by id.
///
/// Order is insertion order, which for accumulated selections is dataset
/// order (page 1 before page 2, within-page order preserved).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Record>", into = "Vec<Record>")]
pub struct SelectionSet {
    records: Vec<Record>,
    ids: HashSet<RecordId>,
}

impl SelectionSet {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from records, dropping repeated ids
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut set = Self::new();
        set.extend(records);
        set
    }

    /// Number of selected records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if a record with this id is selected
    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    /// Append a record. Returns `false` if its id was already selected.
    pub fn push(&mut self, record: Record) -> bool {
        if !self.ids.insert(record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Add the record if absent, remove it if present.
    /// Returns `true` if the record is selected afterwards.
    pub fn toggle(&mut self, record: Record) -> bool {
        if self.ids.remove(&record.id) {
            self.records.retain(|r| r.id != record.id);
            false
        } else {
            self.push(record)
        }
    }

    /// Selected ids in order
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|r| r.id).collect()
    }

    /// Selected records in order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over selected records in order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl Extend<Record> for SelectionSet {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

impl From<Vec<Record>> for SelectionSet {
    fn from(records: Vec<Record>) -> Self {
        Self::from_records(records)
    }
}

impl From<SelectionSet> for Vec<Record> {
    fn from(set: SelectionSet) -> Self {
        set.records
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
