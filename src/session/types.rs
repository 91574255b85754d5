//! Session types

use crate::types::{PageResult, SelectionSet};
use serde::Serialize;
use std::fmt;

/// The two independent kinds of user-triggered operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Navigating to a page of the listing
    PageView,
    /// Selecting the first N records
    Selection,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::PageView => write!(f, "page view"),
            OperationKind::Selection => write!(f, "selection"),
        }
    }
}

/// Identifies one request of a given kind. Later requests of the same kind
/// carry larger sequence numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    kind: OperationKind,
    seq: u64,
}

impl RequestToken {
    pub(crate) fn new(kind: OperationKind, seq: u64) -> Self {
        Self { kind, seq }
    }

    /// Kind of operation this token was issued for
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Sequence number within its kind
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What happened to a completed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The result became the visible state
    Applied,
    /// A newer request of the same kind was issued, or the session was
    /// closed; the result was discarded
    Stale,
    /// The request was a no-op and nothing was issued
    Ignored,
}

impl Applied {
    /// Check if the result became visible
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Check if the result was discarded as out of date
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Everything the presentation surface needs to render
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionView {
    /// Last successfully fetched page, if any
    pub page: Option<PageResult>,
    /// Total count from the last successful page fetch
    pub total_count: u64,
    /// Zero-based row offset of the visible page
    pub first_row: u64,
    /// Current selection
    pub selection: SelectionSet,
    /// A page fetch is in flight
    pub page_loading: bool,
    /// A selection run is in flight
    pub selection_loading: bool,
    /// Failure of the most recent page request, if it failed
    pub page_error: Option<String>,
    /// Failure of the most recent selection request, if it failed
    pub selection_error: Option<String>,
    /// The session has been torn down
    pub closed: bool,
}
