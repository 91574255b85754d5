//! Page fetching
//!
//! # Overview
//!
//! A [`PageFetcher`] performs exactly one remote read per call and returns
//! one page of records plus the server's total count. Two implementations:
//!
//! - [`HttpPageFetcher`] - reads the configured listing endpoint
//! - [`MemoryPageFetcher`] - slices an in-memory dataset, with call
//!   recording, failure injection and per-page delays

mod http;
mod memory;
mod types;

pub use http::HttpPageFetcher;
pub use memory::MemoryPageFetcher;
pub use types::{check_page_number, PageFetcher};
