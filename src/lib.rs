// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # artic-select
//!
//! Browse a remotely paginated record listing and select the first N
//! records, even when N spans several pages.
//!
//! ## Features
//!
//! - **Page Fetching**: One remote read per page, validated into typed records
//! - **Multi-Page Selection**: "Select first N" fetches pages 1, 2, ... until
//!   N records are collected or the listing runs out
//! - **Stale-Result Guard**: Page views and selections carry request tokens;
//!   only the latest request of each kind updates visible state
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use artic_select::{HttpPageFetcher, SelectConfig, SelectionAccumulator, Result};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = SelectConfig::default();
//!     let fetcher = Arc::new(HttpPageFetcher::from_config(&config)?);
//!
//!     let accumulator = SelectionAccumulator::new(fetcher, config.page_size);
//!     let selection = accumulator.accumulate(15).await?;
//!     for record in &selection {
//!         println!("{} {}", record.id, record.display_title());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Session                           │
//! │  navigate(page) → PageResult   select_first(n) → Set     │
//! │  request tokens per operation kind                       │
//! └──────────────────────────────────────────────────────────┘
//!                │                              │
//!                │                 ┌────────────┴────────────┐
//!                │                 │   SelectionAccumulator  │
//!                │                 └────────────┬────────────┘
//! ┌──────────────┴──────────────────────────────┴────────────┐
//! │                      PageFetcher                         │
//! ├─────────────┬──────────────┬─────────────────────────────┤
//! │  HTTP       │  Decode      │  Memory (tests, demos)      │
//! │  Rate Limit │  Validation  │                             │
//! └─────────────┴──────────────┴─────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Records, pages and selections
pub mod types;

/// Listing configuration
pub mod config;

/// Single-attempt HTTP client with rate limiting
pub mod http;

/// Listing response decoding
pub mod decode;

/// Page fetchers
pub mod fetch;

/// Multi-page selection
pub mod selection;

/// Page view and selection state
pub mod session;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::SelectConfig;
pub use fetch::{HttpPageFetcher, MemoryPageFetcher, PageFetcher};
pub use selection::{AccumulateStats, SelectionAccumulator};
pub use session::{Applied, OperationKind, Session, SessionView};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
