//! Session state for the listing surface
//!
//! # Overview
//!
//! A session owns the two pieces of visible state: the current page view
//! and the current selection. Each is driven by its own operation
//! lifecycle with a monotonically increasing request token. A completion
//! is applied only if its token is still the latest for its kind, so a
//! slow response can never overwrite the result of a newer request, and
//! one kind's completion never clears the other kind's loading flag.

mod manager;
mod types;

pub use manager::Session;
pub use types::{Applied, OperationKind, RequestToken, SessionView};

#[cfg(test)]
mod tests;
