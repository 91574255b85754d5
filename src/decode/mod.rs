//! Response decoder module
//!
//! # Overview
//!
//! Turns a raw listing body into a typed [`PageResult`](crate::types::PageResult).
//! The body is validated at this boundary: anything that does not match the
//! expected shape is rejected here instead of flowing into the data model.

mod page;

pub use page::{extract_path, PageDecoder};
