//! CLI module
//!
//! Command-line surface over the listing and selection core.
//!
//! # Commands
//!
//! - `page` - Fetch and print one page of the listing
//! - `select` - Select the first N records across pages
//! - `browse` - Navigate and select concurrently in one session
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
