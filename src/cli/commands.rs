//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paged artwork listing with multi-page selection
#[derive(Parser, Debug)]
#[command(name = "artic-select")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the listing endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Override the page size
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one page of the listing
    Page {
        /// Page number (1-indexed)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },

    /// Select the first N records, fetching as many pages as needed
    Select {
        /// Number of records to select
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        count: u64,
    },

    /// Navigate to a page and select records concurrently, then print the view
    Browse {
        /// Page to show
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Number of records to select
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        select: Option<u64>,
    },

    /// Show the effective configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Indented JSON output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_select() {
        let cli = Cli::try_parse_from(["artic-select", "--page-size", "20", "select", "15"]).unwrap();
        assert_eq!(cli.page_size, Some(20));
        assert!(matches!(cli.command, Commands::Select { count: 15 }));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_select_count_must_be_positive() {
        assert!(Cli::try_parse_from(["artic-select", "select", "0"]).is_err());
        assert!(Cli::try_parse_from(["artic-select", "select", "-4"]).is_err());
        assert!(Cli::try_parse_from(["artic-select", "select", "ten"]).is_err());
    }

    #[test]
    fn test_page_must_be_positive() {
        assert!(Cli::try_parse_from(["artic-select", "page", "0"]).is_err());
        let cli = Cli::try_parse_from(["artic-select", "page", "3", "-f", "pretty"]).unwrap();
        assert!(matches!(cli.command, Commands::Page { page: 3 }));
        assert_eq!(cli.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_parse_browse_defaults() {
        let cli = Cli::try_parse_from(["artic-select", "browse"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Browse {
                page: 1,
                select: None
            }
        ));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(Cli::try_parse_from(["artic-select", "--page-size", "0", "config"]).is_err());
    }
}
