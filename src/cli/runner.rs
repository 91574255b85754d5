//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::SelectConfig;
use crate::error::{Error, Result};
use crate::fetch::{HttpPageFetcher, PageFetcher};
use crate::selection::SelectionAccumulator;
use crate::session::Session;
use crate::types::PageSize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Page { page } => self.page(*page).await,
            Commands::Select { count } => self.select(*count).await,
            Commands::Browse { page, select } => self.browse(*page, *select).await,
            Commands::Config => self.show_config(),
        }
    }

    /// Load the config file, if any, and apply command-line overrides
    pub fn load_config(&self) -> Result<SelectConfig> {
        let mut config = match &self.cli.config {
            Some(path) => SelectConfig::from_file(path)?,
            None => SelectConfig::default(),
        };

        if let Some(endpoint) = &self.cli.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(size) = self.cli.page_size {
            config.page_size = PageSize::new(size)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn build_fetcher(config: &SelectConfig) -> Result<Arc<HttpPageFetcher>> {
        Ok(Arc::new(HttpPageFetcher::from_config(config)?))
    }

    async fn page(&self, page: u32) -> Result<()> {
        let config = self.load_config()?;
        let fetcher = Self::build_fetcher(&config)?;

        let result = fetcher.fetch(page, config.page_size).await?;

        self.output_message(&json!({
            "type": "PAGE",
            "page": result.page.number,
            "page_size": result.page.size,
            "first_row": result.page.first_row(),
            "total_count": result.total_count,
            "total_pages": result.total_pages(),
            "records": result.page.records,
        }));
        Ok(())
    }

    async fn select(&self, count: u64) -> Result<()> {
        let config = self.load_config()?;
        let fetcher = Self::build_fetcher(&config)?;
        let target = Self::target(count)?;

        let start = Instant::now();
        let accumulator = SelectionAccumulator::new(fetcher, config.page_size);
        let (selection, stats) = accumulator.accumulate_with_stats(target).await?;
        info!(
            "Selection finished in {:.2}s",
            start.elapsed().as_secs_f64()
        );

        self.output_message(&json!({
            "type": "SELECTION",
            "requested": count,
            "selected": selection.len(),
            "pages_fetched": stats.pages_fetched,
            "total_count": stats.total_count,
            "records": selection,
        }));
        Ok(())
    }

    async fn browse(&self, page: u32, select: Option<u64>) -> Result<()> {
        let config = self.load_config()?;
        let fetcher = Self::build_fetcher(&config)?;
        let session = Session::new(fetcher, config.page_size);

        let target = select.map(Self::target).transpose()?;
        let (page_outcome, selection_outcome) = futures::join!(session.navigate(page), async {
            match target {
                Some(target) => session.select_first(target).await.map(Some),
                None => Ok(None),
            }
        });

        let view = session.snapshot().await;
        session.close().await;

        self.output_message(&json!({
            "type": "VIEW",
            "view": view,
        }));

        page_outcome?;
        selection_outcome?;
        Ok(())
    }

    fn show_config(&self) -> Result<()> {
        let config = self.load_config()?;
        print!("{}", config.to_yaml()?);
        Ok(())
    }

    fn target(count: u64) -> Result<i64> {
        i64::try_from(count)
            .map_err(|_| Error::invalid_request(format!("cannot select {count} records")))
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
