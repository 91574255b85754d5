//! HTTP-backed page fetcher

use super::types::{check_page_number, PageFetcher};
use crate::config::SelectConfig;
use crate::decode::PageDecoder;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::types::{PageResult, PageSize};
use async_trait::async_trait;
use tracing::debug;

/// Fetches pages with `GET <endpoint>?<page_param>=P&<limit_param>=S`
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: HttpClient,
    endpoint: String,
    page_param: String,
    limit_param: String,
    decoder: PageDecoder,
}

impl HttpPageFetcher {
    /// Create a fetcher with the default query parameter names and
    /// response paths
    pub fn new(client: HttpClient, endpoint: impl Into<String>) -> Self {
        let defaults = SelectConfig::default();
        Self {
            client,
            endpoint: endpoint.into(),
            page_param: defaults.page_param,
            limit_param: defaults.limit_param,
            decoder: PageDecoder::new(defaults.records_path, defaults.total_path),
        }
    }

    /// Build a fetcher, and its HTTP client, from a config
    pub fn from_config(config: &SelectConfig) -> Result<Self> {
        let client = HttpClient::with_config(config.http.to_client_config())?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            page_param: config.page_param.clone(),
            limit_param: config.limit_param.clone(),
            decoder: PageDecoder::new(&config.records_path, &config.total_path),
        })
    }

    /// Listing endpoint this fetcher reads
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_once(&self, page: u32, page_size: PageSize) -> Result<PageResult> {
        let query = [
            (self.page_param.as_str(), page.to_string()),
            (self.limit_param.as_str(), page_size.to_string()),
        ];
        let body = self.client.get_text(&self.endpoint, &query).await?;

        self.decoder.decode(&body, page, page_size)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, page: u32, page_size: PageSize) -> Result<PageResult> {
        check_page_number(page)?;

        let result = self
            .fetch_once(page, page_size)
            .await
            .map_err(|e| Error::transport(page, e))?;

        debug!(
            "Fetched page {} ({} records, total {})",
            page,
            result.page.len(),
            result.total_count
        );
        Ok(result)
    }
}
