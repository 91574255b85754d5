//! Configuration for the artwork listing
//!
//! Describes where pages come from and how they are shaped. Loaded from
//! YAML or JSON; every field has a default that targets the public
//! Art Institute of Chicago artworks endpoint.

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::PageSize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration for a listing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectConfig {
    /// Listing endpoint (absolute URL)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Query parameter carrying the 1-indexed page number
    #[serde(default = "default_page_param")]
    pub page_param: String,

    /// Query parameter carrying the page size
    #[serde(default = "default_limit_param")]
    pub limit_param: String,

    /// Dot path to the records array in the response body
    #[serde(default = "default_records_path")]
    pub records_path: String,

    /// Dot path to the total record count in the response body
    #[serde(default = "default_total_path")]
    pub total_path: String,

    /// Records per page, fixed for the session
    #[serde(default)]
    pub page_size: PageSize,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_param: default_page_param(),
            limit_param: default_limit_param(),
            records_path: default_records_path(),
            total_path: default_total_path(),
            page_size: PageSize::default(),
            http: HttpSettings::default(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.artic.edu/api/v1/artworks".to_string()
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_limit_param() -> String {
    "limit".to_string()
}

fn default_records_path() -> String {
    "data".to_string()
}

fn default_total_path() -> String {
    "pagination.total".to_string()
}

impl SelectConfig {
    /// Load a config file. `.json` files are parsed as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the config describes a usable endpoint
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        for (field, value) in [
            ("page_param", &self.page_param),
            ("limit_param", &self.limit_param),
            ("records_path", &self.records_path),
            ("total_path", &self.total_path),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_value(field, "must not be empty"));
            }
        }

        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value("http.timeout_seconds", "must be at least 1"));
        }

        Ok(())
    }

    /// Serialize the effective config as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Client-side request rate limit. Disabled when absent.
    #[serde(default)]
    pub rate_limit: Option<RateLimitSettings>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            headers: HashMap::new(),
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("artic-select/{}", env!("CARGO_PKG_VERSION"))
}

/// Client-side rate limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitSettings {
    pub requests_per_second: u32,
    #[serde(default)]
    pub burst: Option<u32>,
}

impl HttpSettings {
    /// Build the HTTP client config these settings describe
    pub fn to_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .user_agent(&self.user_agent);

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        if let Some(limit) = self.rate_limit {
            builder = builder.rate_limit(RateLimiterConfig::new(
                limit.requests_per_second,
                limit.burst.unwrap_or(limit.requests_per_second),
            ));
        }

        builder.build()
    }
}
