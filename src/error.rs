//! Error types for artic-select
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for artic-select
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Request Errors
    // ============================================================================
    /// A page could not be obtained. Wraps the underlying HTTP or decode
    /// failure together with the page that was requested.
    #[error("Failed to fetch page {page}: {source}")]
    Transport {
        page: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Wrap an error as a transport failure for the given page.
    ///
    /// Already-wrapped errors are returned unchanged so the page context
    /// always names the innermost failing request.
    pub fn transport(page: u32, source: Error) -> Self {
        match source {
            err @ Self::Transport { .. } => err,
            other => Self::Transport {
                page,
                source: Box::new(other),
            },
        }
    }

    /// Check if this error means a page could not be obtained
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// The page whose fetch failed, if this is a transport error
    pub fn failed_page(&self) -> Option<u32> {
        match self {
            Error::Transport { page, .. } => Some(*page),
            _ => None,
        }
    }

    /// Check if the underlying failure came from the wire (network or status)
    /// rather than from a malformed body
    pub fn is_network(&self) -> bool {
        match self {
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. } => true,
            Error::Transport { source, .. } => source.is_network(),
            _ => false,
        }
    }
}

/// Result type alias for artic-select
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
