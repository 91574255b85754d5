//! HTTP client module
//!
//! Provides the single-attempt HTTP client used by the page fetcher.
//!
//! # Features
//!
//! - **One Request Per Call**: No retries, no backoff
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Status Classification**: Non-2xx responses become errors carrying the body

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::RateLimiterConfig;
