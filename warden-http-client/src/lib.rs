//! # Warden HTTP Client
//!
//! A small client used to check that a URL can be fetched. `http`, `https`
//! and `ftp` URLs are supported.
//!
//! ## Features
//!
//! - **Single attempt**: one request per probe, no retries
//! - **Timeouts**: whole-request and connect timeouts
//! - **Redirects**: optionally followed, up to a limit
//! - **Status check**: any non-2xx response is an error
//! - **Any context**: the blocking [`HttpClient::probe`] also works from
//!   inside a tokio runtime; async code can await [`HttpClient::probe_async`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use warden_http_client::{HttpClient, HttpClientConfig, ProbeMethod};
//! use std::time::Duration;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HttpClientConfig::builder()
//!         .timeout(Duration::from_secs(5))
//!         .method(ProbeMethod::Head)
//!         .build();
//!
//!     let client = HttpClient::new(config)?;
//!     let response = client.probe("http://www.google.com")?;
//!
//!     println!("Status: {}", response.status());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod ftp;
mod response;

pub use client::HttpClient;
pub use config::{HttpClientConfig, HttpClientConfigBuilder, ProbeMethod};
pub use error::{HttpClientError, Result};
pub use response::Response;

// Re-export common types
pub use http::{HeaderMap, Method, StatusCode};
pub use url::Url;

/// Prelude for common imports.
///
/// ```
/// use warden_http_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::HttpClient;
    pub use crate::config::{HttpClientConfig, HttpClientConfigBuilder, ProbeMethod};
    pub use crate::error::{HttpClientError, Result};
    pub use crate::response::Response;
    pub use http::StatusCode;
}
