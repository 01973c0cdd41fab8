//! HTTP client implementation.

use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::{HttpClientConfig, HttpClientError, Response, Result, ftp};

/// Client that checks whether URLs can be fetched.
///
/// Every call makes exactly one request. Nothing is retried. `http` and
/// `https` URLs are requested with the configured method; `ftp` URLs are
/// opened with an anonymous login.
///
/// [`probe`](HttpClient::probe) blocks the calling thread and is safe to
/// call from inside a tokio runtime: the request then runs on a separate
/// thread with its own runtime.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: Arc<HttpClientConfig>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            // each blocking probe drives its own runtime, pooled
            // connections would outlive it
            .pool_max_idle_per_host(0);

        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if config.follow_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::limited(config.max_redirects));
        } else {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }

        let inner = builder
            .build()
            .map_err(|e| HttpClientError::Build(e.to_string()))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(HttpClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Request `url` once, blocking until it answers.
    ///
    /// HTTP URLs succeed only on a 2xx response. FTP URLs succeed when the
    /// file exists, or the directory can be entered.
    pub fn probe(&self, url: &str) -> Result<Response> {
        let parsed = Url::parse(url)?;
        match parsed.scheme() {
            "http" | "https" => {}
            "ftp" => return ftp::probe(&parsed, &self.config),
            other => return Err(HttpClientError::UnsupportedScheme(other.to_string())),
        }

        if tokio::runtime::Handle::try_current().is_err() {
            return self.probe_on_own_runtime(parsed);
        }

        // a runtime worker cannot block on a nested runtime
        std::thread::scope(|scope| {
            scope
                .spawn(|| self.probe_on_own_runtime(parsed))
                .join()
                .unwrap_or_else(|_| {
                    Err(HttpClientError::Connection("probe thread panicked".into()))
                })
        })
    }

    /// Request `url` once from async code.
    pub async fn probe_async(&self, url: &str) -> Result<Response> {
        let parsed = Url::parse(url)?;
        if parsed.scheme() == "ftp" {
            let config = Arc::clone(&self.config);
            return tokio::task::spawn_blocking(move || ftp::probe(&parsed, &config))
                .await
                .map_err(|e| HttpClientError::Connection(e.to_string()))?;
        }
        self.probe_http(parsed).await
    }

    fn probe_on_own_runtime(&self, url: Url) -> Result<Response> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| HttpClientError::Build(e.to_string()))?;
        runtime.block_on(self.probe_http(url))
    }

    async fn probe_http(&self, url: Url) -> Result<Response> {
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(HttpClientError::UnsupportedScheme(other.to_string())),
        }

        let method = self.config.method.as_http();
        debug!(%url, %method, "probing url");

        let response = self
            .inner
            .request(method, url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let response = Response::from_reqwest(&response);

        if !response.is_success() {
            let status = response.status();
            debug!(url = %response.url(), status = status.as_u16(), "probe failed");
            return Err(HttpClientError::Response {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response)
    }

    fn classify(&self, error: reqwest::Error) -> HttpClientError {
        if error.is_timeout() {
            HttpClientError::Timeout(self.config.timeout)
        } else if error.is_connect() {
            HttpClientError::Connection(error.to_string())
        } else {
            HttpClientError::Http(error)
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish()
    }
}
