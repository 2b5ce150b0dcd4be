//! HTTP client used by the HTTP based fetchers.
//!
//! Downloads are attempted exactly once, so the middleware stack only traces
//! requests. Proxy and default headers are optional.
//!
//! # Examples
//!
//! ```rust
//! use reqwest::header::{HeaderMap, ACCEPT};
//! use tranche::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(ACCEPT, "*/*".parse()?);
//!
//! let client = create_http_client(HttpClientConfig::default().with_headers(headers))?;
//! # Ok(())
//! # }
//! ```

use reqwest::header::HeaderMap;
use reqwest::Proxy;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

/// `User-Agent` sent unless the caller overrides it.
pub const DEFAULT_USER_AGENT: &str = concat!("tranche/", env!("CARGO_PKG_VERSION"));

/// Options of the underlying reqwest client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Route every request through this proxy.
    pub proxy: Option<Proxy>,
    /// Headers added to every request.
    pub headers: Option<HeaderMap>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            headers: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpClientConfig {
    pub fn with_proxy(mut self, proxy: Proxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Builds a client whose requests show up as `tracing` spans.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let HttpClientConfig {
        proxy,
        headers,
        user_agent,
    } = config;

    let mut builder = reqwest::Client::builder().user_agent(user_agent);
    if let Some(proxy) = proxy {
        builder = builder.proxy(proxy);
    }
    if let Some(headers) = headers {
        builder = builder.default_headers(headers);
    }

    Ok(ClientBuilder::new(builder.build()?)
        .with(TracingMiddleware::default())
        .build())
}
