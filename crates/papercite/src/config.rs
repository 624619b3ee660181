//! Configuration for the Crossref client and citation pipeline.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the Crossref REST API.
    pub const BASE_URL: &str = "https://api.crossref.org";

    /// Contact address announced to Crossref (polite pool).
    pub const DEFAULT_MAILTO: &str = "papercite@example.org";

    /// Client name used in the User-Agent header.
    pub const CLIENT_NAME: &str = "PaperCite";

    /// Accept header for the BibTeX transform endpoint.
    pub const BIBTEX_MIME: &str = "application/x-bibtex";

    /// Fields requested from the search endpoint.
    pub const SEARCH_SELECT: &str = "DOI,title,subtitle";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum retries for the title search.
    pub const MAX_RETRIES: u32 = 3;

    /// First retry delay (backoff factor 0.1s).
    pub const RETRY_MIN_BACKOFF: Duration = Duration::from_millis(100);

    /// Upper bound on a single retry delay.
    pub const RETRY_MAX_BACKOFF: Duration = Duration::from_secs(10);

    /// Status codes that trigger a retry of the title search.
    pub const RETRY_STATUS_CODES: &[u16] = &[500, 502, 503, 504];
}

/// Client and pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for the Crossref API (overridable for mock servers).
    pub api_url: String,

    /// Contact e-mail sent in the User-Agent and `mailto` parameter.
    pub mailto: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Maximum retries for the title search.
    pub max_retries: u32,

    /// Lower retry backoff bound.
    pub retry_min_backoff: Duration,

    /// Upper retry backoff bound.
    pub retry_max_backoff: Duration,

    /// Log a warning for every field missing from a fetched record.
    pub warn_missing_fields: bool,
}

impl Config {
    /// Create a new configuration with an optional contact address.
    #[must_use]
    pub fn new(mailto: Option<String>) -> Self {
        Self {
            api_url: api::BASE_URL.to_string(),
            mailto: mailto.unwrap_or_else(|| api::DEFAULT_MAILTO.to_string()),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            retry_min_backoff: api::RETRY_MIN_BACKOFF,
            retry_max_backoff: api::RETRY_MAX_BACKOFF,
            warn_missing_fields: true,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_url: base_url.trim_end_matches('/').to_string(),
            mailto: "test@example.org".to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: api::MAX_RETRIES,
            retry_min_backoff: Duration::from_millis(1), // Keep retry tests fast
            retry_max_backoff: Duration::from_millis(5),
            warn_missing_fields: true,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `PAPERCITE_MAILTO` and `CROSSREF_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns error if the API URL is not a valid absolute URL.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new(std::env::var("PAPERCITE_MAILTO").ok());
        if let Ok(url) = std::env::var("CROSSREF_API_URL") {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that the API URL parses as an http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns error describing the invalid URL.
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = url::Url::parse(&self.api_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("unsupported API URL scheme: {}", url.scheme());
        }
        Ok(())
    }

    /// User-Agent header value identifying this client.
    #[must_use]
    pub fn user_agent(&self) -> String {
        format!("{} ({})", api::CLIENT_NAME, self.mailto)
    }

    /// Search endpoint.
    #[must_use]
    pub fn works_url(&self) -> String {
        format!("{}/works", self.api_url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
