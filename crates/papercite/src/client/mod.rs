//! Crossref REST API client.
//!
//! Provides async HTTP access to three endpoints:
//! - `GET /works` title search, wrapped in retry middleware
//! - `GET /works/{doi}/transform` BibTeX record
//! - `GET /works/{doi}` work metadata used for backfilling

mod middleware;

pub use middleware::StatusListStrategy;

use reqwest::{Client, StatusCode, header};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{SearchResponse, Work, WorkItem, WorkResponse};

/// Percent-encode the `/` separators of a DOI for use as a path segment.
#[must_use]
pub fn encode_doi(doi: &str) -> String {
    doi.replace('/', "%2F")
}

/// Crossref API client.
#[derive(Clone)]
pub struct CrossrefClient {
    /// Client with retry middleware, used for the title search.
    search_client: ClientWithMiddleware,

    /// Client without retry, used for record and detail lookups.
    client: ClientWithMiddleware,

    /// Works endpoint, the root of every request path.
    works_url: String,

    /// Contact address for the `mailto` parameter.
    mailto: String,
}

impl CrossrefClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(config.retry_min_backoff, config.retry_max_backoff)
            .build_with_max_retries(config.max_retries);

        let search_client = ClientBuilder::new(http.clone())
            .with(RetryTransientMiddleware::new_with_policy_and_strategy(
                retry_policy,
                StatusListStrategy::default(),
            ))
            .build();

        let client = ClientBuilder::new(http).build();

        Ok(Self {
            search_client,
            client,
            works_url: config.works_url(),
            mailto: config.mailto.clone(),
        })
    }

    /// Search works by title, returning candidates in server order.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure (after retries) or a non-200 status.
    pub async fn search_works(&self, title: &str) -> ClientResult<Vec<WorkItem>> {
        tracing::debug!(url = %self.works_url, title, "Searching works by title");

        let request = self
            .search_client
            .get(&self.works_url)
            .query(&[("select", api::SEARCH_SELECT), ("query.title", title)]);

        let body = self.send(request).await?.text().await?;
        let result: SearchResponse = serde_json::from_str(&body)?;
        Ok(result.message.items)
    }

    /// Fetch the BibTeX record for a DOI.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or a non-200 status.
    pub async fn fetch_bibtex(&self, doi: &str) -> ClientResult<String> {
        let url = format!("{}/{}/transform", self.works_url, encode_doi(doi));
        tracing::debug!(%url, "Fetching BibTeX record");

        let request = self
            .client
            .get(&url)
            .query(&[("mailto", self.mailto.as_str())])
            .header(header::ACCEPT, api::BIBTEX_MIME);

        Ok(self.send(request).await?.text().await?)
    }

    /// Get full work metadata for a DOI.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, a non-200 status, or an undecodable body.
    pub async fn get_work(&self, doi: &str) -> ClientResult<Work> {
        let url = format!("{}/{}", self.works_url, encode_doi(doi));
        tracing::debug!(%url, "Fetching work metadata");

        let body = self.send(self.client.get(&url)).await?.text().await?;
        let result: WorkResponse = serde_json::from_str(&body)?;
        Ok(result.message)
    }

    /// Send a request and require a 200 response.
    async fn send(&self, request: RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::OK {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(ClientError::unexpected_status(status.as_u16(), text))
    }
}

impl std::fmt::Debug for CrossrefClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossrefClient").field("works_url", &self.works_url).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_doi() {
        assert_eq!(encode_doi("10.1109/tifs.2020.2991876"), "10.1109%2Ftifs.2020.2991876");
        assert_eq!(encode_doi("10.5555/a/b"), "10.5555%2Fa%2Fb");
        assert_eq!(encode_doi("nodoi"), "nodoi");
    }

    #[test]
    fn test_client_debug_shows_works_url() {
        let client = CrossrefClient::new(&Config::default()).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("https://api.crossref.org/works"));
    }
}
