//! Retry classification for the title search.
//!
//! `reqwest-retry`'s default strategy also retries 408/429 and every 5xx.
//! The search only retries gateway-style server errors and transport failures.

use reqwest_middleware::Error;
use reqwest_retry::{Retryable, RetryableStrategy, default_on_request_failure};

use crate::config::api;

/// Retries responses whose status is in a fixed list, plus transient transport errors.
///
/// The strategy sees responses, not requests. It is only attached to the
/// search client, which issues nothing but GET.
#[derive(Debug, Clone, Copy)]
pub struct StatusListStrategy {
    status_codes: &'static [u16],
}

impl StatusListStrategy {
    /// Retry on the given status codes.
    #[must_use]
    pub const fn new(status_codes: &'static [u16]) -> Self {
        Self { status_codes }
    }

    /// Check whether a status code is retried.
    #[must_use]
    pub fn retries_status(&self, status: u16) -> bool {
        self.status_codes.contains(&status)
    }
}

impl Default for StatusListStrategy {
    fn default() -> Self {
        Self::new(api::RETRY_STATUS_CODES)
    }
}

impl RetryableStrategy for StatusListStrategy {
    fn handle(&self, res: &Result<reqwest::Response, Error>) -> Option<Retryable> {
        match res {
            Ok(response) => {
                self.retries_status(response.status().as_u16()).then_some(Retryable::Transient)
            }
            Err(error) => default_on_request_failure(error),
        }
    }
}
