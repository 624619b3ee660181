//! Error types for the citation pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! Client errors are recoverable (the affected title is skipped); citation errors
//! raised while parsing a record abort the whole batch.

/// Errors from the Crossref HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error (retry layer)
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Any status other than the expected success code
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create an unexpected status error.
    #[must_use]
    pub fn unexpected_status(status: u16, message: impl Into<String>) -> Self {
        Self::UnexpectedStatus { status, message: message.into() }
    }

    /// HTTP status code, when the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from parsing, formatting, and writing citations.
#[derive(thiserror::Error, Debug)]
pub enum CitationError {
    /// The record starts with an entry type other than `@article` / `@inproceedings`.
    #[error("Unsupported entry type: {found}")]
    UnsupportedEntryType {
        /// Leading token of the record
        found: String,
    },

    /// The entry type was recognized but its citation key could not be recovered.
    #[error("Malformed record: {message}")]
    MalformedRecord {
        /// What was wrong
        message: String,
    },

    /// Error from the API client
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Output file or input list I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CitationError {
    /// Create an unsupported entry type error from the start of a record.
    #[must_use]
    pub fn unsupported_entry_type(record: &str) -> Self {
        let found = record
            .split(|c: char| c == '{' || c.is_whitespace())
            .next()
            .unwrap_or_default()
            .to_string();
        Self::UnsupportedEntryType { found }
    }

    /// Create a malformed record error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRecord { message: message.into() }
    }

    /// Returns true if this error must abort the batch.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::UnsupportedEntryType { .. } | Self::MalformedRecord { .. } | Self::Io(_))
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for pipeline operations.
pub type CitationResult<T> = Result<T, CitationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_entry_type_reports_leading_token() {
        let err = CitationError::unsupported_entry_type("@book{Knuth_1968, title={TAOCP}}");
        assert!(matches!(&err, CitationError::UnsupportedEntryType { found } if found == "@book"));
        assert!(err.to_string().contains("@book"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(CitationError::unsupported_entry_type("@misc{x,").is_fatal());
        assert!(CitationError::malformed("no key").is_fatal());

        let client = CitationError::from(ClientError::unexpected_status(404, "Resource not found."));
        assert!(!client.is_fatal());
    }

    #[test]
    fn test_client_error_status() {
        assert_eq!(ClientError::unexpected_status(503, "down").status(), Some(503));
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ClientError::from(parse).status(), None);
    }
}
