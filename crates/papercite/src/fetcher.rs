//! BibTeX record retrieval.

use crate::client::CrossrefClient;

/// Fetch the BibTeX record for a DOI.
///
/// A missing DOI short-circuits without a request. Any failure is logged and yields `None`.
pub async fn fetch_record(client: &CrossrefClient, doi: Option<&str>) -> Option<String> {
    let doi = doi.filter(|d| !d.is_empty())?;

    match client.fetch_bibtex(doi).await {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(doi, error = %e, "Failed to fetch BibTeX record");
            None
        }
    }
}
