//! Title → DOI resolution.
//!
//! Candidates are compared by exact equality after removing italics markup
//! and colons and ignoring case. There is no fuzzy scoring: the first exact
//! match in server order wins.

use crate::client::CrossrefClient;
use crate::models::WorkItem;

/// Substrings removed from titles before comparison.
const STRIPPED: &[&str] = &["<i>", "</i>", ":"];

/// Remove italics markup and colons from a title.
///
/// Repeats until nothing changes, so removals that expose a new `<i>` are
/// handled too and the result is a fixed point.
#[must_use]
pub fn strip_markup(title: &str) -> String {
    let mut current = title.to_string();
    loop {
        let next = STRIPPED.iter().fold(current.clone(), |acc, pattern| acc.replace(pattern, ""));
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Normalized comparison key for a title.
fn comparison_key(title: &str) -> String {
    strip_markup(title).to_lowercase()
}

/// Check whether a candidate title matches the query title.
#[must_use]
pub fn titles_match(query: &str, candidate: &str) -> bool {
    comparison_key(query) == comparison_key(candidate)
}

/// Pick the first candidate whose display title matches `title`.
#[must_use]
pub fn find_match<'a>(title: &str, items: &'a [WorkItem]) -> Option<&'a WorkItem> {
    let query = comparison_key(title);
    items.iter().find(|item| {
        item.display_title().is_some_and(|candidate| comparison_key(&candidate) == query)
    })
}

/// Resolve a title to a DOI.
///
/// Search failures and unmatched titles are logged and yield `None`.
pub async fn resolve_doi(client: &CrossrefClient, title: &str) -> Option<String> {
    tracing::info!(title, "Querying DOI for title");

    let items = match client.search_works(title).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(title, error = %e, "Failed to query DOI for title");
            return None;
        }
    };

    match find_match(title, &items) {
        Some(item) => {
            tracing::info!(doi = %item.doi, "Matched DOI found for title");
            Some(item.doi.clone())
        }
        None => {
            tracing::warn!(title, candidates = items.len(), "No matched DOI found for title");
            None
        }
    }
}
