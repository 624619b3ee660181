//! Pattern-based reader for Crossref's BibTeX output.
//!
//! Crossref emits every record on one logical line with brace-delimited
//! values (`title={...}, author={...}`). This reader relies on that shape:
//! values are never nested and never contain `}`. Each field is read with an
//! independent regex search; the first occurrence wins. Anything outside that
//! shape (nested braces, quoted values, `@string` macros) is not supported.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CitationError, CitationResult};
use crate::models::{Category, CitationRecord, Field};

/// Leading `@type{key,` of a record.
static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@([A-Za-z]+)\s*\{\s*([^,\s]+)\s*,").expect("valid entry regex pattern")
});

/// Leading `@type` token only.
static ENTRY_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z]+)").expect("valid entry type regex pattern"));

/// One `key={value}` pattern per field, keyed by its wire name.
static FIELD_RES: LazyLock<HashMap<Field, Regex>> =
    LazyLock::new(|| Field::ALL.iter().map(|f| (*f, field_regex(f.bibtex_key()))).collect());

/// Build the `key={value}` pattern for a wire key.
fn field_regex(key: &str) -> Regex {
    let pattern = format!(r"\b{}\s*=\s*\{{([^}}]+)\}}", regex::escape(key));
    Regex::new(&pattern).expect("escaped field key forms a valid regex pattern")
}

/// First captured value of `re` in `record`, trimmed; empty counts as absent.
fn capture_value(re: &Regex, record: &str) -> Option<String> {
    re.captures(record)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Collapse line breaks to spaces and trim.
#[must_use]
pub fn normalize(record: &str) -> String {
    record.replace(['\n', '\r'], " ").trim().to_string()
}

/// Find the first `key={value}` in a record and return the trimmed value.
///
/// The key must start at a word boundary, so `title` never matches inside `booktitle`.
/// Empty values are treated as absent.
#[must_use]
pub fn extract_field(record: &str, key: &str) -> Option<String> {
    capture_value(&field_regex(key), record)
}

/// Read a known field using its cached pattern.
#[must_use]
pub fn field_value(record: &str, field: Field) -> Option<String> {
    match FIELD_RES.get(&field) {
        Some(re) => capture_value(re, record),
        None => extract_field(record, field.bibtex_key()),
    }
}

/// Determine the category and citation key of a normalized record.
///
/// # Errors
///
/// Returns `UnsupportedEntryType` for anything other than `@article` or
/// `@inproceedings`, and `MalformedRecord` if the citation key is missing.
pub fn detect_entry(record: &str) -> CitationResult<(Category, String)> {
    let entry_type = ENTRY_TYPE_RE
        .captures(record)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let category = entry_type
        .as_deref()
        .and_then(Category::from_entry_type)
        .ok_or_else(|| CitationError::unsupported_entry_type(record))?;

    let key = ENTRY_RE
        .captures(record)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            CitationError::malformed(format!("no citation key after @{}", category.entry_type()))
        })?;

    Ok((category, key))
}

/// Parse a raw BibTeX record into a citation record.
///
/// Category-specific fields are only read for their category. A field that is
/// not found keeps an empty slot in extraction order, so backfilled values
/// land there. Missing fields are not an error; they are logged when
/// `warn_missing` is set.
///
/// # Errors
///
/// Returns an error if the entry type is unsupported or the key is missing.
pub fn parse_record(raw: &str, warn_missing: bool) -> CitationResult<CitationRecord> {
    let record = normalize(raw);
    tracing::debug!(head = %record.chars().take(20).collect::<String>(), "Parsing BibTeX record");

    let (category, key) = detect_entry(&record)?;
    let mut citation = CitationRecord::new(key, category);

    for field in category.extracted_fields() {
        match field_value(&record, *field) {
            Some(value) => citation.fields.insert(*field, value),
            None => {
                if warn_missing {
                    tracing::warn!(key = %citation.key, %field, "No matched field found");
                }
                citation.fields.reserve(*field);
            }
        }
    }

    let missing = citation.missing_fields();
    if !missing.is_empty() {
        tracing::warn!(key = %citation.key, ?missing, "Some required fields are missing");
    }

    Ok(citation)
}
