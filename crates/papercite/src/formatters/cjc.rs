//! Numbered reference output in the style of the Chinese Journal of Computers.
//!
//! Journal paper:
//! `Authors. Title. Journal, Year, Volume: Pages`
//!
//! Conference paper:
//! `Authors. Title//Proceedings. Address, Year: Pages`
//!
//! Authors are `Surname Initials`, at most three, followed by `et al.` when
//! more exist. Titles keep only their first letter capitalized.
//!
//! Each reference starts with `\bibitem{key} `, carrying the record's citation
//! key. Older PaperCit output used an empty `\bibitem[]{}` with no space
//! before the authors; lists mixing both need their keys filled in by hand.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Category, CitationRecord, Field};

/// Authors listed before `et al.`.
const MAX_AUTHORS: usize = 3;

/// BibTeX author separator.
static AUTHOR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+and\s+").expect("valid author separator regex pattern"));

/// Render a single `Surname, Given Names` author as `Surname GN`.
fn format_author(author: &str) -> String {
    let mut parts = author.split(',');
    let surname = parts.next().unwrap_or_default().trim();

    let initials: String = parts
        .flat_map(str::split_whitespace)
        .filter_map(|name| name.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() { surname.to_string() } else { format!("{surname} {initials}") }
}

/// Render a BibTeX author list.
///
/// `"Smith, John and Doe, Jane Q"` becomes `"Smith J, Doe JQ."`.
#[must_use]
pub fn format_authors(authors: &str) -> String {
    let names: Vec<&str> =
        AUTHOR_SEPARATOR.split(authors.trim()).map(str::trim).filter(|a| !a.is_empty()).collect();

    let mut output =
        names.iter().take(MAX_AUTHORS).map(|a| format_author(a)).collect::<Vec<_>>().join(", ");

    output.push_str(if names.len() > MAX_AUTHORS { ", et al." } else { "." });
    output
}

/// Lowercase a title and capitalize its first character.
#[must_use]
pub fn sentence_case(title: &str) -> String {
    let lower = title.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format a record as a CJC numbered reference.
///
/// Absent fields render as empty text.
#[must_use]
pub fn format_cjc(record: &CitationRecord) -> String {
    let fields = &record.fields;

    let mut output = format!("\\bibitem{{{}}} ", record.key);
    output.push_str(&format_authors(fields.get_or_empty(Field::Author)));
    output.push_str(&format!(" {}.", sentence_case(fields.get_or_empty(Field::Title))));

    match record.category {
        Category::Journal => output.push_str(&format!(
            " {}, {}, {}: {}",
            fields.get_or_empty(Field::Journal),
            fields.get_or_empty(Field::Year),
            fields.get_or_empty(Field::Volume),
            fields.get_or_empty(Field::Pages),
        )),
        Category::Conference => output.push_str(&format!(
            "//{}. {}, {}: {}",
            fields.get_or_empty(Field::Booktitle),
            fields.get_or_empty(Field::Address),
            fields.get_or_empty(Field::Year),
            fields.get_or_empty(Field::Pages),
        )),
    }

    output
}
