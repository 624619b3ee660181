//! Citation output formatting.

mod bibtex;
mod cjc;

pub use bibtex::format_bibtex;
pub use cjc::{format_authors, format_cjc, sentence_case};

use crate::models::{CitationRecord, OutputFormat};

/// Render a citation record in the requested format.
#[must_use]
pub fn format_citation(record: &CitationRecord, format: OutputFormat) -> String {
    match format {
        OutputFormat::Bibtex => format_bibtex(record),
        OutputFormat::Cjc => format_cjc(record),
    }
}
