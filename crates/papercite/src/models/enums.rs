//! Enumeration types for pipeline parameters.

use serde::{Deserialize, Serialize};

/// Output format for rendered citations.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Numbered reference in the CJC journal style.
    #[default]
    Cjc,
    /// BibTeX record.
    Bibtex,
}

impl OutputFormat {
    /// Check if this is the BibTeX record format.
    #[must_use]
    pub const fn is_bibtex(self) -> bool {
        matches!(self, Self::Bibtex)
    }
}
