//! Title → citation pipeline and batch runner.
//!
//! Each title runs through resolve → fetch → parse → backfill → format to
//! completion before the next one starts. The output file is opened once in
//! append mode and receives one line per citation.

use std::path::{Path, PathBuf};

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::backfill::backfill;
use crate::bibtex::parse_record;
use crate::client::CrossrefClient;
use crate::config::Config;
use crate::error::CitationResult;
use crate::fetcher::fetch_record;
use crate::formatters::format_citation;
use crate::models::{CitationRecord, Field, OutputFormat};
use crate::resolver::resolve_doi;

/// Default output file.
pub const DEFAULT_OUTPUT: &str = "ref.bib";

/// What to cite, where to write it, and how.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Paper titles, processed in order.
    pub titles: Vec<String>,

    /// File the citations are appended to.
    pub output_path: PathBuf,

    /// Output format.
    pub format: OutputFormat,
}

impl BatchConfig {
    /// Create a batch configuration.
    #[must_use]
    pub fn new(titles: Vec<String>, output_path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self { titles, output_path: output_path.into(), format }
    }

    /// Read titles from a file, one per line.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read.
    pub async fn read_titles(path: &Path) -> CitationResult<Vec<String>> {
        let text = tokio::fs::read_to_string(path).await?;
        Ok(parse_titles(&text))
    }
}

/// Split a title list into titles, skipping blank lines and `#` comments.
#[must_use]
pub fn parse_titles(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// A resolved citation.
#[derive(Debug, Clone)]
pub struct Citation {
    /// DOI the title resolved to.
    pub doi: String,

    /// Parsed and backfilled record.
    pub record: CitationRecord,

    /// Required fields that could not be found.
    pub unresolved: Vec<Field>,
}

impl Citation {
    /// Render in the given format.
    #[must_use]
    pub fn render(&self, format: OutputFormat) -> String {
        format_citation(&self.record, format)
    }

    /// Check whether every required field was found.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Outcome counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Titles attempted.
    pub processed: usize,

    /// Citations written.
    pub written: usize,

    /// Titles skipped (no DOI, no record).
    pub skipped: usize,

    /// Citations written with required fields still missing.
    pub incomplete: usize,
}

/// Runs titles through the Crossref lookups and formatting.
#[derive(Debug, Clone)]
pub struct CitationPipeline {
    client: CrossrefClient,
    warn_missing_fields: bool,
}

impl CitationPipeline {
    /// Create a pipeline with a new client.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::with_client(CrossrefClient::new(config)?, config.warn_missing_fields))
    }

    /// Create a pipeline around an existing client.
    #[must_use]
    pub fn with_client(client: CrossrefClient, warn_missing_fields: bool) -> Self {
        Self { client, warn_missing_fields }
    }

    /// The underlying API client.
    #[must_use]
    pub fn client(&self) -> &CrossrefClient {
        &self.client
    }

    /// Resolve one title to a citation.
    ///
    /// Returns `Ok(None)` when the title cannot be resolved or its record
    /// cannot be fetched.
    ///
    /// # Errors
    ///
    /// Returns error if the fetched record is not a supported BibTeX entry.
    pub async fn cite(&self, title: &str) -> CitationResult<Option<Citation>> {
        let Some(doi) = resolve_doi(&self.client, title).await else {
            return Ok(None);
        };

        let Some(raw) = fetch_record(&self.client, Some(doi.as_str())).await else {
            return Ok(None);
        };

        let mut record = parse_record(&raw, self.warn_missing_fields)?;
        let unresolved = backfill(&self.client, &doi, &mut record).await;

        Ok(Some(Citation { doi, record, unresolved }))
    }

    /// Cite each title in order, writing one line per citation to `writer`.
    ///
    /// # Errors
    ///
    /// Stops at the first unsupported record or write failure; lines already
    /// written stay written.
    pub async fn run<W>(
        &self,
        titles: &[String],
        format: OutputFormat,
        writer: &mut W,
    ) -> CitationResult<BatchSummary>
    where
        W: AsyncWrite + Unpin,
    {
        let mut summary = BatchSummary::default();

        for title in titles {
            let title = title.trim();
            summary.processed += 1;

            if title.is_empty() {
                tracing::warn!("Skipping empty title");
                summary.skipped += 1;
                continue;
            }

            let citation = match self.cite(title).await {
                Ok(Some(citation)) => citation,
                Ok(None) => {
                    summary.skipped += 1;
                    continue;
                }
                Err(e) if !e.is_fatal() => {
                    tracing::warn!(title, error = %e, "Skipping title");
                    summary.skipped += 1;
                    continue;
                }
                Err(e) => {
                    tracing::error!(title, error = %e, "Stopping batch");
                    return Err(e);
                }
            };

            let line = citation.render(format);
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;

            summary.written += 1;
            if !citation.is_complete() {
                summary.incomplete += 1;
            }

            tracing::info!(doi = %citation.doi, result = %line, "Citation written");
        }

        Ok(summary)
    }

    /// Run a batch, appending to its output file.
    ///
    /// # Errors
    ///
    /// Returns error if the output file cannot be opened or written, or a
    /// fetched record is unsupported.
    pub async fn run_batch(&self, batch: &BatchConfig) -> CitationResult<BatchSummary> {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&batch.output_path)
            .await?;

        let summary = self.run(&batch.titles, batch.format, &mut file).await?;

        tracing::info!(
            output = %batch.output_path.display(),
            processed = summary.processed,
            written = summary.written,
            skipped = summary.skipped,
            incomplete = summary.incomplete,
            "Batch finished"
        );

        Ok(summary)
    }
}
