//! PaperCite
//!
//! Turns paper titles into reference-list entries using the Crossref REST API.
//! Each title is resolved to a DOI, the DOI's BibTeX record is fetched and
//! parsed, required fields missing from the record are backfilled from the
//! work metadata, and the result is rendered either as BibTeX or as a
//! numbered reference in the CJC style.
//!
//! # Example
//!
//! ```no_run
//! use papercite::{BatchConfig, CitationPipeline, Config, OutputFormat};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let pipeline = CitationPipeline::new(&config)?;
//!
//!     let batch = BatchConfig::new(
//!         vec!["Attention is all you need".to_string()],
//!         "ref.bib",
//!         OutputFormat::Cjc,
//!     );
//!     pipeline.run_batch(&batch).await?;
//!     Ok(())
//! }
//! ```

pub mod backfill;
pub mod bibtex;
pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod formatters;
pub mod models;
pub mod pipeline;
pub mod resolver;

pub use client::CrossrefClient;
pub use config::Config;
pub use error::{CitationError, ClientError};
pub use models::{Category, CitationRecord, Field, FieldMap, OutputFormat};
pub use pipeline::{BatchConfig, BatchSummary, Citation, CitationPipeline};
