//! Data models for Crossref API entities and parsed citations.
//!
//! API models use `#[serde(default)]` for optional fields so partial
//! Crossref responses still deserialize.

mod enums;
mod record;
mod work;

pub use enums::OutputFormat;
pub use record::{Category, CitationRecord, Field, FieldMap};
pub use work::{
    Contributor, DateStamp, Event, SearchMessage, SearchResponse, Work, WorkItem, WorkResponse,
};
