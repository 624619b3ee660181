//! Work data model matching the Crossref REST API schema.

use chrono::{DateTime, Datelike};
use serde::{Deserialize, Serialize};

/// Search endpoint response (`GET /works`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Response envelope.
    #[serde(default)]
    pub message: SearchMessage,
}

/// Items of a search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMessage {
    /// Candidate works, in server order.
    #[serde(default)]
    pub items: Vec<WorkItem>,
}

/// A search candidate restricted to `DOI,title,subtitle`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkItem {
    /// Digital Object Identifier.
    #[serde(rename = "DOI")]
    pub doi: String,

    /// Title (Crossref returns a list).
    #[serde(default)]
    pub title: Vec<String>,

    /// Subtitle (absent for most works).
    #[serde(default)]
    pub subtitle: Vec<String>,
}

impl WorkItem {
    /// Title as displayed: `title` plus `" " + subtitle` when a subtitle is present.
    ///
    /// Returns `None` when the work has no title.
    #[must_use]
    pub fn display_title(&self) -> Option<String> {
        let title = self.title.first()?;
        match self.subtitle.first() {
            Some(subtitle) => Some(format!("{} {}", title, subtitle.trim())),
            None => Some(title.clone()),
        }
    }
}

/// Detail endpoint response (`GET /works/{doi}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkResponse {
    /// The work itself.
    #[serde(default)]
    pub message: Work,
}

/// Work metadata used for backfilling missing citation fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Work {
    /// Title (list, first entry is the main title).
    #[serde(default)]
    pub title: Vec<String>,

    /// Contributors in byline order.
    #[serde(default)]
    pub author: Vec<Contributor>,

    /// Date the record was created at Crossref.
    #[serde(default)]
    pub created: Option<DateStamp>,

    /// Publisher name.
    #[serde(default)]
    pub publisher: Option<String>,

    /// Conference event, for proceedings papers.
    #[serde(default)]
    pub event: Option<Event>,

    /// Page range.
    #[serde(default)]
    pub page: Option<String>,
}

impl Work {
    /// First title, if any.
    #[must_use]
    pub fn main_title(&self) -> Option<&str> {
        self.title.first().map(String::as_str)
    }

    /// Authors in BibTeX order: `Family, Given and Family, Given`.
    #[must_use]
    pub fn bibtex_authors(&self) -> String {
        self.author
            .iter()
            .filter_map(Contributor::bibtex_name)
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// Creation year, if the record carries a creation date.
    #[must_use]
    pub fn created_year(&self) -> Option<i32> {
        self.created.as_ref()?.year()
    }

    /// Location of the conference event.
    #[must_use]
    pub fn event_location(&self) -> Option<&str> {
        self.event.as_ref()?.location.as_deref()
    }
}

/// A contributor (author) entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contributor {
    /// Given names.
    #[serde(default)]
    pub given: Option<String>,

    /// Family name.
    #[serde(default)]
    pub family: Option<String>,

    /// Organisation name, used for corporate authors.
    #[serde(default)]
    pub name: Option<String>,
}

impl Contributor {
    fn bibtex_name(&self) -> Option<String> {
        match (self.family.as_deref(), self.given.as_deref()) {
            (Some(family), Some(given)) => Some(format!("{}, {}", family.trim(), given.trim())),
            (Some(family), None) => Some(family.trim().to_string()),
            (None, _) => self.name.as_ref().map(|n| n.trim().to_string()),
        }
    }
}

/// Crossref date stamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateStamp {
    /// RFC 3339 timestamp, e.g. `2020-05-04T20:53:47Z`.
    #[serde(rename = "date-time", default)]
    pub date_time: Option<String>,

    /// `[[year, month, day]]`, partial dates allowed.
    #[serde(rename = "date-parts", default)]
    pub date_parts: Vec<Vec<Option<i32>>>,
}

impl DateStamp {
    /// Year from the timestamp, falling back to `date-parts`.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.date_time
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
            .map(|dt| dt.year())
            .or_else(|| self.date_parts.first()?.first().copied().flatten())
    }
}

/// Conference event metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    /// Event name.
    #[serde(default)]
    pub name: Option<String>,

    /// Event location (city, country).
    #[serde(default)]
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_title_with_subtitle() {
        let item: WorkItem = serde_json::from_value(json!({
            "DOI": "10.1145/3243734.3243768",
            "title": ["Deep Fingerprinting"],
            "subtitle": ["  Undermining Website Fingerprinting Defenses with Deep Learning "]
        }))
        .unwrap();

        assert_eq!(
            item.display_title().as_deref(),
            Some("Deep Fingerprinting Undermining Website Fingerprinting Defenses with Deep Learning")
        );
    }

    #[test]
    fn test_display_title_missing() {
        let item: WorkItem = serde_json::from_value(json!({"DOI": "10.1/x"})).unwrap();
        assert!(item.display_title().is_none());
    }

    #[test]
    fn test_work_accessors() {
        let work: WorkResponse = serde_json::from_value(json!({
            "status": "ok",
            "message": {
                "title": ["Attention is All you Need"],
                "author": [
                    {"given": "Ashish", "family": "Vaswani", "sequence": "first"},
                    {"given": "Noam", "family": "Shazeer", "sequence": "additional"},
                    {"name": "Google Brain"}
                ],
                "created": {"date-parts": [[2017, 12, 4]], "date-time": "2017-12-04T10:11:12Z"},
                "publisher": "Curran Associates",
                "event": {"name": "NIPS 2017", "location": "Long Beach, CA, USA"},
                "page": "5998-6008"
            }
        }))
        .unwrap();

        let work = work.message;
        assert_eq!(work.main_title(), Some("Attention is All you Need"));
        assert_eq!(work.bibtex_authors(), "Vaswani, Ashish and Shazeer, Noam and Google Brain");
        assert_eq!(work.created_year(), Some(2017));
        assert_eq!(work.event_location(), Some("Long Beach, CA, USA"));
    }

    #[test]
    fn test_year_falls_back_to_date_parts() {
        let stamp = DateStamp { date_time: None, date_parts: vec![vec![Some(2020), Some(5)]] };
        assert_eq!(stamp.year(), Some(2020));

        let stamp = DateStamp { date_time: Some("garbage".to_string()), date_parts: vec![] };
        assert_eq!(stamp.year(), None);
    }
}
