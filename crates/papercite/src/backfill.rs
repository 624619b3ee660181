//! Backfill of required fields missing from a fetched record.
//!
//! Only a fixed set of fields can be recovered from the work metadata:
//! title, author, year, publisher, address, and pages. Everything else stays
//! missing and is reported back to the caller.

use crate::client::CrossrefClient;
use crate::models::{CitationRecord, Field, FieldMap, Work};

/// Fields the detail endpoint can supply.
pub const BACKFILLABLE: &[Field] = &[
    Field::Title,
    Field::Author,
    Field::Year,
    Field::Publisher,
    Field::Address,
    Field::Pages,
];

/// Check whether a field can be recovered from work metadata.
#[must_use]
pub fn is_backfillable(field: Field) -> bool {
    BACKFILLABLE.contains(&field)
}

/// Read the requested fields from work metadata.
///
/// Fields that cannot be backfilled, or that the work does not carry, are omitted.
#[must_use]
pub fn values_from_work(work: &Work, fields: &[Field]) -> FieldMap {
    fields
        .iter()
        .copied()
        .filter(|field| is_backfillable(*field))
        .filter_map(|field| {
            let value = match field {
                Field::Title => work.main_title().map(str::to_string),
                Field::Author => Some(work.bibtex_authors()),
                Field::Year => work.created_year().map(|y| y.to_string()),
                Field::Publisher => work.publisher.clone(),
                Field::Address => work.event_location().map(str::to_string),
                Field::Pages => work.page.clone(),
                _ => None,
            };
            value.map(|v| (field, v.trim().to_string())).filter(|(_, v)| !v.is_empty())
        })
        .collect()
}

/// Fill missing required fields of `record` from the detail endpoint.
///
/// Nothing already present is overwritten; a complete record issues no
/// request. A failed lookup is logged and leaves the record unchanged.
/// Returns the required fields still missing afterwards.
pub async fn backfill(client: &CrossrefClient, doi: &str, record: &mut CitationRecord) -> Vec<Field> {
    let missing = record.missing_fields();
    if missing.is_empty() {
        return missing;
    }

    tracing::info!(doi, ?missing, "Re-querying missing fields");

    match client.get_work(doi).await {
        Ok(work) => {
            let filled = record.fields.merge_missing(values_from_work(&work, &missing));
            tracing::debug!(doi, ?filled, "Backfilled fields");
        }
        Err(e) => {
            tracing::warn!(doi, error = %e, "Failed to query work metadata");
        }
    }

    let unresolved = record.missing_fields();
    if !unresolved.is_empty() {
        tracing::warn!(doi, ?unresolved, "Fields still missing after backfill");
    }
    unresolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Contributor, DateStamp, Event};

    fn sample_work() -> Work {
        Work {
            title: vec!["Attention is All you Need".to_string()],
            author: vec![
                Contributor {
                    given: Some("Ashish".to_string()),
                    family: Some("Vaswani".to_string()),
                    name: None,
                },
                Contributor {
                    given: Some("Noam".to_string()),
                    family: Some("Shazeer".to_string()),
                    name: None,
                },
            ],
            created: Some(DateStamp {
                date_time: Some("2017-12-04T10:11:12Z".to_string()),
                date_parts: vec![],
            }),
            publisher: Some("Curran Associates".to_string()),
            event: Some(Event { name: None, location: Some("Long Beach".to_string()) }),
            page: Some("5998-6008".to_string()),
        }
    }

    #[test]
    fn test_backfillable_set() {
        assert!(is_backfillable(Field::Address));
        assert!(!is_backfillable(Field::Doi));
        assert!(!is_backfillable(Field::Volume));
    }

    #[test]
    fn test_values_from_work_only_requested_fields() {
        let values = values_from_work(&sample_work(), &[Field::Pages, Field::Address]);
        assert_eq!(values.get(Field::Pages), Some("5998-6008"));
        assert_eq!(values.get(Field::Address), Some("Long Beach"));
        assert!(!values.contains(Field::Title));
    }

    #[test]
    fn test_values_from_work_formats_authors_and_year() {
        let values = values_from_work(&sample_work(), &[Field::Author, Field::Year]);
        assert_eq!(values.get(Field::Author), Some("Vaswani, Ashish and Shazeer, Noam"));
        assert_eq!(values.get(Field::Year), Some("2017"));
    }

    #[test]
    fn test_values_from_work_skips_unrecoverable() {
        let work = Work::default();
        let values = values_from_work(&work, &[Field::Volume, Field::Journal, Field::Author, Field::Pages]);
        assert!(values.is_empty());
    }

    #[test]
    fn test_values_from_work_ignores_event_name_for_booktitle() {
        let mut work = sample_work();
        work.event = Some(Event { name: Some("NIPS 2017".to_string()), location: None });

        let values = values_from_work(&work, &[Field::Booktitle, Field::Doi, Field::Publisher]);
        let filled: Vec<_> = values.iter().map(|(f, _)| f).collect();
        assert_eq!(filled, vec![Field::Publisher]);
    }

    #[test]
    fn test_merge_fills_only_missing() {
        let mut record = CitationRecord::new("Vaswani_2017", Category::Conference);
        record.fields.insert(Field::Title, "Attention Is All You Need");
        record.fields.insert(Field::Pages, "1-11");

        let missing = record.missing_fields();
        record.fields.merge_missing(values_from_work(&sample_work(), &missing));

        assert_eq!(record.fields.get(Field::Title), Some("Attention Is All You Need"));
        assert_eq!(record.fields.get(Field::Pages), Some("1-11"));
        assert_eq!(record.fields.get(Field::Address), Some("Long Beach"));
        assert_eq!(record.missing_fields(), vec![Field::Booktitle, Field::Doi]);
    }
}
