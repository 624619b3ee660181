//! BibTeX record output.

use crate::models::CitationRecord;

/// Format a record as a BibTeX entry.
///
/// Fields are written in the record's slot order, one per line, tab-indented.
/// Every required field of the category is written, as `field={}` when it has
/// no value; required fields without a slot follow the rest. Optional fields
/// without a value are left out.
#[must_use]
pub fn format_bibtex(record: &CitationRecord) -> String {
    let required = record.category.required_fields();
    let mut output = format!("@{}{{{}", record.category.entry_type(), record.key);
    let mut written = Vec::with_capacity(required.len());

    for (field, value) in record.fields.slots() {
        if value.is_empty() && !required.contains(&field) {
            continue;
        }
        output.push_str(&format!(",\n\t{field}={{{value}}}"));
        written.push(field);
    }

    for field in required.iter().filter(|f| !written.contains(*f)) {
        output.push_str(&format!(",\n\t{field}={{}}"));
    }

    output.push_str("\n}");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Field};

    #[test]
    fn test_format_bibtex_conference() {
        let mut record = CitationRecord::new("Sirinam_2018", Category::Conference);
        record.fields.insert(Field::Title, "Deep Fingerprinting");
        record.fields.insert(Field::Doi, "10.1145/3243734.3243768");
        record.fields.insert(Field::Address, "Toronto, Canada");

        assert_eq!(
            format_bibtex(&record),
            "@inproceedings{Sirinam_2018,\n\ttitle={Deep Fingerprinting},\n\
             \tdoi={10.1145/3243734.3243768},\n\taddress={Toronto, Canada},\n\
             \tauthor={},\n\tyear={},\n\tbooktitle={},\n\tpages={},\n\tpublisher={}\n}"
        );
    }

    #[test]
    fn test_format_bibtex_empty_slots() {
        let mut record = CitationRecord::new("Xu_2020", Category::Journal);
        record.fields.insert(Field::Title, "Few-Shot Detection");
        record.fields.reserve(Field::Pages);
        record.fields.reserve(Field::Address);
        record.fields.insert(Field::Year, "2020");

        let output = format_bibtex(&record);
        assert!(output.starts_with(
            "@article{Xu_2020,\n\ttitle={Few-Shot Detection},\n\tpages={},\n\tyear={2020},"
        ));
        assert!(!output.contains("address"));
        assert_eq!(output.lines().count(), 2 + Category::Journal.required_fields().len());
    }

    #[test]
    fn test_format_bibtex_empty_record() {
        let record = CitationRecord::new("Empty_2020", Category::Journal);
        assert_eq!(
            format_bibtex(&record),
            "@article{Empty_2020,\n\ttitle={},\n\tauthor={},\n\tyear={},\n\tjournal={},\n\
             \tvolume={},\n\tpages={},\n\tpublisher={},\n\tdoi={}\n}"
        );
    }
}
