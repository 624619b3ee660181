//! Citation record model: category, field names, and the ordered field mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Publication category of a record.
///
/// Decided once, from the BibTeX entry type, and carried through formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Journal article (`@article`).
    Journal,
    /// Conference paper (`@inproceedings`).
    Conference,
}

impl Category {
    /// BibTeX entry type for this category.
    #[must_use]
    pub const fn entry_type(self) -> &'static str {
        match self {
            Self::Journal => "article",
            Self::Conference => "inproceedings",
        }
    }

    /// Look up a category by BibTeX entry type (without the `@`).
    #[must_use]
    pub fn from_entry_type(entry_type: &str) -> Option<Self> {
        match entry_type {
            "article" => Some(Self::Journal),
            "inproceedings" => Some(Self::Conference),
            _ => None,
        }
    }

    /// Fields a complete citation of this category must carry.
    #[must_use]
    pub const fn required_fields(self) -> &'static [Field] {
        match self {
            Self::Journal => &[
                Field::Title,
                Field::Author,
                Field::Year,
                Field::Journal,
                Field::Volume,
                Field::Pages,
                Field::Publisher,
                Field::Doi,
            ],
            Self::Conference => &[
                Field::Title,
                Field::Author,
                Field::Year,
                Field::Booktitle,
                Field::Pages,
                Field::Publisher,
                Field::Doi,
                Field::Address,
            ],
        }
    }

    /// Fields read from the fetched record, in extraction order.
    #[must_use]
    pub const fn extracted_fields(self) -> &'static [Field] {
        match self {
            Self::Journal => &[
                Field::Title,
                Field::Author,
                Field::Year,
                Field::Pages,
                Field::Publisher,
                Field::Doi,
                Field::Journal,
                Field::Volume,
            ],
            Self::Conference => &[
                Field::Title,
                Field::Author,
                Field::Year,
                Field::Pages,
                Field::Publisher,
                Field::Doi,
                Field::Booktitle,
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Journal => f.write_str("journal"),
            Self::Conference => f.write_str("conference"),
        }
    }
}

/// A citation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Author,
    Year,
    Pages,
    Publisher,
    /// Persistent identifier.
    Doi,
    Journal,
    Volume,
    /// Proceedings name.
    Booktitle,
    /// Conference location.
    Address,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Title,
        Self::Author,
        Self::Year,
        Self::Pages,
        Self::Publisher,
        Self::Doi,
        Self::Journal,
        Self::Volume,
        Self::Booktitle,
        Self::Address,
    ];

    /// Name used when rendering the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Year => "year",
            Self::Pages => "pages",
            Self::Publisher => "publisher",
            Self::Doi => "doi",
            Self::Journal => "journal",
            Self::Volume => "volume",
            Self::Booktitle => "booktitle",
            Self::Address => "address",
        }
    }

    /// Key as it appears in Crossref's BibTeX output.
    #[must_use]
    pub const fn bibtex_key(self) -> &'static str {
        match self {
            Self::Doi => "DOI",
            other => other.name(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field values in insertion order.
///
/// Empty values count as absent everywhere, but still hold the field's
/// position so a later fill lands where the field was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(Field, String)>,
}

impl FieldMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field, if present and non-empty.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Value of a field, or the empty string.
    #[must_use]
    pub fn get_or_empty(&self, field: Field) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Check whether a field has a non-empty value.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Set a field, keeping its original position if it already exists.
    pub fn insert(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Reserve a position for a field without giving it a value.
    ///
    /// Does nothing if the field already has a position.
    pub fn reserve(&mut self, field: Field) {
        if !self.entries.iter().any(|(f, _)| *f == field) {
            self.entries.push((field, String::new()));
        }
    }

    /// Set a field only if it is absent or empty. Returns true if the value was stored.
    pub fn insert_if_absent(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.contains(field) {
            return false;
        }
        let value = value.into();
        if value.is_empty() {
            return false;
        }
        self.insert(field, value);
        true
    }

    /// Merge values from another map without overwriting present fields.
    ///
    /// Returns the fields that were filled in.
    pub fn merge_missing(&mut self, other: Self) -> Vec<Field> {
        other
            .entries
            .into_iter()
            .filter_map(|(field, value)| self.insert_if_absent(field, value).then_some(field))
            .collect()
    }

    /// Fields from `required` that are absent or empty, in `required` order.
    #[must_use]
    pub fn missing(&self, required: &[Field]) -> Vec<Field> {
        required.iter().copied().filter(|f| !self.contains(*f)).collect()
    }

    /// Every field with a position, including empty ones, in insertion order.
    pub fn slots(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// Present (non-empty) fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().filter(|(_, v)| !v.is_empty()).map(|(f, v)| (*f, v.as_str()))
    }

    /// Number of present fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check if no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(Field, String)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (field, value) in iter {
            map.insert(field, value);
        }
        map
    }
}

/// A parsed citation: key, category, and fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationRecord {
    /// BibTeX citation key (e.g. `Vaswani_2017`).
    pub key: String,

    /// Journal or conference.
    pub category: Category,

    /// Field values in insertion order.
    pub fields: FieldMap,
}

impl CitationRecord {
    /// Create a record with no fields.
    #[must_use]
    pub fn new(key: impl Into<String>, category: Category) -> Self {
        Self { key: key.into(), category, fields: FieldMap::new() }
    }

    /// Required fields still missing for this record's category.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        self.fields.missing(self.category.required_fields())
    }

    /// Check if all required fields are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
