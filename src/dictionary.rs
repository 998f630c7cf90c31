use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One field's full definition at one point in time: an insertion-ordered
/// attribute-name → attribute-value map (label, type, validation, choices...).
///
/// The empty string means "no value". Records are never mutated after they
/// are built from a snapshot; equality is structural and order-sensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRecord {
    attributes: IndexMap<String, String>,
}

// IndexMap's derived equality ignores entry order; record equality must
// not, since positional alignment treats a reordered record as changed.
impl PartialEq for FieldRecord {
    fn eq(&self, other: &Self) -> bool {
        self.attributes.iter().eq(other.attributes.iter())
    }
}

impl Eq for FieldRecord {}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute. Inserting the same name twice keeps the first
    /// position and overwrites the value, matching IndexMap semantics.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attribute value at a position, if the record is long enough.
    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.attributes
            .get_index(index)
            .map(|(_, value)| value.as_str())
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl FromIterator<(String, String)> for FieldRecord {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

/// The complete field definition set at one revision: an insertion-ordered
/// field-name → [`FieldRecord`] map.
///
/// Field names are unique within a dictionary. Two dictionaries being
/// compared may disagree on both field names and attribute schemas; the
/// newer dictionary's schema is authoritative for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    fields: IndexMap<String, FieldRecord>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field_name: impl Into<String>, record: FieldRecord) {
        self.fields.insert(field_name.into(), record);
    }

    pub fn get(&self, field_name: &str) -> Option<&FieldRecord> {
        self.fields.get(field_name)
    }

    pub fn contains(&self, field_name: &str) -> bool {
        self.fields.contains_key(field_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRecord)> {
        self.fields
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The revision's attribute schema: the first record's attribute names,
    /// in order. Empty for an empty dictionary.
    pub fn headers(&self) -> Vec<String> {
        self.fields
            .first()
            .map(|(_, record)| record.attribute_names().map(str::to_owned).collect())
            .unwrap_or_default()
    }
}

impl FromIterator<(String, FieldRecord)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (String, FieldRecord)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

static TAG_RE: OnceLock<Regex> = OnceLock::new();

/// Strip markup tags from an attribute value.
///
/// Field definitions routinely embed presentation markup (`<b>Male</b>`,
/// `<div class="...">`). Comparison-for-counting and all rendering happen on
/// the stripped value, so markup-only edits are not reported as changes.
pub fn strip_tags(value: &str) -> String {
    let re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
    re.replace_all(value, "").into_owned()
}
