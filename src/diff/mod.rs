//! The record-set diff engine.
//!
//! Compares two ordered field-name → record collections and produces a
//! classified change set plus aggregate statistics. Pure functions of their
//! inputs: no I/O, no shared state, and no failure modes — empty input and
//! mismatched attribute schemas both yield well-formed results.

use crate::dictionary::{strip_tags, Dictionary, FieldRecord};
use serde::{Deserialize, Serialize};

/// Classification of one field-level difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Deleted,
    Modified,
}

/// One attribute slot of a modified field, aligned positionally across the
/// newer and older records.
///
/// Carries both the raw values and their tag-stripped display forms. The
/// `changed` flag compares the stripped forms, so a markup-only edit is not
/// flagged even though strict raw inequality put the field in the change set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeChange {
    pub name: String,
    #[serde(rename = "newValue")]
    pub new_value: String,
    #[serde(rename = "oldValue")]
    pub old_value: String,
    #[serde(rename = "newDisplay")]
    pub new_display: String,
    #[serde(rename = "oldDisplay")]
    pub old_display: String,
    pub changed: bool,
}

/// One diff result for a single field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    pub status: ChangeStatus,
    /// Full record for Added (the new one) and Deleted (the old one) fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<FieldRecord>,
    /// Per-attribute comparison for Modified fields; empty otherwise.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attributes: Vec<AttributeChange>,
}

impl ChangeEntry {
    fn added(field_name: &str, record: FieldRecord) -> Self {
        Self {
            field_name: field_name.to_owned(),
            status: ChangeStatus::Added,
            record: Some(record),
            attributes: Vec::new(),
        }
    }

    fn deleted(field_name: &str, record: FieldRecord) -> Self {
        Self {
            field_name: field_name.to_owned(),
            status: ChangeStatus::Deleted,
            record: Some(record),
            attributes: Vec::new(),
        }
    }

    fn modified(field_name: &str, attributes: Vec<AttributeChange>) -> Self {
        Self {
            field_name: field_name.to_owned(),
            status: ChangeStatus::Modified,
            record: None,
            attributes,
        }
    }

    /// True if at least one attribute differs after tag stripping.
    pub fn has_display_change(&self) -> bool {
        self.attributes.iter().any(|attr| attr.changed)
    }
}

/// Ordered list of per-field diff results: Added/Modified entries in the
/// newer dictionary's field order, then Deleted entries in the older
/// dictionary's order.
pub type ChangeSet = Vec<ChangeEntry>;

/// Aggregate statistics for a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "fieldsAdded")]
    pub fields_added: usize,
    #[serde(rename = "fieldsDeleted")]
    pub fields_deleted: usize,
    #[serde(rename = "fieldsModified")]
    pub fields_modified: usize,
    #[serde(rename = "totalFieldsBefore")]
    pub total_fields_before: usize,
    #[serde(rename = "totalFieldsAfter")]
    pub total_fields_after: usize,
}

/// Compute the classified difference between two dictionaries.
///
/// Phase 1 walks `newer` in order: a field absent from `older` is Added; a
/// field present in both with any raw attribute difference is Modified; an
/// exact raw match produces no entry. Phase 2 appends a Deleted entry for
/// every field present only in `older`, in `older`'s order.
///
/// Inclusion uses strict raw comparison while the Modified entry's
/// `changed` flags use tag-stripped comparison, so a field whose only
/// difference is markup appears in the change set but carries no flagged
/// attribute. That two-tier behaviour is deliberate and load-bearing:
/// [`summarize`] counts only flagged entries as modified.
pub fn diff(newer: &Dictionary, older: &Dictionary) -> ChangeSet {
    let mut changes = Vec::new();

    for (field_name, new_record) in newer.iter() {
        match older.get(field_name) {
            None => changes.push(ChangeEntry::added(field_name, new_record.clone())),
            Some(old_record) if new_record != old_record => {
                changes.push(ChangeEntry::modified(
                    field_name,
                    attribute_changes(new_record, old_record, strip_tags),
                ));
            }
            Some(_) => {}
        }
    }

    for (field_name, old_record) in older.iter() {
        if !newer.contains(field_name) {
            changes.push(ChangeEntry::deleted(field_name, old_record.clone()));
        }
    }

    changes
}

/// Derive summary statistics from a change set and the two dictionaries.
///
/// `fields_modified` counts only Modified entries with at least one
/// tag-stripped attribute difference; entries included by raw inequality
/// alone are excluded.
pub fn summarize(changes: &ChangeSet, newer: &Dictionary, older: &Dictionary) -> Summary {
    let mut summary = Summary {
        total_fields_before: older.len(),
        total_fields_after: newer.len(),
        ..Summary::default()
    };

    for entry in changes {
        match entry.status {
            ChangeStatus::Added => summary.fields_added += 1,
            ChangeStatus::Deleted => summary.fields_deleted += 1,
            ChangeStatus::Modified => {
                if entry.has_display_change() {
                    summary.fields_modified += 1;
                }
            }
        }
    }

    summary
}

/// Align two records attribute-by-attribute.
///
/// Alignment is POSITIONAL: slot `i` of the newer record is compared to
/// slot `i` of the older record, never to the older attribute of the same
/// name. The newer record's attribute list drives the walk; an older record
/// that is shorter contributes the empty value for its missing trailing
/// slots, and any extra trailing attributes it carries are ignored.
///
/// The normalizer is passed explicitly because two equality predicates
/// coexist: callers decide entry inclusion on the raw values before this
/// function runs, while the `changed` flags computed here use the
/// normalized values.
fn attribute_changes(
    new_record: &FieldRecord,
    old_record: &FieldRecord,
    normalize: fn(&str) -> String,
) -> Vec<AttributeChange> {
    new_record
        .iter()
        .enumerate()
        .map(|(index, (name, new_value))| {
            let old_value = old_record.value_at(index).unwrap_or("");
            let new_display = normalize(new_value);
            let old_display = normalize(old_value);
            let changed = new_display != old_display;
            AttributeChange {
                name: name.to_owned(),
                new_value: new_value.to_owned(),
                old_value: old_value.to_owned(),
                new_display,
                old_display,
                changed,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> FieldRecord {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect()
    }

    fn dictionary(fields: &[(&str, &[(&str, &str)])]) -> Dictionary {
        fields
            .iter()
            .map(|(name, pairs)| ((*name).to_owned(), record(pairs)))
            .collect()
    }

    #[test]
    fn test_equal_dictionaries_produce_no_changes() {
        let dict = dictionary(&[
            ("age", &[("field_label", "Age"), ("field_type", "text")]),
            ("sex", &[("field_label", "Sex"), ("field_type", "radio")]),
        ]);

        let changes = diff(&dict, &dict);
        assert!(changes.is_empty());

        let summary = summarize(&changes, &dict, &dict);
        assert_eq!(summary.fields_added, 0);
        assert_eq!(summary.fields_deleted, 0);
        assert_eq!(summary.fields_modified, 0);
        assert_eq!(summary.total_fields_before, 2);
        assert_eq!(summary.total_fields_after, 2);
    }

    #[test]
    fn test_both_empty_is_valid() {
        let empty = Dictionary::new();
        let changes = diff(&empty, &empty);
        assert!(changes.is_empty());
        assert_eq!(summarize(&changes, &empty, &empty), Summary::default());
    }

    #[test]
    fn test_empty_older_classifies_everything_added() {
        let newer = dictionary(&[
            ("age", &[("field_label", "Age")]),
            ("sex", &[("field_label", "Sex")]),
        ]);
        let older = Dictionary::new();

        let changes = diff(&newer, &older);
        assert_eq!(changes.len(), 2);
        assert!(changes
            .iter()
            .all(|entry| entry.status == ChangeStatus::Added));

        let summary = summarize(&changes, &newer, &older);
        assert_eq!(summary.fields_added, 2);
        assert_eq!(summary.total_fields_before, 0);
        assert_eq!(summary.total_fields_after, 2);
    }

    #[test]
    fn test_added_field_carries_new_record() {
        let older = dictionary(&[("age", &[("field_label", "Age")])]);
        let newer = dictionary(&[
            ("age", &[("field_label", "Age")]),
            ("email", &[("field_label", "Email")]),
        ]);

        let changes = diff(&newer, &older);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field_name, "email");
        assert_eq!(changes[0].status, ChangeStatus::Added);
        assert_eq!(
            changes[0].record.as_ref().unwrap().get("field_label"),
            Some("Email")
        );

        let summary = summarize(&changes, &newer, &older);
        assert_eq!(summary.fields_added, 1);
        assert_eq!(summary.fields_deleted, 0);
        assert_eq!(summary.fields_modified, 0);
    }

    #[test]
    fn test_deleted_field_carries_old_record() {
        let older = dictionary(&[
            ("age", &[("field_label", "Age")]),
            ("dob", &[("field_label", "DOB")]),
        ]);
        let newer = dictionary(&[("age", &[("field_label", "Age")])]);

        let changes = diff(&newer, &older);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field_name, "dob");
        assert_eq!(changes[0].status, ChangeStatus::Deleted);
        assert_eq!(
            changes[0].record.as_ref().unwrap().get("field_label"),
            Some("DOB")
        );

        let summary = summarize(&changes, &newer, &older);
        assert_eq!(summary.fields_deleted, 1);
        assert_eq!(summary.fields_added, 0);
    }

    #[test]
    fn test_modified_field_flags_exactly_the_changed_attribute() {
        let older = dictionary(&[(
            "age",
            &[("field_label", "Age"), ("field_type", "text")],
        )]);
        let newer = dictionary(&[(
            "age",
            &[("field_label", "Age (years)"), ("field_type", "text")],
        )]);

        let changes = diff(&newer, &older);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, ChangeStatus::Modified);

        let flagged: Vec<&AttributeChange> = changes[0]
            .attributes
            .iter()
            .filter(|attr| attr.changed)
            .collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].name, "field_label");
        assert_eq!(flagged[0].new_display, "Age (years)");
        assert_eq!(flagged[0].old_display, "Age");

        let summary = summarize(&changes, &newer, &older);
        assert_eq!(summary.fields_modified, 1);
    }

    #[test]
    fn test_markup_only_difference_is_entry_but_not_counted() {
        let older = dictionary(&[("sex", &[("field_label", "Male")])]);
        let newer = dictionary(&[("sex", &[("field_label", "<b>Male</b>")])]);

        // Raw inequality puts the field in the change set...
        let changes = diff(&newer, &older);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, ChangeStatus::Modified);
        assert!(!changes[0].has_display_change());

        // ...but tag-stripped equality keeps it out of the modified count.
        let summary = summarize(&changes, &newer, &older);
        assert_eq!(summary.fields_modified, 0);
    }

    #[test]
    fn test_order_added_modified_by_newer_then_deleted_by_older() {
        // Interleave additions, modifications, and deletions with differing
        // name orders on the two sides.
        let older = dictionary(&[
            ("dob", &[("field_label", "DOB")]),
            ("age", &[("field_label", "Age")]),
            ("phone", &[("field_label", "Phone")]),
            ("sex", &[("field_label", "Sex")]),
        ]);
        let newer = dictionary(&[
            ("email", &[("field_label", "Email")]),
            ("age", &[("field_label", "Age (years)")]),
            ("sex", &[("field_label", "Sex")]),
            ("address", &[("field_label", "Address")]),
        ]);

        let changes = diff(&newer, &older);
        let order: Vec<(&str, ChangeStatus)> = changes
            .iter()
            .map(|entry| (entry.field_name.as_str(), entry.status))
            .collect();
        assert_eq!(
            order,
            vec![
                ("email", ChangeStatus::Added),
                ("age", ChangeStatus::Modified),
                ("address", ChangeStatus::Added),
                ("dob", ChangeStatus::Deleted),
                ("phone", ChangeStatus::Deleted),
            ]
        );
    }

    #[test]
    fn test_diff_is_deterministic() {
        let older = dictionary(&[
            ("age", &[("field_label", "Age")]),
            ("dob", &[("field_label", "DOB")]),
        ]);
        let newer = dictionary(&[
            ("age", &[("field_label", "Age (years)")]),
            ("email", &[("field_label", "Email")]),
        ]);

        assert_eq!(diff(&newer, &older), diff(&newer, &older));
    }

    #[test]
    fn test_scenario_add_and_delete_same_count() {
        let older = dictionary(&[
            ("A", &[("label", "Sex"), ("type", "radio")]),
            ("B", &[("label", "DOB"), ("type", "text")]),
        ]);
        let newer = dictionary(&[
            ("A", &[("label", "Sex"), ("type", "radio")]),
            ("C", &[("label", "Email"), ("type", "text")]),
        ]);

        let changes = diff(&newer, &older);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].field_name, "C");
        assert_eq!(changes[0].status, ChangeStatus::Added);
        assert_eq!(changes[1].field_name, "B");
        assert_eq!(changes[1].status, ChangeStatus::Deleted);

        let summary = summarize(&changes, &newer, &older);
        assert_eq!(summary.fields_added, 1);
        assert_eq!(summary.fields_deleted, 1);
        assert_eq!(summary.fields_modified, 0);
        assert_eq!(summary.total_fields_before, 2);
        assert_eq!(summary.total_fields_after, 2);
    }

    #[test]
    fn test_alignment_is_positional_not_name_keyed() {
        // Same attribute names, different order: slot 0 vs slot 0.
        let older = dictionary(&[(
            "age",
            &[("field_type", "text"), ("field_label", "Age")],
        )]);
        let newer = dictionary(&[(
            "age",
            &[("field_label", "Age"), ("field_type", "text")],
        )]);

        let changes = diff(&newer, &older);
        assert_eq!(changes.len(), 1);
        let attrs = &changes[0].attributes;
        // "field_label"/"Age" in the newer record is compared against
        // "field_type"/"text" in the older one.
        assert_eq!(attrs[0].name, "field_label");
        assert_eq!(attrs[0].old_value, "text");
        assert!(attrs[0].changed);
    }

    #[test]
    fn test_reordered_attributes_are_included_as_modified() {
        // Same name→value pairs, swapped order: strict inclusion sees a
        // difference even though a name-keyed comparison would not.
        let older = dictionary(&[(
            "age",
            &[("field_type", "text"), ("field_label", "Age")],
        )]);
        let newer = dictionary(&[(
            "age",
            &[("field_label", "Age"), ("field_type", "text")],
        )]);

        let changes = diff(&newer, &older);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, ChangeStatus::Modified);
    }

    #[test]
    fn test_shorter_older_record_pads_with_no_value() {
        let older = dictionary(&[("age", &[("field_label", "Age")])]);
        let newer = dictionary(&[(
            "age",
            &[("field_label", "Age"), ("field_note", "in years")],
        )]);

        let changes = diff(&newer, &older);
        let attrs = &changes[0].attributes;
        assert_eq!(attrs.len(), 2);
        assert!(!attrs[0].changed);
        assert_eq!(attrs[1].old_value, "");
        assert!(attrs[1].changed);
    }

    #[test]
    fn test_longer_older_record_extra_trailing_attributes_ignored() {
        let older = dictionary(&[(
            "age",
            &[("field_label", "Age"), ("field_note", "in years")],
        )]);
        let newer = dictionary(&[("age", &[("field_label", "Age")])]);

        let changes = diff(&newer, &older);
        assert_eq!(changes.len(), 1);
        // The walk is driven by the newer record's single attribute.
        assert_eq!(changes[0].attributes.len(), 1);
        assert!(!changes[0].attributes[0].changed);
        // Raw-unequal but stripped-equal at every aligned slot: excluded
        // from the modified count.
        let summary = summarize(&changes, &newer, &older);
        assert_eq!(summary.fields_modified, 0);
    }
}
