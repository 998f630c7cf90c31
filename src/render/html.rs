//! HTML rendering of a comparison: details list, colour key, and the
//! table of changes, with the colour scheme the project administrators
//! already know (green added rows, red deleted rows, yellow changed cells
//! with the old value in gray).

use super::{NO_VALUE_CHANGED, NO_VALUE_TABLE};
use crate::dictionary::{strip_tags, FieldRecord};
use crate::diff::{ChangeEntry, ChangeSet, ChangeStatus, Summary};
use std::fmt::Write;

const ADDED_ROW_COLOR: &str = "#7BED7B";
const DELETED_ROW_COLOR: &str = "#FE5A5A";
const CHANGED_CELL_COLOR: &str = "#FFFF80";
const OLD_VALUE_COLOR: &str = "#aaa";

/// Render the full comparison fragment: details, key, and table.
pub fn render_comparison(changes: &ChangeSet, summary: &Summary, headers: &[String]) -> String {
    let mut html = String::new();

    html.push_str("<div class=\"comparison-details\">\n");
    html.push_str("<u><b>Details regarding changes between versions</b></u>\n<ul>\n");
    let _ = writeln!(
        html,
        "<li style='color: green'>Fields added: {}</li>",
        summary.fields_added
    );
    let _ = writeln!(
        html,
        "<li style='color: red'>Fields deleted: {}</li>",
        summary.fields_deleted
    );
    let _ = writeln!(html, "<li>Fields modified: {}</li>", summary.fields_modified);
    let _ = writeln!(
        html,
        "<li>Total fields <b>BEFORE</b> changes: {}</li>",
        summary.total_fields_before
    );
    let _ = writeln!(
        html,
        "<li>Total fields <b>AFTER</b> changes: {}</li>",
        summary.total_fields_after
    );
    html.push_str("</ul>\n</div>\n");

    html.push_str(&render_key());

    html.push_str("<h4>Table of Changes</h4>\n");
    if changes.is_empty() {
        html.push_str("<p>The data dictionaries are identical</p>\n");
        return html;
    }

    html.push_str("<table>\n<thead>\n<tr>");
    for header in headers {
        let _ = write!(html, "<th><b>{}</b></th>", escape(header));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for entry in changes {
        html.push_str(&render_row(entry, headers));
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

fn render_key() -> String {
    let mut html = String::new();
    html.push_str("<table class=\"comparison-key\" cellspacing=\"0\" cellpadding=\"0\" border=\"1\">\n<tbody>\n");
    html.push_str("<tr><td style=\"background-color: black; color: white; font-weight: bold;\">KEY for Comparison Table below</td></tr>\n");
    html.push_str("<tr><td>White cell = no change</td></tr>\n");
    let _ = writeln!(
        html,
        "<tr><td style=\"background-color: {CHANGED_CELL_COLOR};\">Yellow cell = field changed (Black text = current value, <font color=\"#909090\">Gray text = old value</font>)</td></tr>"
    );
    let _ = writeln!(
        html,
        "<tr><td style=\"background-color: {ADDED_ROW_COLOR};\">Green cell = new project field</td></tr>"
    );
    let _ = writeln!(
        html,
        "<tr><td style=\"background-color: {DELETED_ROW_COLOR};\">Red cell = deleted project field</td></tr>"
    );
    html.push_str("</tbody>\n</table>\n");
    html
}

fn render_row(entry: &ChangeEntry, headers: &[String]) -> String {
    let mut html = String::new();

    match entry.status {
        ChangeStatus::Added => {
            let _ = write!(html, "<tr style='background-color:{ADDED_ROW_COLOR}'>");
            render_record_cells(&mut html, entry.record.as_ref(), headers.len());
        }
        ChangeStatus::Deleted => {
            let _ = write!(html, "<tr style='background-color:{DELETED_ROW_COLOR}'>");
            render_record_cells(&mut html, entry.record.as_ref(), headers.len());
        }
        ChangeStatus::Modified => {
            html.push_str("<tr>");
            for attr in &entry.attributes {
                if attr.changed {
                    let _ = write!(
                        html,
                        "<td style='background-color:{CHANGED_CELL_COLOR}'><p>{}</p><p style='color:{OLD_VALUE_COLOR}'>{}</p></td>",
                        display_or(&attr.new_display, NO_VALUE_CHANGED),
                        display_or(&attr.old_display, NO_VALUE_CHANGED),
                    );
                } else {
                    let _ = write!(
                        html,
                        "<td>{}</td>",
                        display_or(&attr.new_display, NO_VALUE_TABLE)
                    );
                }
            }
        }
    }

    html.push_str("</tr>\n");
    html
}

/// Cells for Added/Deleted rows: the carried record's values, stripped,
/// positionally padded out to the header width.
fn render_record_cells(html: &mut String, record: Option<&FieldRecord>, width: usize) {
    for index in 0..width {
        let value = record
            .and_then(|record| record.value_at(index))
            .map(strip_tags)
            .unwrap_or_default();
        let _ = write!(html, "<td>{}</td>", display_or(&value, NO_VALUE_TABLE));
    }
}

fn display_or(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_owned()
    } else {
        escape(value)
    }
}

/// Minimal HTML escaping for stripped attribute values.
fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use crate::diff::{diff, summarize};

    fn dictionaries() -> (Dictionary, Dictionary) {
        let mut older = Dictionary::new();
        let mut record = FieldRecord::new();
        record.insert("field_name", "age");
        record.insert("field_label", "Age");
        older.insert("age", record);
        let mut record = FieldRecord::new();
        record.insert("field_name", "dob");
        record.insert("field_label", "DOB");
        older.insert("dob", record);

        let mut newer = Dictionary::new();
        let mut record = FieldRecord::new();
        record.insert("field_name", "age");
        record.insert("field_label", "Age (years)");
        newer.insert("age", record);
        let mut record = FieldRecord::new();
        record.insert("field_name", "email");
        record.insert("field_label", "");
        newer.insert("email", record);

        (newer, older)
    }

    #[test]
    fn test_identical_dictionaries_message() {
        let dict = Dictionary::new();
        let changes = diff(&dict, &dict);
        let summary = summarize(&changes, &dict, &dict);
        let html = render_comparison(&changes, &summary, &[]);
        assert!(html.contains("The data dictionaries are identical"));
        // The colour key is still a table; the changes table is not emitted
        assert!(!html.contains("<thead>"));
        assert!(!html.contains("<tr style="));
    }

    #[test]
    fn test_row_colors_and_placeholders() {
        let (newer, older) = dictionaries();
        let changes = diff(&newer, &older);
        let summary = summarize(&changes, &newer, &older);
        let html = render_comparison(&changes, &summary, &newer.headers());

        // Added row is green; its empty label renders the table placeholder
        assert!(html.contains("<tr style='background-color:#7BED7B'><td>email</td><td>n/a</td>"));
        // Deleted row is red
        assert!(html.contains("<tr style='background-color:#FE5A5A'><td>dob</td><td>DOB</td>"));
        // Changed cell is yellow with the old value in gray
        assert!(html.contains(
            "<td style='background-color:#FFFF80'><p>Age (years)</p><p style='color:#aaa'>Age</p></td>"
        ));
    }

    #[test]
    fn test_details_counts_rendered() {
        let (newer, older) = dictionaries();
        let changes = diff(&newer, &older);
        let summary = summarize(&changes, &newer, &older);
        let html = render_comparison(&changes, &summary, &newer.headers());

        assert!(html.contains("Fields added: 1"));
        assert!(html.contains("Fields deleted: 1"));
        assert!(html.contains("Fields modified: 1"));
        assert!(html.contains("<b>BEFORE</b> changes: 2"));
        assert!(html.contains("<b>AFTER</b> changes: 2"));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut older = Dictionary::new();
        let mut newer = Dictionary::new();
        let mut record = FieldRecord::new();
        record.insert("field_label", "Weight & Height");
        newer.insert("wh", record.clone());
        older.insert("unused", FieldRecord::new());

        let changes = diff(&newer, &older);
        let summary = summarize(&changes, &newer, &older);
        let html = render_comparison(&changes, &summary, &newer.headers());
        assert!(html.contains("Weight &amp; Height"));
    }
}
