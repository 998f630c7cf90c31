//! Spreadsheet export: a two-sheet workbook mirroring the HTML view.
//!
//! Sheet "Details" carries the summary counts; sheet "Table of Changes"
//! carries one row per change entry with the same colour scheme as the
//! HTML table. Changed cells hold rich text: the new value, a line break,
//! then the old value in gray.

use super::{ExportError, NO_VALUE_CHANGED, NO_VALUE_TABLE};
use crate::dictionary::{strip_tags, FieldRecord};
use crate::diff::{ChangeSet, ChangeStatus, Summary};
use log::debug;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};
use std::path::Path;

const ADDED_FILL: u32 = 0x7BED7B;
const DELETED_FILL: u32 = 0xFE5A5A;
const CHANGED_FILL: u32 = 0xFFFF80;
const OLD_VALUE_FONT: u32 = 0xAAAAAA;

/// Write the comparison workbook. Refuses an empty change set — there is
/// nothing to download when the dictionaries are identical.
pub fn write_workbook(
    path: &Path,
    changes: &ChangeSet,
    summary: &Summary,
    headers: &[String],
) -> Result<(), ExportError> {
    if changes.is_empty() {
        return Err(ExportError::NoChanges);
    }

    let mut workbook = Workbook::new();

    let details = workbook.add_worksheet();
    details.set_name("Details")?;
    write_details(details, summary)?;

    let table = workbook.add_worksheet();
    table.set_name("Table of Changes")?;
    write_table(table, changes, headers)?;

    workbook.save(path)?;
    debug!("wrote comparison workbook to {}", path.display());
    Ok(())
}

fn write_details(sheet: &mut Worksheet, summary: &Summary) -> Result<(), ExportError> {
    let bold = Format::new().set_bold();
    let labels = [
        ("Fields added", summary.fields_added),
        ("Fields deleted", summary.fields_deleted),
        ("Fields modified", summary.fields_modified),
        ("Total fields BEFORE changes", summary.total_fields_before),
        ("Total fields AFTER changes", summary.total_fields_after),
    ];

    for (col, (label, count)) in labels.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *label, &bold)?;
        sheet.write_number(1, col, *count as f64)?;
    }
    Ok(())
}

fn write_table(
    sheet: &mut Worksheet,
    changes: &ChangeSet,
    headers: &[String],
) -> Result<(), ExportError> {
    let bold = Format::new().set_bold();
    let added_fill = Format::new().set_background_color(Color::RGB(ADDED_FILL));
    let deleted_fill = Format::new().set_background_color(Color::RGB(DELETED_FILL));
    let changed_fill = Format::new()
        .set_background_color(Color::RGB(CHANGED_FILL))
        .set_text_wrap();
    let new_font = Format::new();
    let old_font = Format::new().set_font_color(Color::RGB(OLD_VALUE_FONT));

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &bold)?;
    }

    for (index, entry) in changes.iter().enumerate() {
        let row = (index + 1) as u32;
        match entry.status {
            ChangeStatus::Added => {
                write_record_row(sheet, row, entry.record.as_ref(), headers.len(), &added_fill)?;
            }
            ChangeStatus::Deleted => {
                write_record_row(
                    sheet,
                    row,
                    entry.record.as_ref(),
                    headers.len(),
                    &deleted_fill,
                )?;
            }
            ChangeStatus::Modified => {
                for (col, attr) in entry.attributes.iter().enumerate() {
                    let col = col as u16;
                    if attr.changed {
                        let (new_value, old_value) =
                            changed_cell_text(&attr.new_display, &attr.old_display);
                        sheet.write_rich_string_with_format(
                            row,
                            col,
                            &[(&new_font, new_value.as_str()), (&old_font, &old_value)],
                            &changed_fill,
                        )?;
                    } else {
                        sheet.write_string(
                            row,
                            col,
                            placeholder(&attr.new_display, NO_VALUE_TABLE),
                        )?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// One solid-filled row for an added or deleted field.
fn write_record_row(
    sheet: &mut Worksheet,
    row: u32,
    record: Option<&FieldRecord>,
    width: usize,
    fill: &Format,
) -> Result<(), ExportError> {
    for col in 0..width {
        let value = record
            .and_then(|record| record.value_at(col))
            .map(strip_tags)
            .unwrap_or_default();
        sheet.write_string_with_format(row, col as u16, placeholder(&value, NO_VALUE_TABLE), fill)?;
    }
    Ok(())
}

/// Text for the two rich-text runs of a changed cell. The placeholders are
/// asymmetric: an empty new value shows the table placeholder while only
/// the old side shows "(no value)", as the table views always have.
fn changed_cell_text(new_display: &str, old_display: &str) -> (String, String) {
    let new_value = placeholder(new_display, NO_VALUE_TABLE);
    let old_value = placeholder(old_display, NO_VALUE_CHANGED);
    (format!("{new_value}\n"), old_value)
}

fn placeholder(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}
