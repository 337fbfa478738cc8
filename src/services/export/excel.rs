//! Spreadsheet rendering for report exports
//!
//! One sheet named after the table, a bold header row, one row per record.
//! Booleans and numbers are written as native cell types; everything else
//! is stringified with the fixed date/time formats. Column widths track
//! the longest stringified value, capped at a maximum.

use rust_xlsxwriter::{Format, Workbook};

use crate::services::export::table::{CellValue, TableView};
use crate::utils::errors::{AidtrackError, Result};

/// Columns grow with content up to this width, matching typical screen
/// readability.
const MAX_COLUMN_WIDTH: usize = 50;

pub fn render(view: &TableView) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(view.title)
        .map_err(|err| AidtrackError::ExportFailure(err.to_string()))?;

    let header_format = Format::new().set_bold();
    for (col, header) in view.headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|err| AidtrackError::ExportFailure(err.to_string()))?;
    }

    for (row_idx, row) in view.rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col_num = col as u16;
            match cell {
                CellValue::Null => {}
                CellValue::Bool(value) => {
                    worksheet
                        .write_boolean(row_num, col_num, *value)
                        .map_err(|err| AidtrackError::ExportFailure(err.to_string()))?;
                }
                CellValue::Int(value) => {
                    worksheet
                        .write_number(row_num, col_num, *value as f64)
                        .map_err(|err| AidtrackError::ExportFailure(err.to_string()))?;
                }
                CellValue::Float(value) => {
                    worksheet
                        .write_number(row_num, col_num, *value)
                        .map_err(|err| AidtrackError::ExportFailure(err.to_string()))?;
                }
                other => {
                    worksheet
                        .write_string(row_num, col_num, other.sheet_text())
                        .map_err(|err| AidtrackError::ExportFailure(err.to_string()))?;
                }
            }
        }
    }

    for (col, header) in view.headers.iter().enumerate() {
        let longest = view
            .rows
            .iter()
            .map(|row| row.get(col).map(|cell| cell.sheet_text().len()).unwrap_or(0))
            .max()
            .unwrap_or(0)
            .max(header.len());
        let width = (longest + 2).min(MAX_COLUMN_WIDTH);
        worksheet
            .set_column_width(col as u16, width as f64)
            .map_err(|err| AidtrackError::ExportFailure(err.to_string()))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|err| AidtrackError::ExportFailure(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_view() -> TableView {
        TableView {
            name: "trainees",
            title: "Trainees",
            headers: vec!["name", "cpr_training", "age"],
            rows: vec![
                vec![
                    CellValue::Text("A".to_string()),
                    CellValue::Bool(true),
                    CellValue::Int(28),
                ],
                vec![CellValue::Text("B".to_string()), CellValue::Bool(false), CellValue::Null],
            ],
        }
    }

    #[test]
    fn workbook_bytes_have_zip_magic() {
        let bytes = render(&small_view()).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn empty_view_still_renders() {
        let view = TableView {
            name: "users",
            title: "Users",
            headers: vec!["id", "name"],
            rows: vec![],
        };
        let bytes = render(&view).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
