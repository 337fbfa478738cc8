//! Report Export Engine
//!
//! Given a table selector and a format, fetches the rows, normalizes values
//! to exportable primitives and renders either a spreadsheet workbook or a
//! paginated document. The full result set is materialized in memory before
//! rendering; at the expected data volumes this is a documented scalability
//! limit rather than a bug.

pub mod excel;
pub mod pdf;
pub mod table;

use chrono::Local;
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::database::DatabaseService;
use crate::utils::errors::{AidtrackError, Result};
use table::TableView;

/// Exportable tables. Parsing rejects anything else before the store is
/// touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTable {
    Users,
    Trainees,
    Trainings,
}

impl ExportTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportTable::Users => "users",
            ExportTable::Trainees => "trainees",
            ExportTable::Trainings => "trainings",
        }
    }
}

impl FromStr for ExportTable {
    type Err = AidtrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "users" => Ok(ExportTable::Users),
            "trainees" => Ok(ExportTable::Trainees),
            "trainings" => Ok(ExportTable::Trainings),
            _ => Err(AidtrackError::Validation("Invalid table name".to_string())),
        }
    }
}

impl fmt::Display for ExportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output formats with their wire metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// A rendered export ready to stream to the client.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Report export service
#[derive(Debug, Clone)]
pub struct ExportService {
    db: DatabaseService,
}

impl ExportService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Fetch, normalize and render one table in the requested format.
    pub async fn export(&self, table: ExportTable, format: ExportFormat) -> Result<ExportFile> {
        let view = self.fetch_view(table, format).await?;
        let rows = view.rows.len();

        let bytes = match format {
            ExportFormat::Excel => excel::render(&view)?,
            ExportFormat::Pdf => pdf::render(&view)?,
        };

        let filename = export_filename(table, format);
        info!(table = %table, rows = rows, filename = %filename, "export generated");

        Ok(ExportFile {
            filename,
            content_type: format.content_type(),
            bytes,
        })
    }

    async fn fetch_view(&self, table: ExportTable, format: ExportFormat) -> Result<TableView> {
        let view = match (table, format) {
            (ExportTable::Users, ExportFormat::Excel) => {
                table::sheet_view_users(&self.db.users.list_newest_first().await?)
            }
            (ExportTable::Users, ExportFormat::Pdf) => {
                table::document_view_users(&self.db.users.list_newest_first().await?)
            }
            (ExportTable::Trainees, ExportFormat::Excel) => {
                table::sheet_view_trainees(&self.db.trainees.list_newest_first().await?)
            }
            (ExportTable::Trainees, ExportFormat::Pdf) => {
                table::document_view_trainees(&self.db.trainees.list_newest_first().await?)
            }
            (ExportTable::Trainings, ExportFormat::Excel) => {
                table::sheet_view_trainings(&self.db.trainings.list_newest_first().await?)
            }
            (ExportTable::Trainings, ExportFormat::Pdf) => {
                table::document_view_trainings(&self.db.trainings.list_newest_first().await?)
            }
        };
        Ok(view)
    }
}

/// Download filename embedding the table name and a timestamp to the second.
fn export_filename(table: ExportTable, format: ExportFormat) -> String {
    format!(
        "aidtrack_{}_{}.{}",
        table.as_str(),
        Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn invalid_table_name_is_rejected_before_store_access() {
        assert_matches!(
            "sessions".parse::<ExportTable>(),
            Err(AidtrackError::Validation(msg)) if msg == "Invalid table name"
        );
    }

    #[test]
    fn known_table_names_parse() {
        assert_eq!("users".parse::<ExportTable>().unwrap(), ExportTable::Users);
        assert_eq!(
            "trainees".parse::<ExportTable>().unwrap(),
            ExportTable::Trainees
        );
        assert_eq!(
            "trainings".parse::<ExportTable>().unwrap(),
            ExportTable::Trainings
        );
    }

    #[test]
    fn filename_embeds_table_and_extension() {
        let name = export_filename(ExportTable::Trainees, ExportFormat::Excel);
        assert!(name.starts_with("aidtrack_trainees_"));
        assert!(name.ends_with(".xlsx"));

        let name = export_filename(ExportTable::Users, ExportFormat::Pdf);
        assert!(name.starts_with("aidtrack_users_"));
        assert!(name.ends_with(".pdf"));
    }

    #[test]
    fn format_metadata_matches_wire_expectations() {
        assert_eq!(
            ExportFormat::Excel.content_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
    }
}
