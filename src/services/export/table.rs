//! Tabular projections and value normalization for report exports
//!
//! Each table has two fixed projections: the spreadsheet projection carries
//! the full record including audit timestamps, the document projection is a
//! curated subset chosen for readability. The asymmetry is intentional.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::models::trainee::Trainee;
use crate::models::training::Training;
use crate::models::user::User;

/// A single exportable value, normalized from the store's column types.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(DateTime<Utc>),
}

impl CellValue {
    /// Stringification used for spreadsheet cells that are not written as
    /// native types, and for column width measurement.
    pub fn sheet_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(true) => "TRUE".to_string(),
            CellValue::Bool(false) => "FALSE".to_string(),
            CellValue::Int(v) => v.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Text(v) => v.clone(),
            CellValue::Date(v) => v.format("%Y-%m-%d").to_string(),
            CellValue::Time(v) => v.format("%H:%M:%S").to_string(),
            CellValue::Timestamp(v) => v.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Stringification for document cells: nulls render empty, booleans as
    /// localized Yes/No, dates and times in the fixed formats.
    pub fn document_text(&self) -> String {
        match self {
            CellValue::Bool(true) => "Yes".to_string(),
            CellValue::Bool(false) => "No".to_string(),
            other => other.sheet_text(),
        }
    }
}

impl From<Option<i64>> for CellValue {
    fn from(value: Option<i64>) -> Self {
        value.map(CellValue::Int).unwrap_or(CellValue::Null)
    }
}

/// A fully materialized table ready for rendering.
#[derive(Debug, Clone)]
pub struct TableView {
    /// Store-level table name, used in filenames.
    pub name: &'static str,
    /// Human title, used for sheet names and document headings.
    pub title: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Spreadsheet projection of user accounts. The credential column is never
/// exported.
pub fn sheet_view_users(users: &[User]) -> TableView {
    TableView {
        name: "users",
        title: "Users",
        headers: vec![
            "id",
            "name",
            "username",
            "role",
            "mobile_number",
            "gender",
            "age",
            "department",
            "designation",
            "specialization",
            "experience_years",
            "created_at",
        ],
        rows: users
            .iter()
            .map(|u| {
                vec![
                    CellValue::Int(u.id),
                    CellValue::Text(u.name.clone()),
                    CellValue::Text(u.username.clone()),
                    CellValue::Text(u.role.clone()),
                    CellValue::Text(u.mobile_number.clone()),
                    CellValue::Text(u.gender.clone()),
                    CellValue::Int(u.age.into()),
                    CellValue::Text(u.department.clone()),
                    CellValue::Text(u.designation.clone()),
                    CellValue::Text(u.specialization.clone()),
                    CellValue::Int(u.experience_years.into()),
                    CellValue::Timestamp(u.created_at),
                ]
            })
            .collect(),
    }
}

/// Curated document projection of user accounts.
pub fn document_view_users(users: &[User]) -> TableView {
    TableView {
        name: "users",
        title: "Users",
        headers: vec![
            "Name",
            "Username",
            "Role",
            "Mobile",
            "Gender",
            "Age",
            "Department",
            "Designation",
            "Specialization",
        ],
        rows: users
            .iter()
            .map(|u| {
                vec![
                    CellValue::Text(u.name.clone()),
                    CellValue::Text(u.username.clone()),
                    CellValue::Text(u.role.clone()),
                    CellValue::Text(u.mobile_number.clone()),
                    CellValue::Text(u.gender.clone()),
                    CellValue::Int(u.age.into()),
                    CellValue::Text(u.department.clone()),
                    CellValue::Text(u.designation.clone()),
                    CellValue::Text(u.specialization.clone()),
                ]
            })
            .collect(),
    }
}

/// Spreadsheet projection of trainee registrations.
pub fn sheet_view_trainees(trainees: &[Trainee]) -> TableView {
    TableView {
        name: "trainees",
        title: "Trainees",
        headers: vec![
            "id",
            "name",
            "mobile_number",
            "gender",
            "age",
            "department",
            "designation",
            "address",
            "block",
            "training_date",
            "cpr_training",
            "first_aid_kit_given",
            "life_saving_skills",
            "created_at",
        ],
        rows: trainees
            .iter()
            .map(|t| {
                vec![
                    CellValue::Int(t.id),
                    CellValue::Text(t.name.clone()),
                    CellValue::Text(t.mobile_number.clone()),
                    CellValue::Text(t.gender.clone()),
                    CellValue::Int(t.age.into()),
                    CellValue::Text(t.department.clone()),
                    CellValue::Text(t.designation.clone()),
                    CellValue::Text(t.address.clone()),
                    CellValue::Text(t.block.clone()),
                    CellValue::Date(t.training_date),
                    CellValue::Bool(t.cpr_training),
                    CellValue::Bool(t.first_aid_kit_given),
                    CellValue::Bool(t.life_saving_skills),
                    CellValue::Timestamp(t.created_at),
                ]
            })
            .collect(),
    }
}

/// Curated document projection of trainee registrations.
pub fn document_view_trainees(trainees: &[Trainee]) -> TableView {
    TableView {
        name: "trainees",
        title: "Trainees",
        headers: vec![
            "Name",
            "Mobile",
            "Gender",
            "Age",
            "Department",
            "Address",
            "Block",
            "Training Date",
            "CPR",
            "First Aid",
        ],
        rows: trainees
            .iter()
            .map(|t| {
                vec![
                    CellValue::Text(t.name.clone()),
                    CellValue::Text(t.mobile_number.clone()),
                    CellValue::Text(t.gender.clone()),
                    CellValue::Int(t.age.into()),
                    CellValue::Text(t.department.clone()),
                    CellValue::Text(t.address.clone()),
                    CellValue::Text(t.block.clone()),
                    CellValue::Date(t.training_date),
                    CellValue::Bool(t.cpr_training),
                    CellValue::Bool(t.first_aid_kit_given),
                ]
            })
            .collect(),
    }
}

/// Spreadsheet projection of training sessions.
pub fn sheet_view_trainings(trainings: &[Training]) -> TableView {
    TableView {
        name: "trainings",
        title: "Trainings",
        headers: vec![
            "id",
            "title",
            "training_topic",
            "description",
            "address",
            "block",
            "training_date",
            "training_time",
            "duration_hours",
            "trainees",
            "created_at",
            "updated_at",
        ],
        rows: trainings
            .iter()
            .map(|t| {
                vec![
                    CellValue::Int(t.id),
                    CellValue::Text(t.title.clone()),
                    CellValue::Text(t.training_topic.clone()),
                    CellValue::Text(t.description.clone()),
                    CellValue::Text(t.address.clone()),
                    CellValue::Text(t.block.clone()),
                    CellValue::Date(t.training_date),
                    CellValue::Time(t.training_time),
                    CellValue::Float(t.duration_hours),
                    CellValue::Int(t.trainees.into()),
                    CellValue::Timestamp(t.created_at),
                    CellValue::Timestamp(t.updated_at),
                ]
            })
            .collect(),
    }
}

/// Curated document projection of training sessions.
pub fn document_view_trainings(trainings: &[Training]) -> TableView {
    TableView {
        name: "trainings",
        title: "Trainings",
        headers: vec![
            "Title",
            "Topic",
            "Address",
            "Block",
            "Date",
            "Time",
            "Duration (hrs)",
            "Trainees",
        ],
        rows: trainings
            .iter()
            .map(|t| {
                vec![
                    CellValue::Text(t.title.clone()),
                    CellValue::Text(t.training_topic.clone()),
                    CellValue::Text(t.address.clone()),
                    CellValue::Text(t.block.clone()),
                    CellValue::Date(t.training_date),
                    CellValue::Time(t.training_time),
                    CellValue::Float(t.duration_hours),
                    CellValue::Int(t.trainees.into()),
                ]
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn trainee_fixture() -> Trainee {
        Trainee {
            id: 1,
            name: "A".to_string(),
            mobile_number: String::new(),
            gender: "female".to_string(),
            age: 28,
            department: "Health".to_string(),
            designation: String::new(),
            address: "12 Lake Rd".to_string(),
            block: "East".to_string(),
            training_date: NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
            cpr_training: true,
            first_aid_kit_given: false,
            life_saving_skills: false,
            registered_by: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 21, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn booleans_localize_in_document_text_only() {
        assert_eq!(CellValue::Bool(true).document_text(), "Yes");
        assert_eq!(CellValue::Bool(false).document_text(), "No");
        assert_eq!(CellValue::Bool(true).sheet_text(), "TRUE");
    }

    #[test]
    fn null_renders_empty_in_both_formats() {
        assert_eq!(CellValue::Null.sheet_text(), "");
        assert_eq!(CellValue::Null.document_text(), "");
    }

    #[test]
    fn date_and_time_formats_are_fixed() {
        let date = CellValue::Date(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        assert_eq!(date.document_text(), "2026-03-05");

        let ts = CellValue::Timestamp(Utc.with_ymd_and_hms(2026, 3, 5, 14, 0, 9).unwrap());
        assert_eq!(ts.sheet_text(), "2026-03-05 14:00:09");

        let time = CellValue::Time(NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        assert_eq!(time.document_text(), "09:05:00");
    }

    #[test]
    fn document_trainee_row_shows_yes_no_outcomes() {
        let view = document_view_trainees(&[trainee_fixture()]);
        let row = &view.rows[0];
        assert_eq!(row[8].document_text(), "Yes");
        assert_eq!(row[9].document_text(), "No");
    }

    #[test]
    fn projections_preserve_row_counts() {
        let trainees = vec![trainee_fixture(), trainee_fixture(), trainee_fixture()];
        assert_eq!(sheet_view_trainees(&trainees).rows.len(), 3);
        assert_eq!(document_view_trainees(&trainees).rows.len(), 3);
    }

    #[test]
    fn sheet_projection_is_wider_than_document_projection() {
        let trainees = vec![trainee_fixture()];
        let sheet = sheet_view_trainees(&trainees);
        let document = document_view_trainees(&trainees);
        assert!(sheet.headers.len() > document.headers.len());
    }
}
