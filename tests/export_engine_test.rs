//! Report export engine behaviour over in-memory fixture rows
//!
//! Exercises the projection/normalization/rendering pipeline without a
//! database: row counts are preserved, outcome flags localize to Yes/No in
//! the document format only, and both renderers produce well-formed bytes.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use aidtrack::models::trainee::Trainee;
use aidtrack::models::training::Training;
use aidtrack::models::user::User;
use aidtrack::services::export::{excel, pdf, table};

fn trainee(id: i64, name: &str, cpr: bool, kit: bool) -> Trainee {
    Trainee {
        id,
        name: name.to_string(),
        mobile_number: "9000000001".to_string(),
        gender: "female".to_string(),
        age: 31,
        department: "Revenue".to_string(),
        designation: "Clerk".to_string(),
        address: "4 Mill Road".to_string(),
        block: "South".to_string(),
        training_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
        cpr_training: cpr,
        first_aid_kit_given: kit,
        life_saving_skills: false,
        registered_by: Some(2),
        created_at: Utc.with_ymd_and_hms(2026, 2, 11, 8, 0, 0).unwrap(),
    }
}

fn training(id: i64, title: &str) -> Training {
    Training {
        id,
        title: title.to_string(),
        training_topic: "CPR".to_string(),
        description: String::new(),
        address: "Community hall".to_string(),
        block: "West".to_string(),
        training_date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
        training_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        duration_hours: 2.5,
        trainees: 18,
        status: "Planned".to_string(),
        conducted_by: Some(2),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    }
}

fn professional(id: i64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        username: name.to_lowercase(),
        password: "$argon2id$not-exported".to_string(),
        role: "professional".to_string(),
        mobile_number: "9000000002".to_string(),
        gender: "male".to_string(),
        age: 40,
        department: "Health".to_string(),
        designation: "Trainer".to_string(),
        specialization: "First aid".to_string(),
        experience_years: 12,
        created_at: Utc.with_ymd_and_hms(2025, 12, 1, 10, 0, 0).unwrap(),
    }
}

#[test]
fn spreadsheet_row_count_matches_source() {
    let trainees = vec![
        trainee(1, "A", true, false),
        trainee(2, "B", false, true),
        trainee(3, "C", true, true),
    ];
    let view = table::sheet_view_trainees(&trainees);
    assert_eq!(view.rows.len(), trainees.len());

    let bytes = excel::render(&view).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn document_row_count_matches_source() {
    let trainings: Vec<Training> = (1..=40).map(|i| training(i, "Session")).collect();
    let view = table::document_view_trainings(&trainings);
    assert_eq!(view.rows.len(), 40);

    let bytes = pdf::render(&view).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn outcome_flags_localize_in_document_format_only() {
    let rows = vec![trainee(1, "A", true, false)];

    let document = table::document_view_trainees(&rows);
    let cpr_col = document.headers.iter().position(|h| *h == "CPR").unwrap();
    let kit_col = document
        .headers
        .iter()
        .position(|h| *h == "First Aid")
        .unwrap();
    assert_eq!(document.rows[0][cpr_col].document_text(), "Yes");
    assert_eq!(document.rows[0][kit_col].document_text(), "No");

    let sheet = table::sheet_view_trainees(&rows);
    let sheet_cpr = sheet
        .headers
        .iter()
        .position(|h| *h == "cpr_training")
        .unwrap();
    assert_eq!(sheet.rows[0][sheet_cpr], table::CellValue::Bool(true));
}

#[test]
fn null_references_render_as_empty_strings() {
    let value = table::CellValue::from(None::<i64>);
    assert_eq!(value, table::CellValue::Null);
    assert_eq!(value.sheet_text(), "");
    assert_eq!(value.document_text(), "");
}

#[test]
fn spreadsheet_projection_carries_audit_columns_document_does_not() {
    let users = vec![professional(2, "Meera")];

    let sheet = table::sheet_view_users(&users);
    assert!(sheet.headers.contains(&"created_at"));
    assert!(sheet.headers.contains(&"experience_years"));

    let document = table::document_view_users(&users);
    assert!(!document.headers.iter().any(|h| *h == "created_at"));
    assert!(document.headers.len() < sheet.headers.len());
}

#[test]
fn credential_column_is_never_projected() {
    let users = vec![professional(2, "Meera")];
    let sheet = table::sheet_view_users(&users);

    assert!(!sheet.headers.iter().any(|h| h.contains("password")));
    for row in &sheet.rows {
        for cell in row {
            assert_ne!(cell.sheet_text(), "$argon2id$not-exported");
        }
    }
}

#[test]
fn timestamps_use_the_fixed_format_in_both_renderings() {
    let users = vec![professional(2, "Meera")];
    let sheet = table::sheet_view_users(&users);
    let created_col = sheet
        .headers
        .iter()
        .position(|h| *h == "created_at")
        .unwrap();
    assert_eq!(sheet.rows[0][created_col].sheet_text(), "2025-12-01 10:00:00");
}

#[test]
fn training_document_projection_orders_curated_columns() {
    let view = table::document_view_trainings(&[training(1, "Village drill")]);
    assert_eq!(
        view.headers,
        vec![
            "Title",
            "Topic",
            "Address",
            "Block",
            "Date",
            "Time",
            "Duration (hrs)",
            "Trainees",
        ]
    );
    assert_eq!(view.rows[0][4].document_text(), "2026-04-02");
    assert_eq!(view.rows[0][5].document_text(), "11:00:00");
    assert_eq!(view.rows[0][6].document_text(), "2.5");
}
