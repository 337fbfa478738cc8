//! Training session model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::AidtrackError;

/// A scheduled or completed training session. `trainees` is a headcount,
/// not a relation; `conducted_by` is a weak reference to the conducting
/// user. `status` is an open-ended string; `Planned` is the default.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Training {
    pub id: i64,
    pub title: String,
    pub training_topic: String,
    pub description: String,
    pub address: String,
    pub block: String,
    pub training_date: NaiveDate,
    pub training_time: NaiveTime,
    pub duration_hours: f64,
    pub trainees: i32,
    pub status: String,
    pub conducted_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrainingRequest {
    pub title: String,
    pub training_topic: String,
    pub description: Option<String>,
    pub address: String,
    pub block: String,
    pub training_date: NaiveDate,
    pub training_time: NaiveTime,
    pub duration_hours: f64,
    pub trainees: Option<i32>,
    pub status: Option<String>,
    pub conducted_by: i64,
}

impl CreateTrainingRequest {
    pub fn validate(&self) -> Result<(), AidtrackError> {
        for (field, value) in [
            ("title", &self.title),
            ("training_topic", &self.training_topic),
            ("address", &self.address),
            ("block", &self.block),
        ] {
            if value.trim().is_empty() {
                return Err(AidtrackError::Validation(format!(
                    "Field '{}' is required",
                    field
                )));
            }
        }
        if self.duration_hours <= 0.0 {
            return Err(AidtrackError::Validation(
                "Field 'duration_hours' must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTrainingRequest {
    pub title: Option<String>,
    pub training_topic: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub block: Option<String>,
    pub training_date: Option<NaiveDate>,
    pub training_time: Option<NaiveTime>,
    pub duration_hours: Option<f64>,
    pub trainees: Option<i32>,
    pub status: Option<String>,
    pub conducted_by: Option<i64>,
}

/// Training joined with the conductor's display name for dashboards and
/// the record browser.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TrainingWithConductor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub training: Training,
    pub conducted_by_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn create_request_rejects_non_positive_duration() {
        let request = CreateTrainingRequest {
            title: "CPR basics".to_string(),
            training_topic: "CPR".to_string(),
            description: None,
            address: "Ward 4".to_string(),
            block: "North".to_string(),
            training_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            training_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            duration_hours: 0.0,
            trainees: None,
            status: None,
            conducted_by: 7,
        };
        assert_matches!(request.validate(), Err(AidtrackError::Validation(_)));
    }

    #[test]
    fn partial_update_deserializes_sparse_payloads() {
        let update: UpdateTrainingRequest =
            serde_json::from_str(r#"{"status": "Completed"}"#).unwrap();
        assert_eq!(update.status.as_deref(), Some("Completed"));
        assert!(update.title.is_none());
        assert!(update.conducted_by.is_none());
    }
}
