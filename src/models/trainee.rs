//! Trainee model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::AidtrackError;

/// A person who received training. `registered_by` is a weak reference to
/// the registering user and is nulled when that user is deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Trainee {
    pub id: i64,
    pub name: String,
    pub mobile_number: String,
    pub gender: String,
    pub age: i32,
    pub department: String,
    pub designation: String,
    pub address: String,
    pub block: String,
    pub training_date: NaiveDate,
    pub cpr_training: bool,
    pub first_aid_kit_given: bool,
    pub life_saving_skills: bool,
    pub registered_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTraineeRequest {
    pub name: String,
    pub mobile_number: Option<String>,
    pub gender: String,
    pub age: i32,
    pub department: String,
    pub designation: Option<String>,
    pub address: String,
    pub block: String,
    pub training_date: NaiveDate,
    pub cpr_training: Option<bool>,
    pub first_aid_kit_given: Option<bool>,
    pub life_saving_skills: Option<bool>,
}

impl CreateTraineeRequest {
    pub fn validate(&self) -> Result<(), AidtrackError> {
        for (field, value) in [
            ("name", &self.name),
            ("gender", &self.gender),
            ("department", &self.department),
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
        if self.age <= 0 {
            return Err(AidtrackError::Validation(
                "Field 'age' must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTraineeRequest {
    pub name: Option<String>,
    pub mobile_number: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub address: Option<String>,
    pub block: Option<String>,
    pub training_date: Option<NaiveDate>,
    pub cpr_training: Option<bool>,
    pub first_aid_kit_given: Option<bool>,
    pub life_saving_skills: Option<bool>,
}

/// Trainee joined with the registrant's display name for dashboards and
/// the record browser.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TraineeWithRegistrant {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub trainee: Trainee,
    pub registered_by_name: Option<String>,
}
