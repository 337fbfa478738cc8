//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::utils::errors::AidtrackError;

/// Account role. The store column is open TEXT; this enum is the
/// authoritative set used by the login form, session and authorization
/// checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Professional,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Professional => "professional",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AidtrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "professional" => Ok(Role::Professional),
            other => Err(AidtrackError::Validation(format!(
                "Unknown role: {}",
                other
            ))),
        }
    }
}

/// User account row. The password credential is never serialized into API
/// payloads or page data.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub mobile_number: String,
    pub gender: String,
    pub age: i32,
    pub department: String,
    pub designation: String,
    pub specialization: String,
    pub experience_years: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
    pub password: String,
    pub mobile_number: Option<String>,
    pub gender: String,
    pub age: i32,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub role: Role,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), AidtrackError> {
        for (field, value) in [
            ("name", &self.name),
            ("username", &self.username),
            ("password", &self.password),
            ("gender", &self.gender),
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

/// Partial update: only supplied fields are written. A present, non-empty
/// password is hashed before write.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub mobile_number: Option<String>,
    pub role: Option<Role>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfessionalRequest {
    pub name: String,
    pub username: String,
    pub mobile_number: String,
    pub gender: String,
    pub age: i32,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub specialization: Option<String>,
    pub experience_years: Option<i32>,
}

impl CreateProfessionalRequest {
    pub fn validate(&self) -> Result<(), AidtrackError> {
        for (field, value) in [
            ("name", &self.name),
            ("username", &self.username),
            ("mobile_number", &self.mobile_number),
            ("gender", &self.gender),
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
pub struct UpdateProfessionalRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub mobile_number: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub specialization: Option<String>,
    pub experience_years: Option<i32>,
}

/// Professional row enriched with conducted/registered totals for the
/// admin dashboard.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfessionalOverview {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub mobile_number: String,
    pub gender: String,
    pub age: i32,
    pub department: String,
    pub designation: String,
    pub specialization: String,
    pub experience_years: i32,
    pub created_at: DateTime<Utc>,
    pub total_trainings: i64,
    pub total_trainees_trained: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn role_round_trips_through_str() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::Professional.as_str(), "professional");
        assert_matches!(Role::from_str("root"), Err(AidtrackError::Validation(_)));
    }

    #[test]
    fn serialized_user_omits_password() {
        let user = User {
            id: 1,
            name: "Asha".to_string(),
            username: "asha".to_string(),
            password: "$argon2id$secret".to_string(),
            role: "admin".to_string(),
            mobile_number: String::new(),
            gender: "female".to_string(),
            age: 34,
            department: String::new(),
            designation: String::new(),
            specialization: String::new(),
            experience_years: 0,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "asha");
    }

    #[test]
    fn blank_required_fields_fail_validation() {
        let request = CreateUserRequest {
            name: "  ".to_string(),
            username: "x".to_string(),
            password: "pw".to_string(),
            mobile_number: None,
            gender: "male".to_string(),
            age: 30,
            designation: None,
            department: None,
            role: Role::Admin,
        };
        assert_matches!(request.validate(), Err(AidtrackError::Validation(_)));
    }
}
