//! Trainee repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::trainee::{
    CreateTraineeRequest, Trainee, TraineeWithRegistrant, UpdateTraineeRequest,
};
use crate::utils::errors::AidtrackError;

#[derive(Debug, Clone)]
pub struct TraineeRepository {
    pool: PgPool,
}

impl TraineeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new trainee
    pub async fn create(
        &self,
        request: &CreateTraineeRequest,
        registered_by: i64,
    ) -> Result<i64, AidtrackError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO trainees (name, mobile_number, gender, age, department, designation,
                                  address, block, training_date, cpr_training,
                                  first_aid_kit_given, life_saving_skills, registered_by,
                                  created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
        .bind(&request.name)
        .bind(request.mobile_number.clone().unwrap_or_default())
        .bind(&request.gender)
        .bind(request.age)
        .bind(&request.department)
        .bind(request.designation.clone().unwrap_or_default())
        .bind(&request.address)
        .bind(&request.block)
        .bind(request.training_date)
        .bind(request.cpr_training.unwrap_or(false))
        .bind(request.first_aid_kit_given.unwrap_or(false))
        .bind(request.life_saving_skills.unwrap_or(false))
        .bind(registered_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Find trainee by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Trainee>, AidtrackError> {
        let trainee = sqlx::query_as::<_, Trainee>(
            "SELECT id, name, mobile_number, gender, age, department, designation, address, block, training_date, cpr_training, first_aid_kit_given, life_saving_skills, registered_by, created_at FROM trainees WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trainee)
    }

    /// List all trainees ordered by name
    pub async fn list_all(&self) -> Result<Vec<Trainee>, AidtrackError> {
        let trainees = sqlx::query_as::<_, Trainee>(
            "SELECT id, name, mobile_number, gender, age, department, designation, address, block, training_date, cpr_training, first_aid_kit_given, life_saving_skills, registered_by, created_at FROM trainees ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trainees)
    }

    /// List trainees registered by one user, ordered by name
    pub async fn list_by_registrant(&self, user_id: i64) -> Result<Vec<Trainee>, AidtrackError> {
        let trainees = sqlx::query_as::<_, Trainee>(
            "SELECT id, name, mobile_number, gender, age, department, designation, address, block, training_date, cpr_training, first_aid_kit_given, life_saving_skills, registered_by, created_at FROM trainees WHERE registered_by = $1 ORDER BY name"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trainees)
    }

    /// List all trainees, newest first, for exports and the record browser
    pub async fn list_newest_first(&self) -> Result<Vec<Trainee>, AidtrackError> {
        let trainees = sqlx::query_as::<_, Trainee>(
            "SELECT id, name, mobile_number, gender, age, department, designation, address, block, training_date, cpr_training, first_aid_kit_given, life_saving_skills, registered_by, created_at FROM trainees ORDER BY created_at DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trainees)
    }

    /// All trainees joined with the registrant's display name
    pub async fn list_with_registrant_names(
        &self,
    ) -> Result<Vec<TraineeWithRegistrant>, AidtrackError> {
        let trainees = sqlx::query_as::<_, TraineeWithRegistrant>(
            r#"
            SELECT tr.id, tr.name, tr.mobile_number, tr.gender, tr.age, tr.department,
                   tr.designation, tr.address, tr.block, tr.training_date, tr.cpr_training,
                   tr.first_aid_kit_given, tr.life_saving_skills, tr.registered_by,
                   tr.created_at,
                   u.name AS registered_by_name
            FROM trainees tr
            LEFT JOIN users u ON tr.registered_by = u.id
            ORDER BY tr.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trainees)
    }

    /// Owning reference of a trainee, re-fetched immediately before delete.
    /// `None` means the trainee does not exist.
    pub async fn registrant_of(&self, id: i64) -> Result<Option<Option<i64>>, AidtrackError> {
        let row = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT registered_by FROM trainees WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Partial update; only supplied fields are written
    pub async fn update(
        &self,
        id: i64,
        request: &UpdateTraineeRequest,
    ) -> Result<u64, AidtrackError> {
        let result = sqlx::query(
            r#"
            UPDATE trainees
            SET name = COALESCE($2, name),
                mobile_number = COALESCE($3, mobile_number),
                gender = COALESCE($4, gender),
                age = COALESCE($5, age),
                department = COALESCE($6, department),
                designation = COALESCE($7, designation),
                address = COALESCE($8, address),
                block = COALESCE($9, block),
                training_date = COALESCE($10, training_date),
                cpr_training = COALESCE($11, cpr_training),
                first_aid_kit_given = COALESCE($12, first_aid_kit_given),
                life_saving_skills = COALESCE($13, life_saving_skills)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(request.name.clone())
        .bind(request.mobile_number.clone())
        .bind(request.gender.clone())
        .bind(request.age)
        .bind(request.department.clone())
        .bind(request.designation.clone())
        .bind(request.address.clone())
        .bind(request.block.clone())
        .bind(request.training_date)
        .bind(request.cpr_training)
        .bind(request.first_aid_kit_given)
        .bind(request.life_saving_skills)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete trainee
    pub async fn delete(&self, id: i64) -> Result<bool, AidtrackError> {
        let result = sqlx::query("DELETE FROM trainees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Total trainee count
    pub async fn count(&self) -> Result<i64, AidtrackError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM trainees")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
