//! Training repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::training::{
    CreateTrainingRequest, Training, TrainingWithConductor, UpdateTrainingRequest,
};
use crate::utils::errors::AidtrackError;

#[derive(Debug, Clone)]
pub struct TrainingRepository {
    pool: PgPool,
}

impl TrainingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new training session
    pub async fn create(&self, request: &CreateTrainingRequest) -> Result<i64, AidtrackError> {
        let now = Utc::now();
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO trainings (title, description, training_topic, address, block,
                                   training_date, training_time, duration_hours, trainees,
                                   status, conducted_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(&request.title)
        .bind(request.description.clone().unwrap_or_default())
        .bind(&request.training_topic)
        .bind(&request.address)
        .bind(&request.block)
        .bind(request.training_date)
        .bind(request.training_time)
        .bind(request.duration_hours)
        .bind(request.trainees.unwrap_or(0))
        .bind(request.status.clone().unwrap_or_else(|| "Planned".to_string()))
        .bind(request.conducted_by)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Find training by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Training>, AidtrackError> {
        let training = sqlx::query_as::<_, Training>(
            "SELECT id, title, training_topic, description, address, block, training_date, training_time, duration_hours, trainees, status, conducted_by, created_at, updated_at FROM trainings WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(training)
    }

    /// List all trainings, most recent date first
    pub async fn list_all(&self) -> Result<Vec<Training>, AidtrackError> {
        let trainings = sqlx::query_as::<_, Training>(
            "SELECT id, title, training_topic, description, address, block, training_date, training_time, duration_hours, trainees, status, conducted_by, created_at, updated_at FROM trainings ORDER BY training_date DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trainings)
    }

    /// List trainings conducted by one user, most recent date first
    pub async fn list_by_conductor(&self, user_id: i64) -> Result<Vec<Training>, AidtrackError> {
        let trainings = sqlx::query_as::<_, Training>(
            "SELECT id, title, training_topic, description, address, block, training_date, training_time, duration_hours, trainees, status, conducted_by, created_at, updated_at FROM trainings WHERE conducted_by = $1 ORDER BY training_date DESC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trainings)
    }

    /// List all trainings, newest first, for exports and the record browser
    pub async fn list_newest_first(&self) -> Result<Vec<Training>, AidtrackError> {
        let trainings = sqlx::query_as::<_, Training>(
            "SELECT id, title, training_topic, description, address, block, training_date, training_time, duration_hours, trainees, status, conducted_by, created_at, updated_at FROM trainings ORDER BY created_at DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trainings)
    }

    /// All trainings joined with the conductor's display name
    pub async fn list_with_conductor_names(
        &self,
    ) -> Result<Vec<TrainingWithConductor>, AidtrackError> {
        let trainings = sqlx::query_as::<_, TrainingWithConductor>(
            r#"
            SELECT t.id, t.title, t.training_topic, t.description, t.address, t.block,
                   t.training_date, t.training_time, t.duration_hours, t.trainees,
                   t.status, t.conducted_by, t.created_at, t.updated_at,
                   u.name AS conducted_by_name
            FROM trainings t
            LEFT JOIN users u ON t.conducted_by = u.id
            ORDER BY t.training_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trainings)
    }

    /// Owning reference of a training, re-fetched immediately before delete.
    /// `None` means the training does not exist.
    pub async fn conductor_of(&self, id: i64) -> Result<Option<Option<i64>>, AidtrackError> {
        let row = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT conducted_by FROM trainings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Partial update; only supplied fields are written, and `updated_at`
    /// is bumped as a side effect.
    pub async fn update(
        &self,
        id: i64,
        request: &UpdateTrainingRequest,
    ) -> Result<u64, AidtrackError> {
        let result = sqlx::query(
            r#"
            UPDATE trainings
            SET title = COALESCE($2, title),
                training_topic = COALESCE($3, training_topic),
                description = COALESCE($4, description),
                address = COALESCE($5, address),
                block = COALESCE($6, block),
                training_date = COALESCE($7, training_date),
                training_time = COALESCE($8, training_time),
                duration_hours = COALESCE($9, duration_hours),
                trainees = COALESCE($10, trainees),
                status = COALESCE($11, status),
                conducted_by = COALESCE($12, conducted_by),
                updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(request.title.clone())
        .bind(request.training_topic.clone())
        .bind(request.description.clone())
        .bind(request.address.clone())
        .bind(request.block.clone())
        .bind(request.training_date)
        .bind(request.training_time)
        .bind(request.duration_hours)
        .bind(request.trainees)
        .bind(request.status.clone())
        .bind(request.conducted_by)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete training
    pub async fn delete(&self, id: i64) -> Result<bool, AidtrackError> {
        let result = sqlx::query("DELETE FROM trainings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Total training count
    pub async fn count(&self) -> Result<i64, AidtrackError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM trainings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
