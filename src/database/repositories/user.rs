//! User repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::user::{
    CreateProfessionalRequest, CreateUserRequest, ProfessionalOverview,
    UpdateProfessionalRequest, UpdateUserRequest, User,
};
use crate::utils::errors::AidtrackError;

/// Postgres duplicate-key errors carry SQLSTATE 23505; the unique
/// constraint is the final arbiter for username races.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user. The password must already be hashed by the caller.
    pub async fn create(
        &self,
        request: &CreateUserRequest,
        password_hash: &str,
    ) -> Result<i64, AidtrackError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, username, password, mobile_number, gender, age,
                               designation, department, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&request.name)
        .bind(&request.username)
        .bind(password_hash)
        .bind(request.mobile_number.clone().unwrap_or_default())
        .bind(&request.gender)
        .bind(request.age)
        .bind(request.designation.clone().unwrap_or_default())
        .bind(request.department.clone().unwrap_or_default())
        .bind(request.role.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AidtrackError::Validation("Username already exists".to_string())
            } else {
                err.into()
            }
        })?;

        Ok(id)
    }

    /// Create a professional account. The password must already be hashed.
    pub async fn create_professional(
        &self,
        request: &CreateProfessionalRequest,
        password_hash: &str,
    ) -> Result<i64, AidtrackError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, username, password, mobile_number, gender, age,
                               designation, department, specialization, experience_years,
                               role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'professional', $11)
            RETURNING id
            "#,
        )
        .bind(&request.name)
        .bind(&request.username)
        .bind(password_hash)
        .bind(&request.mobile_number)
        .bind(&request.gender)
        .bind(request.age)
        .bind(request.designation.clone().unwrap_or_default())
        .bind(request.department.clone().unwrap_or_default())
        .bind(request.specialization.clone().unwrap_or_default())
        .bind(request.experience_years.unwrap_or(0))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AidtrackError::Validation("Username already exists".to_string())
            } else {
                err.into()
            }
        })?;

        Ok(id)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AidtrackError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, username, password, role, mobile_number, gender, age, department, designation, specialization, experience_years, created_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AidtrackError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, username, password, role, mobile_number, gender, age, department, designation, specialization, experience_years, created_at FROM users WHERE username = $1"
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by username and claimed role. A role mismatch behaves like
    /// an unknown user.
    pub async fn find_by_username_and_role(
        &self,
        username: &str,
        role: &str,
    ) -> Result<Option<User>, AidtrackError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, username, password, role, mobile_number, gender, age, department, designation, specialization, experience_years, created_at FROM users WHERE username = $1 AND role = $2"
        )
        .bind(username)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List all users ordered by name
    pub async fn list_all(&self) -> Result<Vec<User>, AidtrackError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, username, password, role, mobile_number, gender, age, department, designation, specialization, experience_years, created_at FROM users ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// List all users, newest first, for exports and the record browser
    pub async fn list_newest_first(&self) -> Result<Vec<User>, AidtrackError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, username, password, role, mobile_number, gender, age, department, designation, specialization, experience_years, created_at FROM users ORDER BY created_at DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// List professional accounts ordered by name
    pub async fn list_professionals(&self) -> Result<Vec<User>, AidtrackError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, username, password, role, mobile_number, gender, age, department, designation, specialization, experience_years, created_at FROM users WHERE role = 'professional' ORDER BY name"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Professionals with conducted/registered totals for the admin dashboard
    pub async fn professional_overviews(&self) -> Result<Vec<ProfessionalOverview>, AidtrackError> {
        let overviews = sqlx::query_as::<_, ProfessionalOverview>(
            r#"
            SELECT u.id, u.name, u.username, u.mobile_number, u.gender, u.age,
                   u.department, u.designation, u.specialization, u.experience_years,
                   u.created_at,
                   COUNT(DISTINCT t.id) AS total_trainings,
                   COUNT(DISTINCT tr.id) AS total_trainees_trained
            FROM users u
            LEFT JOIN trainings t ON u.id = t.conducted_by
            LEFT JOIN trainees tr ON u.id = tr.registered_by
            WHERE u.role = 'professional'
            GROUP BY u.id
            ORDER BY u.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(overviews)
    }

    /// Partial update; only supplied fields are written. The password, when
    /// given, must already be hashed by the caller.
    pub async fn update(
        &self,
        id: i64,
        request: &UpdateUserRequest,
        password_hash: Option<String>,
    ) -> Result<u64, AidtrackError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                username = COALESCE($3, username),
                mobile_number = COALESCE($4, mobile_number),
                role = COALESCE($5, role),
                gender = COALESCE($6, gender),
                age = COALESCE($7, age),
                department = COALESCE($8, department),
                designation = COALESCE($9, designation),
                password = COALESCE($10, password)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(request.name.clone())
        .bind(request.username.clone())
        .bind(request.mobile_number.clone())
        .bind(request.role.map(|role| role.as_str().to_string()))
        .bind(request.gender.clone())
        .bind(request.age)
        .bind(request.department.clone())
        .bind(request.designation.clone())
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AidtrackError::Validation("Username already exists".to_string())
            } else {
                err.into()
            }
        })?;

        Ok(result.rows_affected())
    }

    /// Partial update scoped to professional accounts
    pub async fn update_professional(
        &self,
        id: i64,
        request: &UpdateProfessionalRequest,
    ) -> Result<u64, AidtrackError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                username = COALESCE($3, username),
                mobile_number = COALESCE($4, mobile_number),
                gender = COALESCE($5, gender),
                age = COALESCE($6, age),
                department = COALESCE($7, department),
                designation = COALESCE($8, designation),
                specialization = COALESCE($9, specialization),
                experience_years = COALESCE($10, experience_years)
            WHERE id = $1 AND role = 'professional'
            "#,
        )
        .bind(id)
        .bind(request.name.clone())
        .bind(request.username.clone())
        .bind(request.mobile_number.clone())
        .bind(request.gender.clone())
        .bind(request.age)
        .bind(request.department.clone())
        .bind(request.designation.clone())
        .bind(request.specialization.clone())
        .bind(request.experience_years)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AidtrackError::Validation("Username already exists".to_string())
            } else {
                err.into()
            }
        })?;

        Ok(result.rows_affected())
    }

    /// Replace a stored credential. Used by the rehash-on-login path.
    pub async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AidtrackError> {
        sqlx::query("UPDATE users SET password = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete a user with referential cleanup: trainings conducted by the
    /// user are removed, trainee registrations are orphaned (nulled), then
    /// the user row is deleted. Runs in one transaction.
    pub async fn delete_cascading(&self, id: i64) -> Result<bool, AidtrackError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM trainings WHERE conducted_by = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE trainees SET registered_by = NULL WHERE registered_by = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Same cascade as [`delete_cascading`], scoped to professional accounts.
    pub async fn delete_professional_cascading(&self, id: i64) -> Result<bool, AidtrackError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM trainings WHERE conducted_by = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE trainees SET registered_by = NULL WHERE registered_by = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role = 'professional'")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total user count
    pub async fn count(&self) -> Result<i64, AidtrackError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
