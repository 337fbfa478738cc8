//! User service implementation
//!
//! Record access for user accounts and the professionals sub-resource.
//! All operations here are admin-gated at the HTTP layer; this service
//! enforces the record-level rules (uniqueness, self-delete rejection,
//! referential cleanup).

use tracing::{debug, info};

use crate::database::UserRepository;
use crate::models::user::{
    CreateProfessionalRequest, CreateUserRequest, ProfessionalOverview,
    UpdateProfessionalRequest, UpdateUserRequest, User,
};
use crate::services::auth::SessionUser;
use crate::utils::errors::{AidtrackError, Result};
use crate::utils::password;

#[derive(Debug, Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// List all user accounts ordered by name
    pub async fn list(&self) -> Result<Vec<User>> {
        self.users.list_all().await
    }

    /// List all user accounts, newest first, for the record browser
    pub async fn list_newest_first(&self) -> Result<Vec<User>> {
        self.users.list_newest_first().await
    }

    /// Get a single user
    pub async fn get(&self, id: i64) -> Result<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AidtrackError::NotFound("User not found".to_string()))
    }

    /// Create a user account. The username pre-check is advisory; the store
    /// unique constraint decides races.
    pub async fn create(&self, request: &CreateUserRequest) -> Result<i64> {
        request.validate()?;

        if self.users.find_by_username(&request.username).await?.is_some() {
            return Err(AidtrackError::Validation(
                "Username already exists".to_string(),
            ));
        }

        let hash = password::hash_password(&request.password)?;
        let id = self.users.create(request, &hash).await?;
        info!(user_id = id, username = %request.username, "user created");
        Ok(id)
    }

    /// Partial update. A present, non-empty password is hashed before the
    /// write; an empty password field is ignored.
    pub async fn update(&self, id: i64, request: &UpdateUserRequest) -> Result<()> {
        let password_hash = match request.password.as_deref() {
            Some(plaintext) if !plaintext.is_empty() => {
                Some(password::hash_password(plaintext)?)
            }
            _ => None,
        };

        let affected = self.users.update(id, request, password_hash).await?;
        if affected == 0 {
            return Err(AidtrackError::NotFound("User not found".to_string()));
        }
        info!(user_id = id, "user updated");
        Ok(())
    }

    /// Delete a user with referential cleanup. The acting admin cannot
    /// delete their own account.
    pub async fn delete(&self, id: i64, actor: &SessionUser) -> Result<()> {
        if id == actor.id {
            return Err(AidtrackError::Validation(
                "Cannot delete your own account".to_string(),
            ));
        }

        if !self.users.delete_cascading(id).await? {
            return Err(AidtrackError::NotFound("User not found".to_string()));
        }
        info!(user_id = id, deleted_by = actor.id, "user deleted");
        Ok(())
    }

    /// List professional accounts ordered by name
    pub async fn list_professionals(&self) -> Result<Vec<User>> {
        self.users.list_professionals().await
    }

    /// Professionals with conducted/registered totals for the admin dashboard
    pub async fn professional_overviews(&self) -> Result<Vec<ProfessionalOverview>> {
        self.users.professional_overviews().await
    }

    /// Create a professional account. The initial password is the hash of
    /// the mobile number, which the professional is expected to change.
    pub async fn create_professional(&self, request: &CreateProfessionalRequest) -> Result<i64> {
        request.validate()?;

        if self.users.find_by_username(&request.username).await?.is_some() {
            return Err(AidtrackError::Validation(
                "Username already exists".to_string(),
            ));
        }

        let hash = password::hash_password(&request.mobile_number)?;
        let id = self.users.create_professional(request, &hash).await?;
        info!(user_id = id, username = %request.username, "professional created");
        Ok(id)
    }

    /// Partial update scoped to professional accounts
    pub async fn update_professional(
        &self,
        id: i64,
        request: &UpdateProfessionalRequest,
    ) -> Result<()> {
        let affected = self.users.update_professional(id, request).await?;
        if affected == 0 {
            return Err(AidtrackError::NotFound(
                "Professional not found".to_string(),
            ));
        }
        info!(user_id = id, "professional updated");
        Ok(())
    }

    /// Delete a professional account with the same referential cleanup as
    /// a user delete.
    pub async fn delete_professional(&self, id: i64, actor: &SessionUser) -> Result<()> {
        debug!(user_id = id, deleted_by = actor.id, "deleting professional");
        if !self.users.delete_professional_cascading(id).await? {
            return Err(AidtrackError::NotFound(
                "Professional not found".to_string(),
            ));
        }
        info!(user_id = id, deleted_by = actor.id, "professional deleted");
        Ok(())
    }

    /// Total user count
    pub async fn count(&self) -> Result<i64> {
        self.users.count().await
    }
}
