//! Trainee service implementation
//!
//! Record access for trainee registrations. Listing is scoped to the
//! caller's own records unless the caller is an admin; mutation and
//! deletion require admin role or ownership of the record, with the owning
//! reference re-fetched immediately before the write.

use tracing::info;

use crate::database::TraineeRepository;
use crate::models::trainee::{
    CreateTraineeRequest, Trainee, TraineeWithRegistrant, UpdateTraineeRequest,
};
use crate::services::auth::SessionUser;
use crate::utils::errors::{AidtrackError, Result};

#[derive(Debug, Clone)]
pub struct TraineeService {
    trainees: TraineeRepository,
}

impl TraineeService {
    pub fn new(trainees: TraineeRepository) -> Self {
        Self { trainees }
    }

    /// List trainees visible to the caller: all for admins, own records
    /// otherwise. Ordered by name.
    pub async fn list_for(&self, actor: &SessionUser) -> Result<Vec<Trainee>> {
        if actor.is_admin() {
            self.trainees.list_all().await
        } else {
            self.trainees.list_by_registrant(actor.id).await
        }
    }

    /// Get a single trainee
    pub async fn get(&self, id: i64) -> Result<Trainee> {
        self.trainees
            .find_by_id(id)
            .await?
            .ok_or_else(|| AidtrackError::NotFound("Trainee not found".to_string()))
    }

    /// Register a trainee on behalf of the acting user
    pub async fn register(&self, request: &CreateTraineeRequest, actor: &SessionUser) -> Result<i64> {
        request.validate()?;
        let id = self.trainees.create(request, actor.id).await?;
        info!(trainee_id = id, registered_by = actor.id, "trainee registered");
        Ok(id)
    }

    /// Partial update, allowed for admins and the registering user
    pub async fn update(
        &self,
        id: i64,
        request: &UpdateTraineeRequest,
        actor: &SessionUser,
    ) -> Result<()> {
        self.check_ownership(id, actor, "Unauthorized to update this trainee")
            .await?;

        let affected = self.trainees.update(id, request).await?;
        if affected == 0 {
            return Err(AidtrackError::NotFound("Trainee not found".to_string()));
        }
        info!(trainee_id = id, updated_by = actor.id, "trainee updated");
        Ok(())
    }

    /// Delete, allowed for admins and the registering user
    pub async fn delete(&self, id: i64, actor: &SessionUser) -> Result<()> {
        self.check_ownership(id, actor, "Unauthorized to delete this trainee")
            .await?;

        if !self.trainees.delete(id).await? {
            return Err(AidtrackError::NotFound("Trainee not found".to_string()));
        }
        info!(trainee_id = id, deleted_by = actor.id, "trainee deleted");
        Ok(())
    }

    /// All trainees with registrant display names, for the admin dashboard
    /// and record browser.
    pub async fn list_with_registrant_names(&self) -> Result<Vec<TraineeWithRegistrant>> {
        self.trainees.list_with_registrant_names().await
    }

    /// All trainees, newest first, for exports and the record browser
    pub async fn list_newest_first(&self) -> Result<Vec<Trainee>> {
        self.trainees.list_newest_first().await
    }

    /// Total trainee count
    pub async fn count(&self) -> Result<i64> {
        self.trainees.count().await
    }

    /// Admins own everything; anyone else must match the re-fetched
    /// registering reference.
    async fn check_ownership(&self, id: i64, actor: &SessionUser, denial: &str) -> Result<()> {
        if actor.is_admin() {
            return Ok(());
        }

        match self.trainees.registrant_of(id).await? {
            None => Err(AidtrackError::NotFound("Trainee not found".to_string())),
            Some(registered_by) if registered_by == Some(actor.id) => Ok(()),
            Some(_) => Err(AidtrackError::Unauthorized(denial.to_string())),
        }
    }
}
