//! Training service implementation
//!
//! Record access for training sessions, keyed on `conducted_by` with the
//! same ownership rules as trainees.

use tracing::info;

use crate::database::TrainingRepository;
use crate::models::training::{
    CreateTrainingRequest, Training, TrainingWithConductor, UpdateTrainingRequest,
};
use crate::services::auth::SessionUser;
use crate::utils::errors::{AidtrackError, Result};

#[derive(Debug, Clone)]
pub struct TrainingService {
    trainings: TrainingRepository,
}

impl TrainingService {
    pub fn new(trainings: TrainingRepository) -> Self {
        Self { trainings }
    }

    /// List trainings visible to the caller: all for admins, own records
    /// otherwise. Most recent date first.
    pub async fn list_for(&self, actor: &SessionUser) -> Result<Vec<Training>> {
        if actor.is_admin() {
            self.trainings.list_all().await
        } else {
            self.trainings.list_by_conductor(actor.id).await
        }
    }

    /// Get a single training
    pub async fn get(&self, id: i64) -> Result<Training> {
        self.trainings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AidtrackError::NotFound("Training not found".to_string()))
    }

    /// Create a training session
    pub async fn schedule(&self, request: &CreateTrainingRequest, actor: &SessionUser) -> Result<i64> {
        request.validate()?;
        let id = self.trainings.create(request).await?;
        info!(training_id = id, created_by = actor.id, "training created");
        Ok(id)
    }

    /// Partial update, allowed for admins and the conducting user. Bumps
    /// `updated_at` and nothing else beyond the supplied fields.
    pub async fn update(
        &self,
        id: i64,
        request: &UpdateTrainingRequest,
        actor: &SessionUser,
    ) -> Result<()> {
        self.check_ownership(id, actor, "Unauthorized to update this training")
            .await?;

        let affected = self.trainings.update(id, request).await?;
        if affected == 0 {
            return Err(AidtrackError::NotFound("Training not found".to_string()));
        }
        info!(training_id = id, updated_by = actor.id, "training updated");
        Ok(())
    }

    /// Delete, allowed for admins and the conducting user
    pub async fn delete(&self, id: i64, actor: &SessionUser) -> Result<()> {
        self.check_ownership(id, actor, "Unauthorized to delete this training")
            .await?;

        if !self.trainings.delete(id).await? {
            return Err(AidtrackError::NotFound("Training not found".to_string()));
        }
        info!(training_id = id, deleted_by = actor.id, "training deleted");
        Ok(())
    }

    /// All trainings with conductor display names, for the admin dashboard
    /// and record browser.
    pub async fn list_with_conductor_names(&self) -> Result<Vec<TrainingWithConductor>> {
        self.trainings.list_with_conductor_names().await
    }

    /// All trainings, newest first, for exports and the record browser
    pub async fn list_newest_first(&self) -> Result<Vec<Training>> {
        self.trainings.list_newest_first().await
    }

    /// Total training count
    pub async fn count(&self) -> Result<i64> {
        self.trainings.count().await
    }

    /// Admins own everything; anyone else must match the re-fetched
    /// conducting reference.
    async fn check_ownership(&self, id: i64, actor: &SessionUser, denial: &str) -> Result<()> {
        if actor.is_admin() {
            return Ok(());
        }

        match self.trainings.conductor_of(id).await? {
            None => Err(AidtrackError::NotFound("Training not found".to_string())),
            Some(conducted_by) if conducted_by == Some(actor.id) => Ok(()),
            Some(_) => Err(AidtrackError::Unauthorized(denial.to_string())),
        }
    }
}
