//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod export;
pub mod trainee;
pub mod training;
pub mod user;

// Re-export commonly used services
pub use auth::{AuthService, SessionUser};
pub use export::{ExportFile, ExportFormat, ExportService, ExportTable};
pub use trainee::TraineeService;
pub use training::TrainingService;
pub use user::UserService;

use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub trainee_service: TraineeService,
    pub training_service: TrainingService,
    pub export_service: ExportService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(db: DatabaseService) -> Self {
        let auth_service = AuthService::new(db.users.clone());
        let user_service = UserService::new(db.users.clone());
        let trainee_service = TraineeService::new(db.trainees.clone());
        let training_service = TrainingService::new(db.trainings.clone());
        let export_service = ExportService::new(db);

        Self {
            auth_service,
            user_service,
            trainee_service,
            training_service,
            export_service,
        }
    }
}
