//! Database service layer
//!
//! Bundles the per-entity repositories behind one handle that is cheap to
//! clone into services and handlers.

use crate::database::{DatabasePool, TraineeRepository, TrainingRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub trainees: TraineeRepository,
    pub trainings: TrainingRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            trainees: TraineeRepository::new(pool.clone()),
            trainings: TrainingRepository::new(pool),
        }
    }
}
