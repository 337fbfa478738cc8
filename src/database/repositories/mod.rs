//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod trainee;
pub mod training;
pub mod user;

// Re-export repositories
pub use trainee::TraineeRepository;
pub use training::TrainingRepository;
pub use user::UserRepository;
