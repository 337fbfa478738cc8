//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod trainee;
pub mod training;
pub mod user;

// Re-export commonly used models
pub use trainee::{CreateTraineeRequest, Trainee, TraineeWithRegistrant, UpdateTraineeRequest};
pub use training::{
    CreateTrainingRequest, Training, TrainingWithConductor, UpdateTrainingRequest,
};
pub use user::{
    CreateProfessionalRequest, CreateUserRequest, ProfessionalOverview, Role,
    UpdateProfessionalRequest, UpdateUserRequest, User,
};
