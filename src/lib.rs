//! Aidtrack
//!
//! Role-based administrative backend for a first-aid/CPR training
//! programme. This library provides the configuration, persistence,
//! business services and HTTP surface for managing user accounts, trainee
//! registrations and training sessions, with spreadsheet and document
//! report exports.

pub mod api;
pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{AidtrackError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
