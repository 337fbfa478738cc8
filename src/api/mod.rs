//! HTTP surface
//!
//! Route registration for page routes, the JSON API and export downloads.

pub mod error;
pub mod export;
pub mod pages;
pub mod professionals;
pub mod session;
pub mod trainees;
pub mod trainings;
pub mod users;

pub use error::ApiResult;
pub use session::{session_middleware, SessionContext};

use actix_web::web;

use crate::utils::errors::AidtrackError;

/// Register all routes and request-payload error handling.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AidtrackError::Validation(err.to_string()).into());

    cfg.app_data(json_config)
        .service(pages::index)
        .service(pages::login_form)
        .service(pages::login)
        .service(pages::logout)
        .service(pages::admin_dashboard)
        .service(pages::professional_dashboard)
        .service(pages::data_browser)
        .service(
            web::scope("/api")
                .service(users::list_users)
                .service(users::add_user)
                .service(users::get_user)
                .service(users::update_user)
                .service(users::delete_user)
                .service(professionals::list_professionals)
                .service(professionals::add_professional)
                .service(professionals::update_professional)
                .service(professionals::delete_professional)
                .service(trainees::list_trainees)
                .service(trainees::register_trainee)
                .service(trainees::get_trainee)
                .service(trainees::update_trainee)
                .service(trainees::delete_trainee)
                .service(trainings::list_trainings)
                .service(trainings::create_training)
                .service(trainings::get_training)
                .service(trainings::update_training)
                .service(trainings::delete_training),
        )
        .service(
            web::scope("/export")
                .service(export::export_excel)
                .service(export::export_pdf),
        );
}
