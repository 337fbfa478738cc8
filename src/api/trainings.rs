//! JSON API for training sessions
//!
//! Same access pattern as trainees, keyed on the conducting user.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use crate::api::error::ApiResult;
use crate::api::session::SessionContext;
use crate::models::training::{CreateTrainingRequest, UpdateTrainingRequest};
use crate::services::ServiceFactory;

#[get("/trainings")]
pub async fn list_trainings(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user()?;
    let trainings = services.training_service.list_for(&actor).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "trainings": trainings })))
}

#[post("/trainings")]
pub async fn create_training(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    request: web::Json<CreateTrainingRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user()?;
    services.training_service.schedule(&request, &actor).await?;
    Ok(HttpResponse::Ok()
        .json(json!({ "success": true, "message": "Training created successfully" })))
}

#[get("/trainings/{id}")]
pub async fn get_training(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    session.require_user()?;
    let training = services.training_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": training })))
}

#[put("/trainings/{id}")]
pub async fn update_training(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<i64>,
    request: web::Json<UpdateTrainingRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user()?;
    services
        .training_service
        .update(path.into_inner(), &request, &actor)
        .await?;
    Ok(HttpResponse::Ok()
        .json(json!({ "success": true, "message": "Training updated successfully" })))
}

#[delete("/trainings/{id}")]
pub async fn delete_training(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user()?;
    services
        .training_service
        .delete(path.into_inner(), &actor)
        .await?;
    Ok(HttpResponse::Ok()
        .json(json!({ "success": true, "message": "Training deleted successfully" })))
}
