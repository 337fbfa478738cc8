//! JSON API for trainee registrations
//!
//! Any authenticated user may list (scoped to own records unless admin),
//! read and register trainees; updates and deletes require admin role or
//! ownership of the record.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use crate::api::error::ApiResult;
use crate::api::session::SessionContext;
use crate::models::trainee::{CreateTraineeRequest, UpdateTraineeRequest};
use crate::services::ServiceFactory;

#[get("/trainees")]
pub async fn list_trainees(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user()?;
    let trainees = services.trainee_service.list_for(&actor).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "trainees": trainees })))
}

#[post("/trainees")]
pub async fn register_trainee(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    request: web::Json<CreateTraineeRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user()?;
    services.trainee_service.register(&request, &actor).await?;
    Ok(HttpResponse::Ok()
        .json(json!({ "success": true, "message": "Trainee registered successfully" })))
}

#[get("/trainees/{id}")]
pub async fn get_trainee(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    session.require_user()?;
    let trainee = services.trainee_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": trainee })))
}

#[put("/trainees/{id}")]
pub async fn update_trainee(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<i64>,
    request: web::Json<UpdateTraineeRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user()?;
    services
        .trainee_service
        .update(path.into_inner(), &request, &actor)
        .await?;
    Ok(HttpResponse::Ok()
        .json(json!({ "success": true, "message": "Trainee updated successfully" })))
}

#[delete("/trainees/{id}")]
pub async fn delete_trainee(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user()?;
    services
        .trainee_service
        .delete(path.into_inner(), &actor)
        .await?;
    Ok(HttpResponse::Ok()
        .json(json!({ "success": true, "message": "Trainee deleted successfully" })))
}
