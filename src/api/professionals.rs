//! JSON API for the professionals sub-resource (admin only)
//!
//! User subset filtered to `role = professional`. New professionals get an
//! initial credential derived from their mobile number.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use crate::api::error::ApiResult;
use crate::api::session::SessionContext;
use crate::models::user::{CreateProfessionalRequest, Role, UpdateProfessionalRequest};
use crate::services::ServiceFactory;

#[get("/professionals")]
pub async fn list_professionals(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let professionals = services.user_service.list_professionals().await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "professionals": professionals })))
}

#[post("/professionals")]
pub async fn add_professional(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    request: web::Json<CreateProfessionalRequest>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    services.user_service.create_professional(&request).await?;
    Ok(HttpResponse::Ok()
        .json(json!({ "success": true, "message": "Professional added successfully" })))
}

#[put("/professionals/{id}")]
pub async fn update_professional(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<i64>,
    request: web::Json<UpdateProfessionalRequest>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    services
        .user_service
        .update_professional(path.into_inner(), &request)
        .await?;
    Ok(HttpResponse::Ok()
        .json(json!({ "success": true, "message": "Professional updated successfully" })))
}

#[delete("/professionals/{id}")]
pub async fn delete_professional(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_role(Role::Admin)?;
    services
        .user_service
        .delete_professional(path.into_inner(), &actor)
        .await?;
    Ok(HttpResponse::Ok()
        .json(json!({ "success": true, "message": "Professional deleted successfully" })))
}
