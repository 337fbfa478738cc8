//! JSON API for user accounts (admin only)

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use crate::api::error::ApiResult;
use crate::api::session::SessionContext;
use crate::models::user::{CreateUserRequest, Role, UpdateUserRequest};
use crate::services::ServiceFactory;

#[get("/users")]
pub async fn list_users(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let users = services.user_service.list().await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "users": users })))
}

#[post("/users")]
pub async fn add_user(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    request: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    services.user_service.create(&request).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "User added successfully" })))
}

#[get("/users/{id}")]
pub async fn get_user(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let user = services.user_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "data": user })))
}

#[put("/users/{id}")]
pub async fn update_user(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<i64>,
    request: web::Json<UpdateUserRequest>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    services
        .user_service
        .update(path.into_inner(), &request)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "User updated successfully" })))
}

#[delete("/users/{id}")]
pub async fn delete_user(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_role(Role::Admin)?;
    services
        .user_service
        .delete(path.into_inner(), &actor)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "User deleted successfully" })))
}
