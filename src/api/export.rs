//! Export download routes (admin only)
//!
//! The table selector is validated before any store access; the rendered
//! file is returned as an attachment download.

use actix_web::http::header;
use actix_web::{get, web, HttpResponse};

use crate::api::error::ApiResult;
use crate::api::session::SessionContext;
use crate::models::user::Role;
use crate::services::export::{ExportFile, ExportFormat, ExportTable};
use crate::services::ServiceFactory;

#[get("/excel/{table}")]
pub async fn export_excel(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let table: ExportTable = path.into_inner().parse()?;
    let file = services
        .export_service
        .export(table, ExportFormat::Excel)
        .await?;
    Ok(download_response(file))
}

#[get("/pdf/{table}")]
pub async fn export_pdf(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let table: ExportTable = path.into_inner().parse()?;
    let file = services
        .export_service
        .export(table, ExportFormat::Pdf)
        .await?;
    Ok(download_response(file))
}

fn download_response(file: ExportFile) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(file.content_type)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.filename),
        ))
        .body(file.bytes)
}
