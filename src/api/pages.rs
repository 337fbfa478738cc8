//! Page routes: login, logout, dashboards and the record browser
//!
//! Templates are an external collaborator; these handlers gate access,
//! gather the data and hand it to a deliberately minimal inline renderer.
//! Failures degrade to a flashed message plus redirect rather than a JSON
//! error body.

use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::api::session::SessionContext;
use crate::models::user::Role;
use crate::services::export::ExportTable;
use crate::services::ServiceFactory;
use crate::utils::errors::AidtrackError;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct BrowserQuery {
    pub table: Option<String>,
}

#[get("/")]
pub async fn index() -> HttpResponse {
    redirect("/login")
}

#[get("/login")]
pub async fn login_form(session: SessionContext) -> HttpResponse {
    let body = concat!(
        "<form method=\"post\" action=\"/login\">",
        "<input name=\"username\" placeholder=\"Username\">",
        "<input name=\"password\" type=\"password\" placeholder=\"Password\">",
        "<select name=\"role\">",
        "<option value=\"admin\">Admin</option>",
        "<option value=\"professional\">Professional</option>",
        "</select>",
        "<button type=\"submit\">Log in</button>",
        "</form>",
    );
    page("Login", session.take_flash(), body)
}

#[post("/login")]
pub async fn login(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    if form.username.is_empty() || form.password.is_empty() || form.role.is_empty() {
        session.flash("All fields are required");
        return redirect("/login");
    }

    // An unknown role behaves exactly like bad credentials.
    let Ok(role) = form.role.parse::<Role>() else {
        session.flash("Invalid credentials");
        return redirect("/login");
    };

    match services
        .auth_service
        .authenticate(&form.username, &form.password, role)
        .await
    {
        Ok(user) => {
            if let Err(err) = session.log_in(&user) {
                error!(error = %err, "failed to establish session");
                session.flash("Internal server error");
                return redirect("/login");
            }
            match user.role {
                Role::Admin => redirect("/admin"),
                Role::Professional => redirect("/professional"),
            }
        }
        Err(err) => {
            if !err.is_client_error() {
                error!(error = %err, "login failed");
            }
            session.flash(&err.client_message());
            redirect("/login")
        }
    }
}

#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.log_out();
    redirect("/login")
}

#[get("/admin")]
pub async fn admin_dashboard(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
) -> HttpResponse {
    let user = match session.current_user() {
        Some(user) if user.is_admin() => user,
        _ => return redirect("/login"),
    };

    match admin_dashboard_body(&services).await {
        Ok(body) => page(
            "Admin Dashboard",
            session.take_flash(),
            &format!("<p>Signed in as {}</p>{}", escape_html(&user.name), body),
        ),
        Err(err) => {
            error!(error = %err, "admin dashboard failed");
            session.flash("Database error");
            redirect("/login")
        }
    }
}

async fn admin_dashboard_body(services: &ServiceFactory) -> Result<String, AidtrackError> {
    let professionals = services.user_service.professional_overviews().await?;
    let trainees = services.trainee_service.list_with_registrant_names().await?;
    let trainings = services.training_service.list_with_conductor_names().await?;

    Ok(format!(
        "<h2>Professionals ({})</h2>{}<h2>Trainees ({})</h2>{}<h2>Trainings ({})</h2>{}",
        professionals.len(),
        table_markup(&professionals),
        trainees.len(),
        table_markup(&trainees),
        trainings.len(),
        table_markup(&trainings),
    ))
}

#[get("/professional")]
pub async fn professional_dashboard(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
) -> HttpResponse {
    let user = match session.current_user() {
        Some(user) if user.role == Role::Professional => user,
        _ => return redirect("/login"),
    };

    let trainees = services.trainee_service.list_for(&user).await;
    let trainings = services.training_service.list_for(&user).await;
    match (trainees, trainings) {
        (Ok(trainees), Ok(trainings)) => page(
            "Professional Dashboard",
            session.take_flash(),
            &format!(
                "<p>Signed in as {}</p><h2>My Trainees ({})</h2>{}<h2>My Trainings ({})</h2>{}",
                escape_html(&user.name),
                trainees.len(),
                table_markup(&trainees),
                trainings.len(),
                table_markup(&trainings),
            ),
        ),
        (Err(err), _) | (_, Err(err)) => {
            error!(error = %err, "professional dashboard failed");
            session.flash("Database error");
            redirect("/login")
        }
    }
}

#[get("/data")]
pub async fn data_browser(
    services: web::Data<ServiceFactory>,
    session: SessionContext,
    query: web::Query<BrowserQuery>,
) -> HttpResponse {
    if !matches!(session.current_user(), Some(user) if user.is_admin()) {
        return redirect("/login");
    }

    // Unknown table values fall back to the users table.
    let table = query
        .table
        .as_deref()
        .unwrap_or("users")
        .parse::<ExportTable>()
        .unwrap_or(ExportTable::Users);

    match data_browser_body(&services, table).await {
        Ok(body) => page("Records", session.take_flash(), &body),
        Err(err) => {
            error!(error = %err, "record browser failed");
            session.flash("Database error");
            redirect("/login")
        }
    }
}

async fn data_browser_body(
    services: &ServiceFactory,
    table: ExportTable,
) -> Result<String, AidtrackError> {
    let users_count = services.user_service.count().await?;
    let trainees_count = services.trainee_service.count().await?;
    let trainings_count = services.training_service.count().await?;

    let rows = match table {
        ExportTable::Users => table_markup(&services.user_service.list_newest_first().await?),
        ExportTable::Trainees => {
            table_markup(&services.trainee_service.list_with_registrant_names().await?)
        }
        ExportTable::Trainings => {
            table_markup(&services.training_service.list_with_conductor_names().await?)
        }
    };

    Ok(format!(
        "<p>Users: {} | Trainees: {} | Trainings: {}</p><h2>{}</h2>{}",
        users_count,
        trainees_count,
        trainings_count,
        table.as_str(),
        rows,
    ))
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

fn page(title: &str, flash: Option<String>, body: &str) -> HttpResponse {
    let flash_markup = flash
        .map(|message| format!("<p class=\"flash\">{}</p>", escape_html(&message)))
        .unwrap_or_default();
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(format!(
            "<!DOCTYPE html><html><head><title>{} - AIDTRACK</title></head><body><h1>{}</h1>{}{}</body></html>",
            escape_html(title),
            escape_html(title),
            flash_markup,
            body,
        ))
}

/// Generic table rendering over any serializable row shape. Column order
/// follows the serialized key order of the first row.
fn table_markup<T: Serialize>(items: &[T]) -> String {
    let values: Vec<serde_json::Value> = items
        .iter()
        .filter_map(|item| serde_json::to_value(item).ok())
        .collect();

    let Some(serde_json::Value::Object(first)) = values.first() else {
        return "<p>No records.</p>".to_string();
    };
    let headers: Vec<String> = first.keys().cloned().collect();

    let mut out = String::from("<table border=\"1\"><tr>");
    for header in &headers {
        out.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    out.push_str("</tr>");

    for value in &values {
        let serde_json::Value::Object(map) = value else {
            continue;
        };
        out.push_str("<tr>");
        for header in &headers {
            let cell = map.get(header).map(display_value).unwrap_or_default();
            out.push_str(&format!("<td>{}</td>", escape_html(&cell)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
    out
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: String,
        active: bool,
    }

    #[test]
    fn markup_escapes_untrusted_content() {
        let rows = vec![Row {
            name: "<script>alert(1)</script>".to_string(),
            active: true,
        }];
        let markup = table_markup(&rows);
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;script&gt;"));
    }

    #[test]
    fn empty_lists_render_a_placeholder() {
        let rows: Vec<Row> = vec![];
        assert_eq!(table_markup(&rows), "<p>No records.</p>");
    }
}
