//! Session gate behaviour over the cookie store
//!
//! Drives `SessionContext` through an Actix test service with a throwaway
//! signing key: identity round-trips through the signed cookie, missing
//! sessions and role mismatches are rejected, logout empties the cookie.

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Cookie, Key};
use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};

use aidtrack::api::SessionContext;
use aidtrack::models::user::Role;
use aidtrack::services::auth::SessionUser;
use aidtrack::utils::errors::AidtrackError;

fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_string())
        .cookie_secure(false)
        .build()
}

fn fixture_user(role: Role) -> SessionUser {
    SessionUser {
        id: 7,
        username: "meera".to_string(),
        role,
        name: "Meera".to_string(),
    }
}

macro_rules! session_app {
    () => {
        test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/login-as-admin",
                    web::get().to(|session: SessionContext| async move {
                        session.log_in(&fixture_user(Role::Admin))?;
                        Ok::<_, AidtrackError>(HttpResponse::Ok().finish())
                    }),
                )
                .route(
                    "/login-as-professional",
                    web::get().to(|session: SessionContext| async move {
                        session.log_in(&fixture_user(Role::Professional))?;
                        Ok::<_, AidtrackError>(HttpResponse::Ok().finish())
                    }),
                )
                .route(
                    "/whoami",
                    web::get().to(|session: SessionContext| async move {
                        let user = session.require_user()?;
                        Ok::<_, AidtrackError>(HttpResponse::Ok().body(user.username))
                    }),
                )
                .route(
                    "/admin-only",
                    web::get().to(|session: SessionContext| async move {
                        session.require_role(Role::Admin)?;
                        Ok::<_, AidtrackError>(HttpResponse::Ok().finish())
                    }),
                )
                .route(
                    "/logout",
                    web::get().to(|session: SessionContext| async move {
                        session.log_out();
                        HttpResponse::Ok().finish()
                    }),
                ),
        )
    };
}

fn session_cookie<B>(response: &actix_web::dev::ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

#[actix_web::test]
async fn missing_session_is_unauthorized() {
    let app = session_app!().await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn identity_round_trips_through_the_cookie() {
    let app = session_app!().await;

    let login = test::call_service(
        &app,
        test::TestRequest::get().uri("/login-as-admin").to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let cookie = session_cookie(&login);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/whoami")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = test::read_body(res).await;
    assert_eq!(body.as_ref(), b"meera");
}

#[actix_web::test]
async fn role_mismatch_is_unauthorized() {
    let app = session_app!().await;

    let login = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/login-as-professional")
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&login);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/admin-only")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn admin_passes_the_role_gate() {
    let app = session_app!().await;

    let login = test::call_service(
        &app,
        test::TestRequest::get().uri("/login-as-admin").to_request(),
    )
    .await;
    let cookie = session_cookie(&login);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/admin-only")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn logout_empties_the_session_cookie() {
    let app = session_app!().await;

    let login = test::call_service(
        &app,
        test::TestRequest::get().uri("/login-as-admin").to_request(),
    )
    .await;
    let cookie = session_cookie(&login);

    let logout = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::OK);
    let cleared = session_cookie(&logout);
    assert!(cleared.value().is_empty());
}
