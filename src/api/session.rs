//! Session helpers for HTTP handlers
//!
//! Wraps the Actix session so handlers deal with the domain identity
//! instead of raw cookie keys. The session carries one JSON object: the
//! `SessionUser` stamped at login. Flash messages for page routes ride the
//! same cookie.

use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use tracing::warn;

use crate::config::SessionConfig;
use crate::models::user::Role;
use crate::services::auth::SessionUser;
use crate::utils::errors::AidtrackError;

const USER_KEY: &str = "user";
const FLASH_KEY: &str = "flash";

/// Build the cookie session middleware from configuration.
///
/// The signing key is derived from the configured secret; configuration
/// validation guarantees the secret is long enough for derivation.
pub fn session_middleware(config: &SessionConfig) -> SessionMiddleware<CookieSessionStore> {
    let key = Key::derive_from(config.secret_key.as_bytes());
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_string())
        .cookie_path("/".to_string())
        .cookie_secure(config.cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Stamp the authenticated identity into the session.
    pub fn log_in(&self, user: &SessionUser) -> Result<(), AidtrackError> {
        self.0
            .insert(USER_KEY, user)
            .map_err(|err| AidtrackError::Session(err.to_string()))
    }

    /// Clear the entire session unconditionally.
    pub fn log_out(&self) {
        self.0.purge();
    }

    /// The current identity, if a valid one is present.
    pub fn current_user(&self) -> Option<SessionUser> {
        match self.0.get::<SessionUser>(USER_KEY) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "unreadable session identity");
                None
            }
        }
    }

    /// Require an authenticated identity or fail with 401.
    pub fn require_user(&self) -> Result<SessionUser, AidtrackError> {
        self.current_user()
            .ok_or_else(|| AidtrackError::Unauthorized("Unauthorized".to_string()))
    }

    /// Require an exact role match or fail with 401.
    pub fn require_role(&self, role: Role) -> Result<SessionUser, AidtrackError> {
        let user = self.require_user()?;
        if user.role != role {
            return Err(AidtrackError::Unauthorized("Unauthorized".to_string()));
        }
        Ok(user)
    }

    /// Queue a one-shot message for the next page render.
    pub fn flash(&self, message: &str) {
        if let Err(err) = self.0.insert(FLASH_KEY, message) {
            warn!(error = %err, "failed to store flash message");
        }
    }

    /// Take and clear the queued flash message.
    pub fn take_flash(&self) -> Option<String> {
        self.0
            .remove(FLASH_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
