//! Authentication service implementation
//!
//! This service validates credentials against the user store and produces
//! the session identity carried by every authenticated request. Lookup is
//! by username AND claimed role; a mismatch on either yields the same
//! generic error so usernames cannot be enumerated.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::database::UserRepository;
use crate::models::user::Role;
use crate::utils::errors::{AidtrackError, Result};
use crate::utils::password;

/// Identity stamped into the session cookie at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub name: String,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Authentication service for credential checks and session identity
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserRepository,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Validate credentials for the claimed role and return the session
    /// identity.
    ///
    /// Every failure mode (unknown username, wrong role, wrong password)
    /// maps to the same generic error. Stored credentials may be Argon2
    /// hashes or legacy plaintext; a matched plaintext credential is
    /// rehashed in place so legacy rows migrate on first login.
    pub async fn authenticate(
        &self,
        username: &str,
        plaintext: &str,
        claimed_role: Role,
    ) -> Result<SessionUser> {
        debug!(username = %username, role = %claimed_role, "authenticating user");

        let user = self
            .users
            .find_by_username_and_role(username, claimed_role.as_str())
            .await?
            .ok_or_else(Self::invalid_credentials)?;

        if !password::verify_password_compat(plaintext, &user.password) {
            return Err(Self::invalid_credentials());
        }

        if !password::is_hashed(&user.password) {
            // Legacy plaintext row: upgrade the credential now that the
            // plaintext is known to be correct.
            match password::hash_password(plaintext) {
                Ok(hash) => {
                    self.users.update_password(user.id, &hash).await?;
                    info!(user_id = user.id, "rehashed legacy plaintext credential");
                }
                Err(err) => {
                    warn!(user_id = user.id, error = %err, "failed to rehash legacy credential");
                }
            }
        }

        info!(user_id = user.id, role = %claimed_role, "user authenticated");
        Ok(SessionUser {
            id: user.id,
            username: user.username,
            role: claimed_role,
            name: user.name,
        })
    }

    fn invalid_credentials() -> AidtrackError {
        AidtrackError::Unauthorized("Invalid credentials".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn session_user_role_predicate() {
        let admin = SessionUser {
            id: 1,
            username: "root".to_string(),
            role: Role::Admin,
            name: "Root".to_string(),
        };
        assert!(admin.is_admin());

        let professional = SessionUser {
            role: Role::Professional,
            ..admin
        };
        assert!(!professional.is_admin());
    }

    #[test]
    fn invalid_credentials_error_is_generic() {
        assert_matches!(
            AuthService::invalid_credentials(),
            AidtrackError::Unauthorized(msg) if msg == "Invalid credentials"
        );
    }

    #[test]
    fn session_user_round_trips_through_json() {
        let user = SessionUser {
            id: 7,
            username: "meera".to_string(),
            role: Role::Professional,
            name: "Meera".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: SessionUser = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
