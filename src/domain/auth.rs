//! Operator session established by a successful backend login.

use std::fmt;

use secrecy::{ExposeSecret, SecretBox};
use serde::{Deserialize, Serialize};

use crate::domain::user::{ROLE_ADMIN, ROLE_SUPER_ADMIN};

/// Email and password submitted on the login page.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Explicit authentication context handed to the API client.
///
/// Created on login and dropped on logout; never stored in a global.
pub struct AdminSession {
    pub token: SecretBox<String>,
    pub refresh_token: Option<SecretBox<String>>,
    pub user_id: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl AdminSession {
    pub fn new(
        token: String,
        refresh_token: Option<String>,
        user_id: String,
        email: String,
        roles: Vec<String>,
    ) -> Self {
        Self {
            token: SecretBox::new(Box::new(token)),
            refresh_token: refresh_token.map(|t| SecretBox::new(Box::new(t))),
            user_id,
            email,
            roles,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }

    /// Console access is limited to administrators.
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN) || self.has_role(ROLE_SUPER_ADMIN)
    }

    pub fn is_super_admin(&self) -> bool {
        self.has_role(ROLE_SUPER_ADMIN)
    }

    /// Snapshot persisted in the signed session cookie.
    pub fn to_stored(&self) -> StoredSession {
        StoredSession {
            token: self.token.expose_secret().clone(),
            refresh_token: self
                .refresh_token
                .as_ref()
                .map(|t| t.expose_secret().clone()),
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            roles: self.roles.clone(),
        }
    }
}

impl fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSession")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

/// Serializable form of [`AdminSession`].
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub refresh_token: Option<String>,
    pub user_id: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<StoredSession> for AdminSession {
    fn from(stored: StoredSession) -> Self {
        AdminSession::new(
            stored.token,
            stored.refresh_token,
            stored.user_id,
            stored.email,
            stored.roles,
        )
    }
}

/// Data the template layer may show about the signed-in operator.
#[derive(Clone, Debug, Serialize)]
pub struct CurrentUser {
    pub user_id: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl From<&AdminSession> for CurrentUser {
    fn from(session: &AdminSession) -> Self {
        Self {
            user_id: session.user_id.clone(),
            email: session.email.clone(),
            roles: session.roles.clone(),
        }
    }
}
