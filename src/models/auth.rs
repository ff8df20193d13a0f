#[cfg(feature = "server")]
use actix_identity::IdentityExt;
#[cfg(feature = "server")]
use actix_session::SessionExt;
#[cfg(feature = "server")]
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use serde::Deserialize;
#[cfg(feature = "server")]
use std::future::{Ready, ready};

use crate::domain::auth::AdminSession;
#[cfg(feature = "server")]
use crate::domain::auth::StoredSession;
#[cfg(feature = "server")]
use crate::routes::AUTH_SESSION_KEY;

/// Body returned by `POST /Auth/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl LoginResponse {
    /// `None` when the backend answered 200 without a token.
    pub fn into_session(self, fallback_email: &str) -> Option<AdminSession> {
        let token = self.token.filter(|t| !t.is_empty())?;
        Some(AdminSession::new(
            token,
            self.refresh_token,
            self.user_id.unwrap_or_default(),
            self.email.unwrap_or_else(|| fallback_email.to_string()),
            self.roles,
        ))
    }
}

/// Signed-in operator, restored from the identity cookie and the session.
///
/// Missing either one answers 401, which the console turns into a redirect
/// to the login page.
#[cfg(feature = "server")]
impl FromRequest for AdminSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let identity = req.get_identity().ok().and_then(|id| id.id().ok());
        let stored = req
            .get_session()
            .get::<StoredSession>(AUTH_SESSION_KEY)
            .ok()
            .flatten();
        match (identity, stored) {
            (Some(id), Some(stored)) if id == stored.user_id || id == stored.email => {
                ready(Ok(AdminSession::from(stored)))
            }
            _ => ready(Err(actix_web::error::ErrorUnauthorized("Not signed in."))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_body_becomes_session() {
        let body = r#"{"token":"t","refreshToken":"r","userId":"u-1","email":"a@b.c","roles":["Admin"]}"#;
        let response: LoginResponse = serde_json::from_str(body).unwrap();

        let session = response.into_session("ignored@b.c").unwrap();

        assert_eq!(session.user_id, "u-1");
        assert_eq!(session.email, "a@b.c");
        assert!(session.is_admin());
    }

    #[test]
    fn missing_token_is_no_session() {
        let response: LoginResponse = serde_json::from_str(r#"{"roles":[]}"#).unwrap();
        assert!(response.into_session("a@b.c").is_none());
    }
}
