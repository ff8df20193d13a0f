//! Operator sign-in.

use validator::Validate;

use crate::domain::auth::{AdminSession, Credentials};
use crate::forms::auth::LoginForm;
use crate::repository::AuthGateway;
use crate::repository::errors::RepositoryError;
use crate::services::{ServiceError, ServiceResult};

/// Exchanges credentials for a backend session. Only administrators get in.
pub async fn login<R>(repo: &R, form: LoginForm) -> ServiceResult<AdminSession>
where
    R: AuthGateway + ?Sized,
{
    if form.validate().is_err() {
        return Err(ServiceError::Form(
            "Please enter a valid email and password.".to_string(),
        ));
    }

    let credentials = Credentials::from(form);
    let session = repo.login(&credentials).await.map_err(|err| {
        log::error!("Login failed for {}: {err}", credentials.email);
        err
    })?;

    if !session.is_admin() {
        log::warn!("Rejected console login of non-admin {}", session.email);
        return Err(ServiceError::Unauthorized);
    }

    Ok(session)
}

/// Message shown on the login page for a failed attempt.
pub fn login_failure_message(err: &ServiceError) -> String {
    match err {
        ServiceError::Form(message) => message.clone(),
        ServiceError::Unauthorized => {
            "Access denied. This console is for administrators only.".to_string()
        }
        ServiceError::Repository(RepositoryError::Validation {
            status: 400,
            message,
        }) => message
            .clone()
            .unwrap_or_else(|| "Invalid email or password".to_string()),
        ServiceError::Repository(RepositoryError::Server { status: 500, .. }) => {
            "Server error. Please try again later.".to_string()
        }
        ServiceError::Repository(RepositoryError::Network(_)) => {
            "Network error. Please check your connection.".to_string()
        }
        _ => "Login failed. Please try again.".to_string(),
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn form() -> LoginForm {
        LoginForm {
            email: "admin@wordwise.com".to_string(),
            password: "Secr3t!".to_string(),
        }
    }

    fn session(roles: &[&str]) -> AdminSession {
        AdminSession::new(
            "token".to_string(),
            Some("refresh".to_string()),
            "u-1".to_string(),
            "admin@wordwise.com".to_string(),
            roles.iter().map(|r| r.to_string()).collect(),
        )
    }

    #[actix_web::test]
    async fn admin_login_returns_session() {
        let mut repo = MockRepository::new();
        repo.expect_login()
            .withf(|credentials| credentials.email == "admin@wordwise.com")
            .times(1)
            .returning(|_| Ok(session(&["Admin"])));

        let session = login(&repo, form()).await.expect("should log in");

        assert_eq!(session.user_id, "u-1");
    }

    #[actix_web::test]
    async fn non_admin_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_login()
            .times(1)
            .returning(|_| Ok(session(&["User"])));

        let result = login(&repo, form()).await;

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[actix_web::test]
    async fn invalid_form_skips_backend() {
        let mut repo = MockRepository::new();
        repo.expect_login().times(0);
        let bad = LoginForm {
            email: "nope".to_string(),
            password: String::new(),
        };

        let result = login(&repo, bad).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn failure_messages_follow_status() {
        let bad_request = ServiceError::Repository(RepositoryError::from_status(
            400,
            r#"{"errors":{"":["Email or Password is not correct"]}}"#,
        ));
        assert_eq!(
            login_failure_message(&bad_request),
            "Email or Password is not correct"
        );

        let bare_400 = ServiceError::Repository(RepositoryError::from_status(400, ""));
        assert_eq!(login_failure_message(&bare_400), "Invalid email or password");

        let server = ServiceError::Repository(RepositoryError::from_status(500, ""));
        assert_eq!(
            login_failure_message(&server),
            "Server error. Please try again later."
        );

        let network = ServiceError::Repository(RepositoryError::Network("refused".into()));
        assert_eq!(
            login_failure_message(&network),
            "Network error. Please check your connection."
        );

        let other = ServiceError::Repository(RepositoryError::from_status(429, ""));
        assert_eq!(login_failure_message(&other), "Login failed. Please try again.");
    }
}
