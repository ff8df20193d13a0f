use serde_json::Value;
use thiserror::Error;

/// Failures talking to the WordWise backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// No response at all (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// 401: the bearer token is missing or expired.
    #[error("Authentication required")]
    Unauthenticated,

    /// 403.
    #[error("Forbidden: {}", .0.as_deref().unwrap_or("access denied"))]
    Forbidden(Option<String>),

    /// 404.
    #[error("Entity not found")]
    NotFound,

    /// Any other 4xx; carries the backend message when one was sent.
    #[error("Validation error: {}", .message.as_deref().unwrap_or("request rejected"))]
    Validation {
        status: u16,
        message: Option<String>,
    },

    /// 5xx.
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Classifies a non-success HTTP status and its body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            401 => RepositoryError::Unauthenticated,
            403 => RepositoryError::Forbidden(message),
            404 => RepositoryError::NotFound,
            400..=499 => RepositoryError::Validation { status, message },
            500..=599 => RepositoryError::Server { status, message },
            _ => RepositoryError::Unexpected(format!("unexpected status {status}")),
        }
    }

    /// HTTP status behind this error, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RepositoryError::Unauthenticated => Some(401),
            RepositoryError::Forbidden(_) => Some(403),
            RepositoryError::NotFound => Some(404),
            RepositoryError::Validation { status, .. } | RepositoryError::Server { status, .. } => {
                Some(*status)
            }
            RepositoryError::Network(_) | RepositoryError::Unexpected(_) => None,
        }
    }

    /// Message the backend sent, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            RepositoryError::Forbidden(message)
            | RepositoryError::Validation { message, .. }
            | RepositoryError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Operator-facing text: the backend message when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            RepositoryError::Network(_) => "Network error. Please try again.".to_string(),
            RepositoryError::Unauthenticated => {
                "Authentication required. Please login again.".to_string()
            }
            other => other
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

const MAX_PLAIN_MESSAGE_LEN: usize = 300;

/// Pulls a human-readable message out of an error body.
///
/// Understands `{"message": ..}`, ASP.NET problem details (`title`, and the
/// first entry of `errors`), a bare JSON string and short plain text.
pub fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(text)) => non_empty(text),
        Ok(Value::Object(map)) => {
            if let Some(message) = map.get("message").and_then(Value::as_str) {
                return non_empty(message.to_string());
            }
            if let Some(message) = map.get("errors").and_then(first_validation_error) {
                return Some(message);
            }
            map.get("title")
                .and_then(Value::as_str)
                .and_then(|title| non_empty(title.to_string()))
        }
        Ok(_) => None,
        Err(_) if trimmed.len() <= MAX_PLAIN_MESSAGE_LEN && !trimmed.starts_with('<') => {
            Some(trimmed.to_string())
        }
        Err(_) => None,
    }
}

/// First message of a validation `errors` object, preferring `Email` and the
/// anonymous `""` key that carries "Email or Password is not correct".
pub fn first_validation_error(errors: &Value) -> Option<String> {
    let map = errors.as_object()?;
    let first_of = |value: &Value| -> Option<String> {
        match value {
            Value::Array(items) => items.iter().find_map(|item| item.as_str().map(str::to_string)),
            Value::String(text) => Some(text.clone()),
            _ => None,
        }
    };

    ["Email", ""]
        .iter()
        .find_map(|key| map.get(*key).and_then(first_of))
        .or_else(|| map.values().find_map(first_of))
        .and_then(non_empty)
}

fn non_empty(text: String) -> Option<String> {
    let text = text.trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(feature = "server")]
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return RepositoryError::Unexpected(format!("Malformed response: {err}"));
        }
        match err.status() {
            Some(status) => RepositoryError::from_status(status.as_u16(), ""),
            None => RepositoryError::Network(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_taxonomy() {
        assert_eq!(
            RepositoryError::from_status(401, ""),
            RepositoryError::Unauthenticated
        );
        assert_eq!(RepositoryError::from_status(404, ""), RepositoryError::NotFound);
        assert_eq!(
            RepositoryError::from_status(422, r#"{"message":"bad level"}"#),
            RepositoryError::Validation {
                status: 422,
                message: Some("bad level".to_string())
            }
        );
        assert_eq!(
            RepositoryError::from_status(503, ""),
            RepositoryError::Server {
                status: 503,
                message: None
            }
        );
    }

    #[test]
    fn extracts_messages_from_common_bodies() {
        assert_eq!(
            extract_message(r#""Report not pending""#).as_deref(),
            Some("Report not pending")
        );
        assert_eq!(
            extract_message(r#"{"errors":{"":["Email or Password is not correct"]}}"#).as_deref(),
            Some("Email or Password is not correct")
        );
        assert_eq!(
            extract_message(r#"{"title":"One or more validation errors occurred."}"#).as_deref(),
            Some("One or more validation errors occurred.")
        );
        assert_eq!(extract_message("plain failure").as_deref(), Some("plain failure"));
        assert_eq!(extract_message("<html>oops</html>"), None);
        assert_eq!(extract_message("  "), None);
    }

    #[test]
    fn user_message_prefers_backend_text() {
        let err = RepositoryError::from_status(400, r#"{"message":"Level must be positive"}"#);
        assert_eq!(err.user_message("Error saving user"), "Level must be positive");

        let err = RepositoryError::from_status(400, "");
        assert_eq!(err.user_message("Error saving user"), "Error saving user");

        let err = RepositoryError::Network("connection refused".into());
        assert_eq!(err.user_message("ignored"), "Network error. Please try again.");
    }
}
