//! Screen workflows sitting between the HTTP routes and the repositories.

use thiserror::Error;

use crate::listing::{ListController, PageSource};
use crate::repository::errors::RepositoryError;

pub mod actions;
pub mod auth;
pub mod dashboard;
pub mod flashcard_sets;
pub mod lists;
pub mod multiple_choice;
pub mod reports;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Form(String),
    #[error("{0}")]
    TypeConstraint(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// The backend rejected the operator's token; the console session is over.
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            ServiceError::Repository(RepositoryError::Unauthenticated)
        )
    }

    /// Text for a notice. Validation problems are phrased by the service itself.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Form(message) | ServiceError::TypeConstraint(message) => {
                message.clone()
            }
            ServiceError::Unauthorized => {
                "You do not have permission to perform this action.".to_string()
            }
            ServiceError::NotFound => "The requested record no longer exists.".to_string(),
            ServiceError::Repository(err) => err.user_message(fallback),
        }
    }

    /// Input problems are shown as warnings, everything else as errors.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ServiceError::Form(_) | ServiceError::TypeConstraint(_)
        )
    }
}

/// Runs one fetch through `source` into `list`.
///
/// Failures end up in the list's error banner; an expired token is returned
/// instead so the caller can end the session.
pub async fn fetch_into<T, S>(list: &mut ListController<T>, source: &S, what: &str) -> ServiceResult<()>
where
    T: Send,
    S: PageSource<T> + ?Sized,
{
    let request = list.begin_fetch();
    let result = source.fetch_page(&request).await;
    let expired = matches!(result, Err(RepositoryError::Unauthenticated));
    if let Err(err) = &result {
        log::error!("Failed to load {what}: {err}");
    }
    list.finish_fetch(&request, result);
    if expired {
        return Err(RepositoryError::Unauthenticated.into());
    }
    Ok(())
}
