//! Form definitions backing the console routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod lists;
pub mod reports;
pub mod users;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Please fill in all required fields.")]
    MissingFields,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("User name cannot be empty.")]
    InvalidUserName,

    #[error("Password must be at least 6 chars, with 1 uppercase, 1 number, 1 special char.")]
    WeakPassword,

    #[error("Select at least one valid role.")]
    InvalidRole,

    #[error("Level must be zero or a positive number.")]
    InvalidLevel,

    #[error("invalid report status")]
    InvalidStatus,
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::InvalidEmail => FormError::InvalidEmail,
            TypeConstraintError::WeakPassword => FormError::WeakPassword,
            TypeConstraintError::EmptyString => FormError::MissingFields,
            TypeConstraintError::NonPositiveId | TypeConstraintError::InvalidValue(_) => {
                FormError::MissingFields
            }
        }
    }
}
