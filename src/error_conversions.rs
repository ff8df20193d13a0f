//! Conversions between the layer-specific error types.
//!
//! The domain layer does not know about repository or service errors, so the
//! glue lives here.

use crate::domain::types::TypeConstraintError;
#[cfg(feature = "server")]
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
#[cfg(feature = "server")]
use crate::services::ServiceError;

#[cfg(feature = "server")]
impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

/// A record the backend sent back violates a domain constraint.
impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Unexpected(val.to_string())
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn form_errors_become_operator_text() {
        let err = ServiceError::from(FormError::WeakPassword);

        assert!(err.is_validation());
        assert_eq!(
            err.user_message("ignored"),
            "Password must be at least 6 chars, with 1 uppercase, 1 number, 1 special char."
        );
    }

    #[test]
    fn constraint_errors_from_backend_are_unexpected() {
        let err = RepositoryError::from(TypeConstraintError::NonPositiveId);

        assert!(matches!(err, RepositoryError::Unexpected(_)));
    }
}
