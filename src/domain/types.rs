//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email) so that once a value reaches the domain layer it
//! can be treated as trusted.
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Password does not satisfy the account password policy.
    #[error(
        "password must be at least 6 characters, with 1 uppercase letter, 1 number and 1 special character"
    )]
    WeakPassword,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ReportId, "Unique identifier for a content report.");
id_newtype!(FlashcardSetId, "Unique identifier for a flashcard set.");
id_newtype!(TestId, "Unique identifier for a multiple-choice test.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    UserId,
    "Backend account identifier (an opaque GUID string)."
);

non_empty_string_newtype!(UserName, "Account display name enforcing non-empty values.");

non_empty_string_newtype!(RoleName, "Account role name such as `Admin` or `User`.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserEmail(String);

impl UserEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for UserEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserEmail {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for UserEmail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserEmail> for String {
    fn from(value: UserEmail) -> Self {
        value.0
    }
}

const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*";

/// Plain-text password accepted for new accounts.
///
/// At least 6 characters with one uppercase ASCII letter, one digit and one
/// of `!@#$%^&*`.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(String);

impl NewPassword {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        let long_enough = value.chars().count() >= 6;
        let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = value.chars().any(|c| c.is_ascii_digit());
        let has_special = value.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));

        if long_enough && has_upper && has_digit && has_special {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::WeakPassword)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("NewPassword(***)")
    }
}

/// Moderation state of a content report.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReportStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Pending,
        ReportStatus::Approved,
        ReportStatus::Rejected,
    ];

    /// Numeric code used by the backend.
    pub const fn code(self) -> i32 {
        match self {
            ReportStatus::Pending => 0,
            ReportStatus::Approved => 1,
            ReportStatus::Rejected => 2,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, TypeConstraintError> {
        match code {
            0 => Ok(ReportStatus::Pending),
            1 => Ok(ReportStatus::Approved),
            2 => Ok(ReportStatus::Rejected),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown report status {other}"
            ))),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::Approved => "Approved",
            ReportStatus::Rejected => "Rejected",
        }
    }

    /// Bootstrap contextual class used by the status badge.
    pub const fn badge(self) -> &'static str {
        match self {
            ReportStatus::Pending => "warning",
            ReportStatus::Approved => "success",
            ReportStatus::Rejected => "danger",
        }
    }
}

impl Display for ReportStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportStatus {
    type Err = TypeConstraintError;

    /// Accepts either the numeric code or the (case-insensitive) name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Self::from_code(code);
        }
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown report status {s}")))
    }
}

/// Kind of content a report points at.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ContentType {
    FlashcardSet,
    Flashcard,
    Lesson,
    Comment,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::FlashcardSet,
        ContentType::Flashcard,
        ContentType::Lesson,
        ContentType::Comment,
    ];

    /// Numeric code used by the backend.
    pub const fn code(self) -> i32 {
        match self {
            ContentType::FlashcardSet => 1,
            ContentType::Flashcard => 2,
            ContentType::Lesson => 3,
            ContentType::Comment => 4,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, TypeConstraintError> {
        match code {
            1 => Ok(ContentType::FlashcardSet),
            2 => Ok(ContentType::Flashcard),
            3 => Ok(ContentType::Lesson),
            4 => Ok(ContentType::Comment),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown content type {other}"
            ))),
        }
    }

    /// Name as the backend spells it.
    pub const fn name(self) -> &'static str {
        match self {
            ContentType::FlashcardSet => "FlashcardSet",
            ContentType::Flashcard => "Flashcard",
            ContentType::Lesson => "Lesson",
            ContentType::Comment => "Comment",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ContentType::FlashcardSet => "Flashcard Set",
            ContentType::Flashcard => "Flashcard",
            ContentType::Lesson => "Lesson",
            ContentType::Comment => "Comment",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContentType {
    type Err = TypeConstraintError;

    /// Accepts the numeric code, the backend name or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Self::from_code(code);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s) || kind.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown content type {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_non_positive_values() {
        assert_eq!(ReportId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ReportId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ReportId::new(7).unwrap().get(), 7);
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = UserEmail::new("  Admin@WordWise.com ").unwrap();
        assert_eq!(email.as_str(), "admin@wordwise.com");
        assert_eq!(
            UserEmail::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn password_policy() {
        assert!(NewPassword::new("Secr3t!").is_ok());
        assert!(NewPassword::new("Ab1!").is_err());
        assert!(NewPassword::new("secret1!").is_err());
        assert!(NewPassword::new("Secret!!").is_err());
        assert!(NewPassword::new("Secret11").is_err());
    }

    #[test]
    fn report_status_parses_codes_and_names() {
        assert_eq!("1".parse::<ReportStatus>(), Ok(ReportStatus::Approved));
        assert_eq!("rejected".parse::<ReportStatus>(), Ok(ReportStatus::Rejected));
        assert!("9".parse::<ReportStatus>().is_err());
        assert_eq!(ReportStatus::Pending.code(), 0);
    }

    #[test]
    fn content_type_parses_codes_names_and_labels() {
        assert_eq!("FlashcardSet".parse::<ContentType>(), Ok(ContentType::FlashcardSet));
        assert_eq!("Flashcard Set".parse::<ContentType>(), Ok(ContentType::FlashcardSet));
        assert_eq!("3".parse::<ContentType>(), Ok(ContentType::Lesson));
        assert!("Video".parse::<ContentType>().is_err());
    }
}
