use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, UserId};
use crate::domain::user::{NewUser, ROLE_USER, UpdateUser, User as DomainUser};

/// Account row as returned by `/Auth/get-all-user` and `/api/users/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "userId")]
    pub id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default)]
    pub gender: Option<bool>,
    #[serde(default)]
    pub level: Option<i32>,
}

/// Envelope of `/Auth/get-all-user`. The misspellings are the backend's.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    #[serde(default, alias = "users", alias = "items")]
    pub infor_users: Vec<User>,
    #[serde(default, alias = "totalPages")]
    pub total_page: Option<usize>,
    #[serde(default)]
    pub item_per_page: Option<usize>,
    #[serde(default, alias = "currentPage")]
    pub curent_page: Option<usize>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

/// Body of create, register-admin and update calls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload<'a> {
    pub user_name: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
    pub roles: Vec<&'a str>,
    pub gender: bool,
    pub level: i32,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        let roles = match user.roles {
            Some(roles) if !roles.is_empty() => roles,
            _ => vec![ROLE_USER.to_string()],
        };
        Ok(Self {
            id: UserId::new(user.id)?,
            user_name: user.user_name.unwrap_or_default(),
            email: user.email.unwrap_or_default(),
            roles,
            gender: user.gender.unwrap_or(true),
            level: user.level.unwrap_or(0),
        })
    }
}

impl<'a> From<&'a NewUser> for UserPayload<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            user_name: user.user_name.as_str(),
            email: user.email.as_str(),
            password: Some(user.password.as_str()),
            roles: user.roles.iter().map(|r| r.as_str()).collect(),
            gender: user.gender,
            level: user.level,
        }
    }
}

impl<'a> From<&'a UpdateUser> for UserPayload<'a> {
    fn from(user: &'a UpdateUser) -> Self {
        Self {
            user_name: user.user_name.as_str(),
            email: user.email.as_str(),
            password: None,
            roles: user.roles.iter().map(|r| r.as_str()).collect(),
            gender: user.gender,
            level: user.level,
        }
    }
}
