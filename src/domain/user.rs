use serde::{Deserialize, Serialize};

use crate::domain::types::{NewPassword, RoleName, UserEmail, UserId, UserName};
use crate::listing::Identified;

pub const ROLE_USER: &str = "User";
pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_SUPER_ADMIN: &str = "SuperAdmin";

/// Roles an operator can assign from the user dialog.
pub const ASSIGNABLE_ROLES: [&str; 3] = [ROLE_USER, ROLE_ADMIN, ROLE_SUPER_ADMIN];

/// Platform account as listed by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
    pub roles: Vec<String>,
    /// `true` for male, mirroring the backend flag.
    pub gender: bool,
    pub level: i32,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

impl Identified for User {
    fn identity(&self) -> String {
        self.id.as_str().to_string()
    }
}

/// Account to create.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub user_name: UserName,
    pub email: UserEmail,
    pub password: NewPassword,
    pub roles: Vec<RoleName>,
    pub gender: bool,
    pub level: i32,
}

impl NewUser {
    /// Admin and super-admin accounts go through the dedicated registration endpoint.
    pub fn is_privileged(&self) -> bool {
        self.roles.iter().any(|role| {
            role.eq_ignore_ascii_case(ROLE_ADMIN) || role.eq_ignore_ascii_case(ROLE_SUPER_ADMIN)
        })
    }
}

/// Profile changes for an existing account. Passwords are never updated here.
#[derive(Clone, Debug)]
pub struct UpdateUser {
    pub user_name: UserName,
    pub email: UserEmail,
    pub roles: Vec<RoleName>,
    pub gender: bool,
    pub level: i32,
}
