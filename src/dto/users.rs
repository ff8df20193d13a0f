//! DTOs for the user dialog.

use serde::Serialize;

use crate::domain::user::{ASSIGNABLE_ROLES, ROLE_ADMIN, ROLE_SUPER_ADMIN, ROLE_USER, User};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoleOption {
    pub name: &'static str,
    pub selected: bool,
    /// Admin roles can only be granted by a super-admin.
    pub disabled: bool,
}

/// Data required to render the add/edit user form.
#[derive(Debug, Serialize)]
pub struct UserFormData {
    pub user: Option<User>,
    pub is_new: bool,
    pub roles: Vec<RoleOption>,
}

impl UserFormData {
    pub fn new(user: Option<User>, can_create_admins: bool) -> Self {
        let is_new = user.is_none();
        let roles = ASSIGNABLE_ROLES
            .iter()
            .map(|&name| {
                let selected = match &user {
                    Some(user) => user.has_role(name),
                    None => name == ROLE_USER,
                };
                let privileged = name == ROLE_ADMIN || name == ROLE_SUPER_ADMIN;
                RoleOption {
                    name,
                    selected,
                    disabled: is_new && privileged && !can_create_admins,
                }
            })
            .collect();
        Self {
            user,
            is_new,
            roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_preselects_user_role() {
        let data = UserFormData::new(None, false);

        assert!(data.is_new);
        assert!(data.roles.iter().any(|r| r.name == "User" && r.selected));
        assert!(data.roles.iter().any(|r| r.name == "Admin" && r.disabled));
    }
}
