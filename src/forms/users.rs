use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{NewPassword, RoleName, UserEmail, UserId, UserName};
use crate::domain::user::{ASSIGNABLE_ROLES, NewUser, ROLE_USER, UpdateUser};
use crate::forms::FormError;

/// Add/edit user form. `roles` repeats, so it is parsed with `serde_html_form`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SaveUserForm {
    /// Empty when creating.
    #[serde(default)]
    pub id: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub user_name: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// `male` or `female`.
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub level: String,
}

/// Validated outcome of [`SaveUserForm`].
#[derive(Debug)]
pub enum SaveUserPayload {
    Create(NewUser),
    Update(UserId, UpdateUser),
}

fn parse_roles(raw: &[String]) -> Result<Vec<RoleName>, FormError> {
    let mut roles = Vec::new();
    for role in raw.iter().map(|r| r.trim()).filter(|r| !r.is_empty()) {
        let canonical = ASSIGNABLE_ROLES
            .iter()
            .find(|known| known.eq_ignore_ascii_case(role))
            .ok_or(FormError::InvalidRole)?;
        let role = RoleName::new(*canonical)?;
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    if roles.is_empty() {
        roles.push(RoleName::new(ROLE_USER)?);
    }
    Ok(roles)
}

fn parse_level(raw: &str) -> Result<i32, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    match raw.parse::<i32>() {
        Ok(level) if level >= 0 => Ok(level),
        _ => Err(FormError::InvalidLevel),
    }
}

impl TryFrom<SaveUserForm> for SaveUserPayload {
    type Error = FormError;

    fn try_from(form: SaveUserForm) -> Result<Self, Self::Error> {
        let creating = form.id.trim().is_empty();
        if form.validate().is_err() || (creating && form.password.is_empty()) {
            return Err(FormError::MissingFields);
        }

        let user_name = UserName::new(form.user_name.as_str()).map_err(|_| FormError::InvalidUserName)?;
        let email = UserEmail::new(form.email.as_str())?;
        let roles = parse_roles(&form.roles)?;
        let gender = !form.gender.trim().eq_ignore_ascii_case("female");
        let level = parse_level(&form.level)?;

        if creating {
            let password = NewPassword::new(form.password)?;
            return Ok(SaveUserPayload::Create(NewUser {
                user_name,
                email,
                password,
                roles,
                gender,
                level,
            }));
        }

        let id = UserId::new(form.id)?;
        Ok(SaveUserPayload::Update(
            id,
            UpdateUser {
                user_name,
                email,
                roles,
                gender,
                level,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_form() -> SaveUserForm {
        SaveUserForm {
            user_name: "ann".into(),
            email: "Ann@WordWise.com".into(),
            password: "Secr3t!".into(),
            roles: vec!["admin".into(), "Admin".into()],
            gender: "female".into(),
            level: "2".into(),
            ..SaveUserForm::default()
        }
    }

    #[test]
    fn repeated_roles_parse_from_urlencoded_body() {
        let body = "id=&user_name=ann&email=a%40b.io&password=Secr3t%21&roles=User&roles=Admin&gender=male&level=1";
        let form: SaveUserForm = serde_html_form::from_str(body).unwrap();

        assert_eq!(form.roles, vec!["User".to_string(), "Admin".to_string()]);
    }

    #[test]
    fn create_payload_normalizes_input() {
        let payload = SaveUserPayload::try_from(create_form()).unwrap();

        let SaveUserPayload::Create(user) = payload else {
            panic!("expected a create payload");
        };
        assert_eq!(user.email.as_str(), "ann@wordwise.com");
        assert_eq!(user.roles.len(), 1);
        assert!(user.is_privileged());
        assert!(!user.gender);
        assert_eq!(user.level, 2);
    }

    #[test]
    fn weak_password_is_rejected() {
        let form = SaveUserForm {
            password: "secret".into(),
            ..create_form()
        };
        assert!(matches!(
            SaveUserPayload::try_from(form),
            Err(FormError::WeakPassword)
        ));
    }

    #[test]
    fn missing_fields_are_reported_first() {
        let form = SaveUserForm {
            user_name: String::new(),
            ..create_form()
        };
        assert!(matches!(
            SaveUserPayload::try_from(form),
            Err(FormError::MissingFields)
        ));
    }

    #[test]
    fn update_ignores_password_and_defaults_role() {
        let form = SaveUserForm {
            id: "a1b2".into(),
            password: String::new(),
            roles: Vec::new(),
            ..create_form()
        };

        let SaveUserPayload::Update(id, update) = SaveUserPayload::try_from(form).unwrap() else {
            panic!("expected an update payload");
        };
        assert_eq!(id.as_str(), "a1b2");
        assert_eq!(update.roles[0].as_str(), "User");
    }

    #[test]
    fn unknown_role_and_negative_level_are_rejected() {
        let form = SaveUserForm {
            roles: vec!["Owner".into()],
            ..create_form()
        };
        assert!(matches!(
            SaveUserPayload::try_from(form),
            Err(FormError::InvalidRole)
        ));

        let form = SaveUserForm {
            level: "-1".into(),
            ..create_form()
        };
        assert!(matches!(
            SaveUserPayload::try_from(form),
            Err(FormError::InvalidLevel)
        ));
    }
}
