use serde::Deserialize;
use validator::Validate;

use crate::domain::auth::Credentials;

/// Fields of the login page.
#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl From<LoginForm> for Credentials {
    fn from(form: LoginForm) -> Self {
        Credentials {
            email: form.email.trim().to_string(),
            password: form.password,
        }
    }
}
