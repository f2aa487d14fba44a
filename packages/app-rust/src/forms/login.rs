use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;
use vidly_core::{ConfigError, FieldSchema, FormController, FormData, Schema};

use super::blank_data;

/// Fields of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoginField {
    Username,
    Password,
}

impl LoginField {
    pub const ALL: [Self; 2] = [Self::Username, Self::Password];
}

impl fmt::Display for LoginField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Username => "username",
            Self::Password => "password",
        })
    }
}

/// Values handed over by a successful login submit.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub type LoginForm = FormController<LoginField, Credentials>;

#[must_use]
pub fn login_schema() -> Schema<LoginField> {
    Schema::new()
        .field(
            LoginField::Username,
            FieldSchema::string().required().label("Username"),
        )
        .field(
            LoginField::Password,
            FieldSchema::string().required().label("Password"),
        )
}

/// Blank login form. Submitting logs the username and yields the credentials.
///
/// # Errors
///
/// Propagates [`ConfigError`] from the controller; the built-in schema and
/// data always match.
pub fn login_form() -> Result<LoginForm, ConfigError> {
    FormController::new(
        login_schema(),
        blank_data(&LoginField::ALL),
        |data: &FormData<LoginField>| {
            let username = data.text(LoginField::Username).to_string();
            info!(%username, "login submitted");
            Credentials {
                username,
                password: data.text(LoginField::Password).to_string(),
            }
        },
    )
}
