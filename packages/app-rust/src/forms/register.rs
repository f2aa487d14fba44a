use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;
use vidly_core::{ConfigError, FieldSchema, FormController, FormData, Schema};

use super::blank_data;

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegisterField {
    Username,
    Password,
    Name,
}

impl RegisterField {
    pub const ALL: [Self; 3] = [Self::Username, Self::Password, Self::Name];
}

impl fmt::Display for RegisterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::Name => "name",
        })
    }
}

/// Values handed over by a successful register submit.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    /// Email address used as the login name.
    pub username: String,
    pub password: String,
    pub name: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

pub type RegisterForm = FormController<RegisterField, Registration>;

#[must_use]
pub fn register_schema() -> Schema<RegisterField> {
    Schema::new()
        .field(
            RegisterField::Username,
            FieldSchema::string().required().email().label("Username"),
        )
        .field(
            RegisterField::Password,
            FieldSchema::string()
                .required()
                .min_length(MIN_PASSWORD_LEN)
                .label("Password"),
        )
        .field(
            RegisterField::Name,
            FieldSchema::string().required().label("Name"),
        )
}

/// Blank registration form.
///
/// # Errors
///
/// Propagates [`ConfigError`] from the controller; the built-in schema and
/// data always match.
pub fn register_form() -> Result<RegisterForm, ConfigError> {
    FormController::new(
        register_schema(),
        blank_data(&RegisterField::ALL),
        |data: &FormData<RegisterField>| {
            let username = data.text(RegisterField::Username).to_string();
            info!(%username, "registration submitted");
            Registration {
                username,
                password: data.text(RegisterField::Password).to_string(),
                name: data.text(RegisterField::Name).to_string(),
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_must_be_email() {
        let mut form = register_form().unwrap();
        form.handle_change(RegisterField::Username, "mosh");
        assert_eq!(
            form.error(RegisterField::Username),
            Some("\"Username\" must be a valid email")
        );
        form.handle_change(RegisterField::Username, "mosh@domain.com");
        assert_eq!(form.error(RegisterField::Username), None);
    }

    #[test]
    fn short_password_is_rejected() {
        let mut form = register_form().unwrap();
        form.handle_change(RegisterField::Password, "abcd");
        assert_eq!(
            form.error(RegisterField::Password),
            Some("\"Password\" length must be at least 5 characters long")
        );
        form.handle_change(RegisterField::Password, "abcde");
        assert_eq!(form.error(RegisterField::Password), None);
    }

    #[test]
    fn complete_form_submits() {
        let mut form = register_form().unwrap();
        form.handle_change(RegisterField::Username, "a@b.co");
        form.handle_change(RegisterField::Password, "secret");
        form.handle_change(RegisterField::Name, "Ada");
        assert!(form.can_submit());

        let registration = form.handle_submit().output().unwrap();
        assert_eq!(registration.username, "a@b.co");
        assert_eq!(registration.name, "Ada");
    }

    #[test]
    fn missing_name_blocks_submit() {
        let mut form = register_form().unwrap();
        form.handle_change(RegisterField::Username, "a@b.co");
        form.handle_change(RegisterField::Password, "secret");
        assert!(!form.can_submit());
        assert!(!form.handle_submit().is_submitted());
        assert_eq!(
            form.error(RegisterField::Name),
            Some("\"Name\" is required")
        );
    }
}
