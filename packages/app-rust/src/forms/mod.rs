//! Entity form adapters: each binds a field enum, a schema, and a submit
//! action to the generic [`FormController`](vidly_core::FormController).

pub mod login;
pub mod movie;
pub mod register;

pub use login::{login_form, login_schema, Credentials, LoginField, LoginForm};
pub use movie::{movie_data, movie_schema, MovieDraft, MovieField, MovieForm, NEW_MOVIE_ROUTE};
pub use register::{register_form, register_schema, RegisterField, RegisterForm, Registration};

use vidly_core::{FieldKey, FormData, Value};

/// Data object with every field present and empty.
fn blank_data<F: FieldKey>(fields: &[F]) -> FormData<F> {
    fields.iter().map(|&field| (field, Value::empty())).collect()
}
