//! Validated form controller.
//!
//! [`FormController`] owns one entity's editable data, its validation errors,
//! and the submit action. Concrete forms are built by composition: a schema, an
//! initial data object, and a submit closure.
//!
//! # Error bookkeeping
//!
//! `errors` holds a key exactly when that field currently fails its rules. The
//! map is computed eagerly at construction and on every change, so a missing
//! key always means "verified valid".

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::schema::{Schema, ValidationResult};
use crate::types::{FieldKey, FormData, Value};

/// Submit action invoked with the validated data.
pub type SubmitFn<F, O> = Box<dyn FnMut(&FormData<F>) -> O + Send>;

/// Lifecycle of a form attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormStatus {
    /// Accepting edits; submission gated on validity.
    Editing,
    /// The submit action ran for the current data.
    Submitted,
}

/// Outcome of [`FormController::handle_submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<F: Ord, O> {
    /// Data was valid and the submit action returned this output.
    Submitted(O),
    /// Data was invalid; the action did not run.
    Rejected {
        /// Errors now stored in the form state.
        errors: BTreeMap<F, String>,
    },
}

impl<F: FieldKey, O> Submission<F, O> {
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }

    /// Action output, if the submission went through.
    pub fn output(self) -> Option<O> {
        match self {
            Self::Submitted(out) => Some(out),
            Self::Rejected { .. } => None,
        }
    }
}

/// Read-only view handed to the presentation layer after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot<F: Ord> {
    pub data: FormData<F>,
    pub errors: BTreeMap<F, String>,
    pub can_submit: bool,
    pub status: FormStatus,
}

/// Generic validated form, parameterized by field enum `F` and submit output `O`.
pub struct FormController<F: Ord, O = ()> {
    schema: Schema<F>,
    data: FormData<F>,
    errors: BTreeMap<F, String>,
    status: FormStatus,
    on_submit: SubmitFn<F, O>,
}

impl<F: FieldKey, O> FormController<F, O> {
    /// Creates a form over `data` validated by `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if `schema` declares a field that
    /// `data` does not carry.
    pub fn new(
        schema: Schema<F>,
        data: FormData<F>,
        on_submit: impl FnMut(&FormData<F>) -> O + Send + 'static,
    ) -> Result<Self, ConfigError> {
        ensure_fields(&schema, &data)?;
        let errors = schema.validate_object(&data).into_errors();
        Ok(Self {
            schema,
            data,
            errors,
            status: FormStatus::Editing,
            on_submit: Box::new(on_submit),
        })
    }

    /// Applies a raw input change.
    ///
    /// The value is always stored, even when invalid, so the input reflects
    /// what was typed. The field's error entry is replaced or removed.
    pub fn handle_change(&mut self, field: F, value: impl Into<Value>) {
        let value = value.into();
        match self.schema.validate_field(field, &value) {
            Some(message) => {
                debug!(field = %field, %message, "field invalid");
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
        self.data.set(field, value);
        self.status = FormStatus::Editing;
    }

    /// Validates the whole object and runs the submit action if it is valid.
    pub fn handle_submit(&mut self) -> Submission<F, O> {
        match self.schema.validate_object(&self.data) {
            ValidationResult::Valid => {
                self.errors.clear();
                let output = (self.on_submit)(&self.data);
                self.status = FormStatus::Submitted;
                info!(fields = self.data.len(), "form submitted");
                Submission::Submitted(output)
            }
            ValidationResult::Invalid { errors } => {
                debug!(failing = errors.len(), "submit rejected");
                self.errors.clone_from(&errors);
                Submission::Rejected { errors }
            }
        }
    }

    /// Whether the current data passes whole-object validation.
    ///
    /// Recomputed on every call.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.schema.validate_object(&self.data).is_valid()
    }

    /// Replaces the whole data object, e.g. after loading an entity to edit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if `data` lacks a schema field;
    /// the current state is left untouched in that case.
    pub fn replace_data(&mut self, data: FormData<F>) -> Result<(), ConfigError> {
        ensure_fields(&self.schema, &data)?;
        self.errors = self.schema.validate_object(&data).into_errors();
        self.data = data;
        self.status = FormStatus::Editing;
        Ok(())
    }

    #[must_use]
    pub fn data(&self) -> &FormData<F> {
        &self.data
    }

    #[must_use]
    pub fn value(&self, field: F) -> Option<&Value> {
        self.data.get(field)
    }

    #[must_use]
    pub fn errors(&self) -> &BTreeMap<F, String> {
        &self.errors
    }

    #[must_use]
    pub fn error(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.status
    }

    #[must_use]
    pub fn schema(&self) -> &Schema<F> {
        &self.schema
    }

    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot<F> {
        FormSnapshot {
            data: self.data.clone(),
            errors: self.errors.clone(),
            can_submit: self.can_submit(),
            status: self.status,
        }
    }
}

impl<F: FieldKey, O> fmt::Debug for FormController<F, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("data", &self.data)
            .field("errors", &self.errors)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

fn ensure_fields<F: FieldKey>(schema: &Schema<F>, data: &FormData<F>) -> Result<(), ConfigError> {
    match schema.fields().find(|field| !data.contains(*field)) {
        Some(field) => Err(ConfigError::MissingField {
            field: field.to_string(),
        }),
        None => Ok(()),
    }
}
