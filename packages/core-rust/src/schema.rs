//! Declarative schema validation for form data.
//!
//! A [`Schema`] maps each field of an entity to a [`FieldSchema`]: an optional
//! label plus an ordered list of [`Rule`]s. Validation is a pure function of
//! `(schema, field, value)` and always produces the same message for the same
//! input.
//!
//! # Evaluation order
//!
//! For a single field:
//! 1. `Required` is checked first, wherever it was declared. A blank value on
//!    a required field yields the required message and nothing else.
//! 2. A blank value on an optional field passes every remaining rule.
//! 3. The remaining rules run in declaration order; the first failure wins.
//!
//! Numeric rules (`Min`, `Max`, `TypeOf(Number)`) report a type error for
//! non-numeric input instead of a range error.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{FieldKey, FormData, Value};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// Kind accepted by a [`Rule::TypeOf`] check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
}

/// A single validation rule.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must not be blank.
    Required,
    /// Text must have at least this many characters.
    MinLength(usize),
    /// Text must have at most this many characters.
    MaxLength(usize),
    /// Number must be `>=` the bound.
    Min(f64),
    /// Number must be `<=` the bound.
    Max(f64),
    /// Text must match the regular expression.
    Pattern(Regex),
    /// Text must look like an email address.
    Email,
    /// Value must be of the given kind.
    TypeOf(ValueKind),
}

impl Rule {
    /// Checks `value` against this rule, returning the failure message.
    ///
    /// `Required` is handled by [`FieldSchema::check`] and always passes here.
    fn check(&self, label: &str, value: &Value) -> Result<(), String> {
        match self {
            Self::Required => Ok(()),
            Self::TypeOf(ValueKind::String) => match value {
                Value::String(_) => Ok(()),
                _ => Err(format!("\"{label}\" must be a string")),
            },
            Self::TypeOf(ValueKind::Number) => number(label, value).map(|_| ()),
            Self::Min(bound) => {
                if number(label, value)? < *bound {
                    return Err(format!("\"{label}\" must be larger than or equal to {bound}"));
                }
                Ok(())
            }
            Self::Max(bound) => {
                if number(label, value)? > *bound {
                    return Err(format!("\"{label}\" must be less than or equal to {bound}"));
                }
                Ok(())
            }
            Self::MinLength(n) => {
                if value.to_string().chars().count() < *n {
                    return Err(format!(
                        "\"{label}\" length must be at least {n} characters long"
                    ));
                }
                Ok(())
            }
            Self::MaxLength(n) => {
                if value.to_string().chars().count() > *n {
                    return Err(format!(
                        "\"{label}\" length must be less than or equal to {n} characters long"
                    ));
                }
                Ok(())
            }
            Self::Email => {
                if !EMAIL_RE.is_match(&value.to_string()) {
                    return Err(format!("\"{label}\" must be a valid email"));
                }
                Ok(())
            }
            Self::Pattern(re) => {
                let text = value.to_string();
                if !re.is_match(&text) {
                    return Err(format!(
                        "\"{label}\" with value \"{text}\" fails to match the required pattern: {}",
                        re.as_str()
                    ));
                }
                Ok(())
            }
        }
    }
}

fn number(label: &str, value: &Value) -> Result<f64, String> {
    value
        .as_number()
        .ok_or_else(|| format!("\"{label}\" must be a number"))
}

/// Label and ordered rules for one field.
///
/// Built in a chained style:
///
/// ```
/// use vidly_core::schema::FieldSchema;
///
/// let password = FieldSchema::string().required().min_length(5).label("Password");
/// assert_eq!(password.label_text(), Some("Password"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    label: Option<String>,
    rules: Vec<Rule>,
}

impl FieldSchema {
    /// An empty rule list: any value passes.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Starts with a `TypeOf(String)` rule.
    #[must_use]
    pub fn string() -> Self {
        Self::any().rule(Rule::TypeOf(ValueKind::String))
    }

    /// Starts with a `TypeOf(Number)` rule.
    #[must_use]
    pub fn number() -> Self {
        Self::any().rule(Rule::TypeOf(ValueKind::Number))
    }

    /// Appends an arbitrary rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }

    #[must_use]
    pub fn min_length(self, n: usize) -> Self {
        self.rule(Rule::MinLength(n))
    }

    #[must_use]
    pub fn max_length(self, n: usize) -> Self {
        self.rule(Rule::MaxLength(n))
    }

    #[must_use]
    pub fn min(self, bound: f64) -> Self {
        self.rule(Rule::Min(bound))
    }

    #[must_use]
    pub fn max(self, bound: f64) -> Self {
        self.rule(Rule::Max(bound))
    }

    #[must_use]
    pub fn email(self) -> Self {
        self.rule(Rule::Email)
    }

    /// Appends a pattern rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if `pattern` does not compile.
    pub fn pattern(self, pattern: &str) -> Result<Self, ConfigError> {
        let re = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.rule(Rule::Pattern(re)))
    }

    /// Human-readable name used in messages instead of the field name.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn is_required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required))
    }

    /// First failing message for `value`, or `None` when every rule passes.
    ///
    /// A missing value is checked as an empty string.
    fn check(&self, fallback_label: &str, value: Option<&Value>) -> Option<String> {
        let label = self.label.as_deref().unwrap_or(fallback_label);
        let blank = value.map_or(true, Value::is_blank);

        if blank {
            return self
                .is_required()
                .then(|| format!("\"{label}\" is required"));
        }

        let value = value?;
        self.rules
            .iter()
            .find_map(|rule| rule.check(label, value).err())
    }
}

/// Outcome of whole-object validation.
///
/// `Valid` is distinct from an empty error map: `Invalid` always carries at
/// least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ValidationResult<F: Ord> {
    /// The data object conforms to the schema.
    Valid,
    /// One or more fields failed; each maps to its first failing message.
    Invalid {
        /// Field to message, one entry per failing field.
        errors: BTreeMap<F, String>,
    },
}

impl<F: FieldKey> ValidationResult<F> {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Borrowed error map, `None` when valid.
    #[must_use]
    pub fn errors(&self) -> Option<&BTreeMap<F, String>> {
        match self {
            Self::Valid => None,
            Self::Invalid { errors } => Some(errors),
        }
    }

    /// Owned error map; empty when valid.
    #[must_use]
    pub fn into_errors(self) -> BTreeMap<F, String> {
        match self {
            Self::Valid => BTreeMap::new(),
            Self::Invalid { errors } => errors,
        }
    }
}

/// Field-to-rules mapping for one entity.
///
/// Only declared fields are ever validated; data for other fields is ignored.
#[derive(Debug, Clone)]
pub struct Schema<F: Ord> {
    fields: BTreeMap<F, FieldSchema>,
}

impl<F: FieldKey> Schema<F> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Declares `key` with the given rules, replacing an earlier declaration.
    #[must_use]
    pub fn field(mut self, key: F, field: FieldSchema) -> Self {
        self.fields.insert(key, field);
        self
    }

    #[must_use]
    pub fn get(&self, key: F) -> Option<&FieldSchema> {
        self.fields.get(&key)
    }

    #[must_use]
    pub fn declares(&self, key: F) -> bool {
        self.fields.contains_key(&key)
    }

    /// Declared fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.fields.keys().copied()
    }

    /// Validates one field in isolation.
    ///
    /// Returns the first failing rule's message, or `None` if the value passes
    /// or the field is not declared.
    #[must_use]
    pub fn validate_field(&self, key: F, value: &Value) -> Option<String> {
        let field = self.fields.get(&key)?;
        field.check(&key.to_string(), Some(value))
    }

    /// Validates every declared field, collecting one message per failing
    /// field. Does not stop at the first failing field.
    #[must_use]
    pub fn validate_object(&self, data: &FormData<F>) -> ValidationResult<F> {
        let errors: BTreeMap<F, String> = self
            .fields
            .iter()
            .filter_map(|(key, field)| {
                field
                    .check(&key.to_string(), data.get(*key))
                    .map(|message| (*key, message))
            })
            .collect();

        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid { errors }
        }
    }
}

impl<F: FieldKey> Default for Schema<F> {
    fn default() -> Self {
        Self::new()
    }
}
