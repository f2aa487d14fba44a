use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker for the enumerated field-name types that key schemas and form data.
///
/// Every entity form declares its own `enum` of fields; the `Display` output is
/// used as the fallback label in validation messages.
pub trait FieldKey: Copy + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T> FieldKey for T where T: Copy + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static {}

/// Runtime value held by a form field.
///
/// Text inputs produce `String`; values loaded from a data source may arrive
/// already typed (`Int`, `Float`). There is deliberately no null variant:
/// controlled fields always carry a concrete value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag (checkboxes).
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// 64-bit IEEE 754 float.
    Float(f64),
    /// UTF-8 text exactly as typed.
    String(String),
}

impl Value {
    /// Empty string value, the initial content of a blank text input.
    #[must_use]
    pub fn empty() -> Self {
        Self::String(String::new())
    }

    /// Returns `true` for text that is empty or whitespace-only.
    ///
    /// Text is trimmed first, so `"   "` counts as a missing value.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::String(s) if s.trim().is_empty())
    }

    /// Numeric view of the value. Text is accepted when it parses as a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            // Form values stay far below 2^53, so the conversion is exact.
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) if f.is_finite() => Some(*f),
            Self::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            Self::Float(_) | Self::Bool(_) => None,
        }
    }

    /// Borrowed text, only for `String` values.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// The editable data object of a form, keyed by the form's field enum.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormData<F: Ord> {
    values: BTreeMap<F, Value>,
}

impl<F: FieldKey> FormData<F> {
    /// Creates an empty data object.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: F, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Stores `value` under `field`, replacing any previous value.
    pub fn set(&mut self, field: F, value: impl Into<Value>) {
        self.values.insert(field, value.into());
    }

    #[must_use]
    pub fn get(&self, field: F) -> Option<&Value> {
        self.values.get(&field)
    }

    #[must_use]
    pub fn contains(&self, field: F) -> bool {
        self.values.contains_key(&field)
    }

    /// Text of the field, or `""` when absent or not text.
    #[must_use]
    pub fn text(&self, field: F) -> &str {
        self.get(field).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &Value)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<F: FieldKey> Default for FormData<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FieldKey, V: Into<Value>> FromIterator<(F, V)> for FormData<F> {
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (field, value) in iter {
            data.set(field, value);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Field {
        Name,
        Age,
    }

    impl fmt::Display for Field {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                Field::Name => "name",
                Field::Age => "age",
            })
        }
    }

    #[test]
    fn blank_covers_whitespace_text_only() {
        assert!(Value::empty().is_blank());
        assert!(Value::from("   ").is_blank());
        assert!(!Value::from("a").is_blank());
        assert!(!Value::Int(0).is_blank());
        assert!(!Value::Bool(false).is_blank());
    }

    #[test]
    fn numeric_text_converts() {
        assert_eq!(Value::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(Value::Int(7).as_number(), Some(7.0));
        assert_eq!(Value::from("abc").as_number(), None);
        assert_eq!(Value::from("NaN").as_number(), None);
        assert_eq!(Value::Bool(true).as_number(), None);
    }

    #[test]
    fn display_renders_raw_text() {
        assert_eq!(Value::from("Die Hard").to_string(), "Die Hard");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Int(6).to_string(), "6");
    }

    #[test]
    fn form_data_builder_and_text() {
        let data = FormData::new().with(Field::Name, "Bob").with(Field::Age, 30_i64);
        assert_eq!(data.len(), 2);
        assert_eq!(data.text(Field::Name), "Bob");
        assert_eq!(data.text(Field::Age), "");
        assert!(data.contains(Field::Age));
    }

    #[test]
    fn form_data_serializes_as_flat_map() {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
        #[serde(rename_all = "camelCase")]
        enum Key {
            UserName,
        }
        impl fmt::Display for Key {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("userName")
            }
        }

        let data = FormData::new().with(Key::UserName, "bob");
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json, serde_json::json!({ "userName": "bob" }));
    }
}
