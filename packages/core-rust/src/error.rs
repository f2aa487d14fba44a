//! Configuration errors raised when a schema, form, or list is wired up
//! incorrectly.
//!
//! These indicate programming defects rather than bad user input: user input
//! problems are reported as data through
//! [`ValidationResult`](crate::schema::ValidationResult) and never surface
//! here.

/// A schema, form, or list was constructed with inconsistent configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A schema declares a field that the initial data object does not carry.
    #[error("schema field `{field}` is missing from the form data")]
    MissingField { field: String },
    /// A pattern rule's regular expression failed to compile.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// A list was configured with a page size of zero.
    #[error("page size must be positive, got {page_size}")]
    InvalidPageSize { page_size: usize },
}
