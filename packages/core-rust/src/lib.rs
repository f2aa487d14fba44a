//! Vidly Core: schema validation, validated forms, and the list query pipeline.

pub mod error;
pub mod form;
pub mod list;
pub mod query;
pub mod schema;
pub mod types;

pub use error::ConfigError;
pub use form::{FormController, FormSnapshot, FormStatus, Submission, SubmitFn};
pub use list::{ListConfig, ListPage, ListView, ListViewController};
pub use query::{
    Category, Filter, QueryPage, QuerySpec, Record, SortColumn, SortDirection, SortValue,
};
pub use schema::{FieldSchema, Rule, Schema, ValidationResult, ValueKind};
pub use types::{FieldKey, FormData, Value};
